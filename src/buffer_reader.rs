// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    std::mem::size_of,
    zerocopy::{ByteSlice, FromBytes, LayoutVerified, Unaligned},
};

/// A cursor over an immutable byte slice. Every advance is bounds-checked
/// and no raw address ever escapes to a caller; parsing layers above this
/// one only ever see typed views and remaining-byte counts.
pub struct BufferReader<B> {
    buf: Option<B>,
    bytes_read: usize,
}

impl<B: ByteSlice> BufferReader<B> {
    pub fn new(bytes: B) -> Self {
        BufferReader { buf: Some(bytes), bytes_read: 0 }
    }

    /// Reads a typed view over the next `size_of::<T>()` bytes, advancing
    /// the cursor. Returns `None` without consuming anything if not enough
    /// bytes remain.
    pub fn read<T: FromBytes + Unaligned>(&mut self) -> Option<LayoutVerified<B, T>> {
        if self.bytes_remaining() < size_of::<T>() {
            return None;
        }
        let buf = self.buf.take()?;
        let (parsed, remaining) = LayoutVerified::new_unaligned_from_prefix(buf)?;
        self.buf = Some(remaining);
        self.bytes_read += size_of::<T>();
        Some(parsed)
    }

    /// Reads a typed view without advancing the cursor.
    pub fn peek<T: FromBytes + Unaligned>(&self) -> Option<LayoutVerified<&[u8], T>> {
        LayoutVerified::new_unaligned_from_prefix(&self.buf.as_ref()?[..]).map(|(parsed, _)| parsed)
    }

    /// Splits off the next `len` bytes, advancing the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Option<B> {
        if self.bytes_remaining() < len {
            return None;
        }
        let buf = self.buf.take()?;
        let (head, tail) = buf.split_at(len);
        self.buf = Some(tail);
        self.bytes_read += len;
        Some(head)
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buf.as_ref().map_or(0, |buf| buf.len())
    }

    /// Consumes the reader, returning whatever was not yet read.
    pub fn into_remaining(mut self) -> B
    where
        B: Default,
    {
        self.buf.take().unwrap_or_default()
    }
}
