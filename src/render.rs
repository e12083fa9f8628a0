// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Bounded text rendering of the small-integer arrays and ack windows
//! embedded in statistics records.

use crate::endian::WordSwap;

/// Number of sequence-number slots tracked by an enqueued/acked window.
pub const BLOCK_ACK_WINDOW: usize = 64;

/// Renders successive values as a comma-separated decimal list.
///
/// The firmware zero-fills the reserved tail of each array, so a zero value
/// terminates the list. Rendering also stops after `max_elems`, when a read
/// falls outside the payload, or when committing the next element would use
/// up the last byte of `capacity`. The trailing comma of the last committed
/// element is dropped; the result is empty if nothing fit.
fn render_list(
    mut read: impl FnMut(usize) -> Option<u32>,
    max_elems: usize,
    capacity: usize,
) -> String {
    let mut out = String::new();
    for i in 0..max_elems {
        let val = match read(i) {
            Some(val) if val != 0 => val,
            _ => break,
        };
        let entry = format!("{},", val);
        if out.len() + entry.len() >= capacity {
            break;
        }
        out.push_str(&entry);
    }
    out.pop();
    out
}

/// Renders up to `max_elems` 8-bit values starting at `offset` in `buf`.
pub fn render_u8_list(
    buf: &[u8],
    offset: usize,
    swap: WordSwap,
    max_elems: usize,
    capacity: usize,
) -> String {
    render_list(
        |i| offset.checked_add(i).and_then(|at| swap.read_u8(buf, at)).map(u32::from),
        max_elems,
        capacity,
    )
}

/// Renders up to `max_elems` 16-bit values starting at `offset` in `buf`.
/// The values live in swap-sensitive word storage, so each element goes
/// through the halfword reader.
pub fn render_u16_list(
    buf: &[u8],
    offset: usize,
    swap: WordSwap,
    max_elems: usize,
    capacity: usize,
) -> String {
    render_list(
        |i| {
            i.checked_mul(2)
                .and_then(|delta| offset.checked_add(delta))
                .and_then(|at| swap.read_u16(buf, at))
                .map(u32::from)
        },
        max_elems,
        capacity,
    )
}

/// Renders the enqueued/acked bitmap pair over the 64-slot ack window.
///
/// The queued string marks each enqueued slot with `'1'` (`'0'` otherwise).
/// The acked string marks an enqueued slot `'y'` when it was acked and `'N'`
/// when it was not; slots that were never enqueued stay `'-'`, so an acked
/// bit without its queued bit renders the same as an empty slot. Word 0
/// covers slots 0..31, word 1 slots 32..63, least-significant bit first.
pub fn render_block_ack_window(queued: [u32; 2], acked: [u32; 2]) -> (String, String) {
    let mut queued_chars = vec![b'0'; BLOCK_ACK_WINDOW];
    let mut acked_chars = vec![b'-'; BLOCK_ACK_WINDOW];
    for word in 0..2 {
        for bit in 0..32 {
            if queued[word] & (1 << bit) != 0 {
                let slot = word * 32 + bit;
                queued_chars[slot] = b'1';
                acked_chars[slot] = if acked[word] & (1 << bit) != 0 { b'y' } else { b'N' };
            }
        }
    }
    // All marker bytes are ASCII.
    (
        String::from_utf8(queued_chars).unwrap_or_default(),
        String::from_utf8(acked_chars).unwrap_or_default(),
    )
}
