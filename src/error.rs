// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use thiserror::Error;

/// Failures of the record-size arithmetic over firmware-declared array
/// lengths. Either variant invalidates every record boundary in the blob, so
/// the caller must abort the blob's decode after emitting a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SizeError {
    /// Accumulating the named header field into the per-record size wrapped.
    #[error("record size overflow accumulating {field}")]
    Overflow { field: &'static str },
    /// The payload cannot hold even the log header.
    #[error("payload length {length} too small for the log header")]
    Underflow { length: usize },
}
