// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Decodes the diagnostic statistics blobs a wireless target pushes to the
//! host over the host-target transport. Each blob starts with a tagged,
//! length-prefixed envelope word; [`dispatch`] identifies the statistics
//! type, gates on the firmware-reported status, and routes the payload to a
//! per-type decoder that renders structured entries through a
//! [`StatsLogger`].
//!
//! Nothing here trusts a firmware-supplied size field. The variable-length
//! tx PPDU log decoder computes record sizes with overflow detection at
//! every accumulation, and every other slice access is bounds-checked, so a
//! hostile blob terminates its own decode without reading out of bounds.

pub mod buffer_reader;
mod endian;
mod envelope;
pub mod error;
mod fields;
mod logger;
pub mod ppdu;
mod render;
mod stats;

#[cfg(test)]
pub(crate) mod test_utils;

pub use {
    endian::WordSwap,
    envelope::{dispatch, StatsEnvelope, StatsStatus, StatsType},
    error::SizeError,
    logger::{DefaultLogger, Severity, StatsLogger},
    ppdu::PrintMode,
};
