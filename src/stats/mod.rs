// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Fixed-size per-type statistics decoders. Each payload is a flat counter
//! struct; decoding is one length check followed by field-to-text mapping.

pub mod mu;
pub mod pdev;
pub mod rate;
pub mod remote_buf;
pub mod rx_reorder;
pub mod sched_err;
pub mod selfgen;
pub mod sifs;
pub mod tidq;
pub mod txbf;

use {
    crate::logger::StatsLogger,
    std::fmt::Write,
    zerocopy::{FromBytes, LayoutVerified, Unaligned},
};

/// Obtains a typed view over the payload prefix, or emits one error entry
/// and bails if the firmware sent fewer bytes than the struct needs.
pub(crate) fn view<'a, T: FromBytes + Unaligned>(
    payload: &'a [u8],
    what: &str,
    logger: &mut dyn StatsLogger,
) -> Option<LayoutVerified<&'a [u8], T>> {
    match LayoutVerified::new_unaligned_from_prefix(payload) {
        Some((parsed, _)) => Some(parsed),
        None => {
            logger.error(format_args!("{} payload too short: {} bytes", what, payload.len()));
            None
        }
    }
}

/// Formats counters as a comma-separated run: `"1, 2, 3"`.
pub(crate) fn counts(values: &[u32]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", value);
    }
    out
}
