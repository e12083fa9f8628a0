// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::view,
    crate::logger::StatsLogger,
    zerocopy::{FromBytes, Unaligned},
};

/// Self-generated frame counters. Uniform `"<count> <name>"` lines, so the
/// payload stays an array paired with a label table.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct TxSelfgenStats {
    pub counters: [u32; LABELS.len()],
}

const LABELS: [&str; 14] = [
    "su_ndpa",
    "su_ndp",
    "mu_ndpa",
    "mu_ndp",
    "mu_brpoll_1",
    "mu_brpoll_2",
    "mu_bar_1",
    "mu_bar_2",
    "cts_burst",
    "su_ndpa_err",
    "su_ndp_err",
    "mu_ndp_err",
    "mu_brp1_err",
    "mu_brp2_err",
];

pub fn decode(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<TxSelfgenStats>(payload, "tx selfgen stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    let counters = stats.counters;
    logger.debug(format_args!("Tx selfgen Buffer Statistics:"));
    for (count, label) in counters.iter().zip(LABELS.iter()) {
        logger.debug(format_args!("  {} {}", count, label));
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::{words, BufferedLogger},
    };

    #[test]
    fn one_line_per_counter() {
        let payload = words(&(100..114).collect::<Vec<u32>>());
        let mut logger = BufferedLogger::new();
        decode(&payload, &mut logger);
        assert_eq!(logger.entries.len(), 1 + LABELS.len());
        assert_eq!(logger.lines()[1], "  100 su_ndpa");
        assert_eq!(logger.lines()[14], "  113 mu_brp2_err");
    }

    #[test]
    fn short_payload_is_one_error() {
        let mut logger = BufferedLogger::new();
        decode(&words(&[0; 13]), &mut logger);
        assert_eq!(logger.entries.len(), 1);
        assert!(logger.errors()[0].contains("tx selfgen stats"));
    }
}
