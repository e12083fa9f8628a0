// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{counts, view},
    crate::logger::StatsLogger,
    zerocopy::{FromBytes, Unaligned},
};

const FLUSH_REASONS: usize = 40;
const CMD_RESULTS: usize = 8;
const SIFS_STATUSES: usize = 8;
const PHY_ERRS: usize = 18;

/// Scheduler error counters.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct SchedErrorStats {
    pub urrn_stats: [u32; 3],
    pub flush_errs: [u32; FLUSH_REASONS],
    pub schd_stall_errs: [u32; 4],
    pub schd_cmd_result: [u32; CMD_RESULTS],
    pub sifs_status: [u32; SIFS_STATUSES],
    pub phy_errs: [u32; PHY_ERRS],
    pub rx_rate_inval: u32,
}

pub fn decode(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<SchedErrorStats>(payload, "scheduler error stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    logger.debug(format_args!("Scheduler error Statistics:"));
    logger.debug(format_args!("urrn_stats: {}", counts(&{ stats.urrn_stats })));
    logger.debug(format_args!(
        "flush_errs (0..{}): {}",
        FLUSH_REASONS - 1,
        counts(&{ stats.flush_errs })
    ));
    logger.debug(format_args!("schd_stall_errs (0..3): {}", counts(&{ stats.schd_stall_errs })));
    logger.debug(format_args!(
        "schd_cmd_result (0..{}): {}",
        CMD_RESULTS - 1,
        counts(&{ stats.schd_cmd_result })
    ));
    logger.debug(format_args!(
        "sifs_status (0..{}): {}",
        SIFS_STATUSES - 1,
        counts(&{ stats.sifs_status })
    ));
    logger.debug(format_args!(
        "phy_errs (0..{}): {}",
        PHY_ERRS - 1,
        counts(&{ stats.phy_errs })
    ));
    logger.debug(format_args!("  {} rx_rate_inval", { stats.rx_rate_inval }));
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::{words, BufferedLogger},
        std::mem::size_of,
    };

    #[test]
    fn renders_every_table() {
        let len = size_of::<SchedErrorStats>() / 4;
        let payload = words(&(0..len as u32).collect::<Vec<u32>>());
        let mut logger = BufferedLogger::new();
        decode(&payload, &mut logger);
        assert_eq!(logger.entries.len(), 8);
        assert_eq!(logger.lines()[1], "urrn_stats: 0, 1, 2");
        assert!(logger.lines()[2].starts_with("flush_errs (0..39): 3, 4,"));
        assert_eq!(logger.lines()[3], "schd_stall_errs (0..3): 43, 44, 45, 46");
        assert_eq!(logger.lines()[7], format!("  {} rx_rate_inval", len - 1));
    }

    #[test]
    fn short_payload_is_one_error() {
        let mut logger = BufferedLogger::new();
        decode(&[0; 16], &mut logger);
        assert_eq!(logger.entries.len(), 1);
        assert!(logger.errors()[0].contains("scheduler error stats"));
    }
}
