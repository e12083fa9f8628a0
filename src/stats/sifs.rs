// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::view,
    crate::logger::StatsLogger,
    zerocopy::{FromBytes, Unaligned},
};

/// SIFS-response timing counters. The two-element arrays split queue-bank 0
/// and 1 triggers.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct SifsRespStats {
    pub ps_poll_trigger: u32,
    pub uapsd_trigger: u32,
    pub qb_data_trigger: [u32; 2],
    pub qb_bar_trigger: [u32; 2],
    pub sifs_resp_data: u32,
    pub sifs_resp_err: u32,
}

pub fn decode(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<SifsRespStats>(payload, "SIFS response stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    logger.debug(format_args!("SIFS RESP STATS:"));
    logger.debug(format_args!(
        "num of ps-poll trigger frames: {}",
        { stats.ps_poll_trigger }
    ));
    logger.debug(format_args!("num of uapsd trigger frames: {}", { stats.uapsd_trigger }));
    logger.debug(format_args!(
        "num of data trigger frames: {}, {}",
        { stats.qb_data_trigger }[0],
        { stats.qb_data_trigger }[1]
    ));
    logger.debug(format_args!(
        "num of bar trigger frames: {}, {}",
        { stats.qb_bar_trigger }[0],
        { stats.qb_bar_trigger }[1]
    ));
    logger.debug(format_args!(
        "num of ppdu transmitted at SIFS interval: {}",
        { stats.sifs_resp_data }
    ));
    logger.debug(format_args!(
        "num of ppdu failed to meet SIFS resp timing: {}",
        { stats.sifs_resp_err }
    ));
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::{words, BufferedLogger},
    };

    #[test]
    fn renders_each_counter() {
        let payload = words(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut logger = BufferedLogger::new();
        decode(&payload, &mut logger);
        assert_eq!(logger.entries.len(), 7);
        assert_eq!(logger.lines()[3], "num of data trigger frames: 3, 4");
        assert_eq!(logger.lines()[6], "num of ppdu failed to meet SIFS resp timing: 8");
    }

    #[test]
    fn short_payload_is_one_error() {
        let mut logger = BufferedLogger::new();
        decode(&words(&[0; 7]), &mut logger);
        assert_eq!(logger.entries.len(), 1);
        assert!(logger.errors()[0].contains("SIFS response stats"));
    }
}
