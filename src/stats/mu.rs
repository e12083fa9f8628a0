// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{counts, view},
    crate::logger::StatsLogger,
    zerocopy::{FromBytes, Unaligned},
};

/// Tx MU-MIMO counters: per-user arrays cover scheduler user slots 0..3.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct TxMuStats {
    pub mu_sch_nusers_2: u32,
    pub mu_sch_nusers_3: u32,
    pub mu_mpdus_queued_usr: [u32; 4],
    pub mu_mpdus_tried_usr: [u32; 4],
    pub mu_mpdus_failed_usr: [u32; 4],
    pub mu_mpdus_requeued_usr: [u32; 4],
    pub mu_err_no_ba_usr: [u32; 4],
    pub mu_mpdu_underrun_usr: [u32; 4],
    pub mu_ampdu_underrun_usr: [u32; 4],
}

pub fn decode(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<TxMuStats>(payload, "tx MU stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    logger.debug(format_args!("TX MU STATS:"));
    logger.debug(format_args!("mu_sch_nusers_2: {}", { stats.mu_sch_nusers_2 }));
    logger.debug(format_args!("mu_sch_nusers_3: {}", { stats.mu_sch_nusers_3 }));
    logger.debug(format_args!("mu_mpdus_queued_usr: {}", counts(&{ stats.mu_mpdus_queued_usr })));
    logger.debug(format_args!("mu_mpdus_tried_usr: {}", counts(&{ stats.mu_mpdus_tried_usr })));
    logger.debug(format_args!("mu_mpdus_failed_usr: {}", counts(&{ stats.mu_mpdus_failed_usr })));
    logger.debug(format_args!(
        "mu_mpdus_requeued_usr: {}",
        counts(&{ stats.mu_mpdus_requeued_usr })
    ));
    logger.debug(format_args!("mu_err_no_ba_usr: {}", counts(&{ stats.mu_err_no_ba_usr })));
    logger.debug(format_args!(
        "mu_mpdu_underrun_usr: {}",
        counts(&{ stats.mu_mpdu_underrun_usr })
    ));
    logger.debug(format_args!(
        "mu_ampdu_underrun_usr: {}",
        counts(&{ stats.mu_ampdu_underrun_usr })
    ));
}
