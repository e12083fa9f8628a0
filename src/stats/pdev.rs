// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::view,
    crate::logger::StatsLogger,
    zerocopy::{FromBytes, Unaligned},
};

/// WAL pdev tx counters, in upload order.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct PdevTxStats {
    pub comp_queued: u32,
    pub comp_delivered: u32,
    pub msdu_enqued: u32,
    pub mpdu_enqued: u32,
    pub wmm_drop: u32,
    pub local_enqued: u32,
    pub local_freed: u32,
    pub hw_queued: u32,
    pub hw_reaped: u32,
    pub underrun: u32,
    pub phy_underrun: u32,
    pub tx_abort: u32,
    pub mpdus_requed: u32,
    pub tx_ko: u32,
    pub data_rc: u32,
    pub self_triggers: u32,
    pub sw_retry_failure: u32,
    pub illgl_rate_phy_err: u32,
    pub pdev_cont_xretry: u32,
    pub pdev_tx_timeout: u32,
    pub pdev_resets: u32,
    pub txop_ovf: u32,
}

/// WAL pdev rx counters, in upload order.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct PdevRxStats {
    pub mid_ppdu_route_change: u32,
    pub status_rcvd: u32,
    pub r0_frags: u32,
    pub r1_frags: u32,
    pub r2_frags: u32,
    pub r3_frags: u32,
    pub htt_msdus: u32,
    pub htt_mpdus: u32,
    pub loc_msdus: u32,
    pub loc_mpdus: u32,
    pub oversize_amsdu: u32,
    pub phy_errs: u32,
    pub phy_err_drop: u32,
    pub mpdu_errs: u32,
}

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct PdevStats {
    pub tx: PdevTxStats,
    pub rx: PdevRxStats,
}

pub fn decode(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<PdevStats>(payload, "WAL pdev stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    let tx = stats.tx;
    let rx = stats.rx;

    logger.debug(format_args!("WAL Pdev stats:"));
    logger.debug(format_args!("### Tx ###"));
    logger.debug(format_args!("comp_queued       : {}", { tx.comp_queued }));
    logger.debug(format_args!("comp_delivered    : {}", { tx.comp_delivered }));
    logger.debug(format_args!("msdu_enqued       : {}", { tx.msdu_enqued }));
    logger.debug(format_args!("mpdu_enqued       : {}", { tx.mpdu_enqued }));
    logger.debug(format_args!("wmm_drop          : {}", { tx.wmm_drop }));
    logger.debug(format_args!("local_enqued      : {}", { tx.local_enqued }));
    logger.debug(format_args!("local_freed       : {}", { tx.local_freed }));
    logger.debug(format_args!("hw_queued         : {}", { tx.hw_queued }));
    logger.debug(format_args!("hw_reaped         : {}", { tx.hw_reaped }));
    logger.debug(format_args!("mac underrun      : {}", { tx.underrun }));
    logger.debug(format_args!("phy underrun      : {}", { tx.phy_underrun }));
    logger.debug(format_args!("tx_abort          : {}", { tx.tx_abort }));
    logger.debug(format_args!("mpdus_requed      : {}", { tx.mpdus_requed }));
    logger.debug(format_args!("excess retries    : {}", { tx.tx_ko }));
    logger.debug(format_args!("last rc           : {}", { tx.data_rc }));
    logger.debug(format_args!("sched self trig   : {}", { tx.self_triggers }));
    logger.debug(format_args!("ampdu retry failed: {}", { tx.sw_retry_failure }));
    logger.debug(format_args!("illegal rate errs : {}", { tx.illgl_rate_phy_err }));
    logger.debug(format_args!("pdev cont xretry  : {}", { tx.pdev_cont_xretry }));
    logger.debug(format_args!("pdev tx timeout   : {}", { tx.pdev_tx_timeout }));
    logger.debug(format_args!("pdev resets       : {}", { tx.pdev_resets }));
    logger.debug(format_args!("ppdu txop ovf     : {}", { tx.txop_ovf }));

    logger.debug(format_args!("### Rx ###"));
    logger.debug(format_args!("ppdu_route_change : {}", { rx.mid_ppdu_route_change }));
    logger.debug(format_args!("status_rcvd       : {}", { rx.status_rcvd }));
    logger.debug(format_args!("r0_frags          : {}", { rx.r0_frags }));
    logger.debug(format_args!("r1_frags          : {}", { rx.r1_frags }));
    logger.debug(format_args!("r2_frags          : {}", { rx.r2_frags }));
    logger.debug(format_args!("r3_frags          : {}", { rx.r3_frags }));
    logger.debug(format_args!("htt_msdus         : {}", { rx.htt_msdus }));
    logger.debug(format_args!("htt_mpdus         : {}", { rx.htt_mpdus }));
    logger.debug(format_args!("loc_msdus         : {}", { rx.loc_msdus }));
    logger.debug(format_args!("loc_mpdus         : {}", { rx.loc_mpdus }));
    logger.debug(format_args!("oversize_amsdu    : {}", { rx.oversize_amsdu }));
    logger.debug(format_args!("phy_errs          : {}", { rx.phy_errs }));
    logger.debug(format_args!("phy_errs dropped  : {}", { rx.phy_err_drop }));
    logger.debug(format_args!("mpdu_errs         : {}", { rx.mpdu_errs }));
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::{words, BufferedLogger},
    };

    #[test]
    fn decodes_every_counter_line() {
        let payload = words(&(1..=36).collect::<Vec<u32>>());
        let mut logger = BufferedLogger::new();
        decode(&payload, &mut logger);
        // Two section banners plus 22 tx and 14 rx counter lines.
        assert_eq!(logger.entries.len(), 2 + 1 + 22 + 14);
        assert!(logger.contains("comp_queued       : 1"));
        assert!(logger.contains("ppdu txop ovf     : 22"));
        assert!(logger.contains("ppdu_route_change : 23"));
        assert!(logger.contains("mpdu_errs         : 36"));
    }

    #[test]
    fn short_payload_is_one_error() {
        let mut logger = BufferedLogger::new();
        decode(&words(&[0; 35]), &mut logger);
        assert_eq!(logger.errors().len(), 1);
        assert_eq!(logger.entries.len(), 1);
    }
}
