// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Transmit-beamforming statistics: per-rate data counts, sounding counts
//! and MU/SU NDPA packet counts.

use {
    super::{counts, view},
    crate::logger::StatsLogger,
    zerocopy::{FromBytes, Unaligned},
};

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct TxbfDataStats {
    pub tx_txbf_vht: [u32; 10],
    pub rx_txbf_vht: [u32; 10],
    pub tx_txbf_ht: [u32; 8],
    pub tx_txbf_ofdm: [u32; 8],
    pub tx_txbf_cck: [u32; 7],
}

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct TxbfSndStats {
    pub cbf_20: [u32; 4],
    pub cbf_40: [u32; 4],
    pub cbf_80: [u32; 4],
    pub sounding: [u32; 9],
}

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct MusuNdpaStats {
    pub number_mu_pkts: u32,
    pub number_su_pkts: u32,
    pub txbf_directed_ndpa_count: u32,
    pub txbf_ndpa_retry_count: u32,
    pub txbf_total_ndpa_count: u32,
}

pub fn decode_data(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<TxbfDataStats>(payload, "TXBF data stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    logger.debug(format_args!("TXBF data Statistics:"));
    logger.debug(format_args!("tx_txbf_vht (0..9): {}", counts(&{ stats.tx_txbf_vht })));
    logger.debug(format_args!("rx_txbf_vht (0..9): {}", counts(&{ stats.rx_txbf_vht })));
    logger.debug(format_args!("tx_txbf_ht (0..7): {}", counts(&{ stats.tx_txbf_ht })));
    logger.debug(format_args!("tx_txbf_ofdm (0..7): {}", counts(&{ stats.tx_txbf_ofdm })));
    logger.debug(format_args!("tx_txbf_cck (0..6): {}", counts(&{ stats.tx_txbf_cck })));
}

pub fn decode_snd(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<TxbfSndStats>(payload, "TXBF sounding stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    logger.debug(format_args!("TXBF snd Buffer Statistics:"));
    logger.debug(format_args!("cbf_20: {}", counts(&{ stats.cbf_20 })));
    logger.debug(format_args!("cbf_40: {}", counts(&{ stats.cbf_40 })));
    logger.debug(format_args!("cbf_80: {}", counts(&{ stats.cbf_80 })));
    logger.debug(format_args!("sounding: {}", counts(&{ stats.sounding })));
}

pub fn decode_musu_ndpa(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<MusuNdpaStats>(payload, "TXBF MU/SU NDPA stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    logger.debug(format_args!("Rx TXBF MU/SU Packets and NDPA Statistics:"));
    logger.debug(format_args!(
        "  {} Number of TXBF MU packets received",
        { stats.number_mu_pkts }
    ));
    logger.debug(format_args!(
        "  {} Number of TXBF SU packets received",
        { stats.number_su_pkts }
    ));
    logger.debug(format_args!(
        "  {} Number of TXBF directed NDPA",
        { stats.txbf_directed_ndpa_count }
    ));
    logger.debug(format_args!(
        "  {} Number of TXBF retried NDPA",
        { stats.txbf_ndpa_retry_count }
    ));
    logger.debug(format_args!(
        "  {} Total number of TXBF NDPA",
        { stats.txbf_total_ndpa_count }
    ));
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::{words, BufferedLogger},
        std::mem::size_of,
    };

    #[test]
    fn data_stats_render_each_rate_table() {
        let payload = words(&(0..(size_of::<TxbfDataStats>() / 4) as u32).collect::<Vec<u32>>());
        let mut logger = BufferedLogger::new();
        decode_data(&payload, &mut logger);
        assert_eq!(logger.entries.len(), 6);
        assert_eq!(logger.lines()[1], "tx_txbf_vht (0..9): 0, 1, 2, 3, 4, 5, 6, 7, 8, 9");
        assert_eq!(logger.lines()[5], "tx_txbf_cck (0..6): 36, 37, 38, 39, 40, 41, 42");
    }

    #[test]
    fn snd_stats_render_each_bucket() {
        let payload = words(&(0..(size_of::<TxbfSndStats>() / 4) as u32).collect::<Vec<u32>>());
        let mut logger = BufferedLogger::new();
        decode_snd(&payload, &mut logger);
        assert_eq!(logger.entries.len(), 5);
        assert_eq!(logger.lines()[3], "cbf_80: 8, 9, 10, 11");
        assert_eq!(logger.lines()[4], "sounding: 12, 13, 14, 15, 16, 17, 18, 19, 20");
    }

    #[test]
    fn musu_ndpa_stats_render_each_count() {
        let payload = words(&[1, 2, 3, 4, 5]);
        let mut logger = BufferedLogger::new();
        decode_musu_ndpa(&payload, &mut logger);
        assert_eq!(logger.entries.len(), 6);
        assert_eq!(logger.lines()[1], "  1 Number of TXBF MU packets received");
        assert_eq!(logger.lines()[5], "  5 Total number of TXBF NDPA");
    }

    #[test]
    fn short_payloads_are_one_error() {
        for decode in
            &[decode_data as fn(&[u8], &mut dyn StatsLogger), decode_snd, decode_musu_ndpa]
        {
            let mut logger = BufferedLogger::new();
            decode(&[], &mut logger);
            assert_eq!(logger.entries.len(), 1);
            assert!(logger.errors()[0].contains("payload too short"));
        }
    }
}
