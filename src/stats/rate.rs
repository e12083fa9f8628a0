// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Tx and rx rate-info decoders.
//!
//! The v1 and v2 payload layouts differ only in the number of bandwidth
//! buckets, so each version populates a common view struct and one formatter
//! renders either.

use {
    super::{counts, view},
    crate::logger::StatsLogger,
    std::fmt::Write,
    zerocopy::{FromBytes, Unaligned},
};

const BW_LABELS: [&str; 4] = ["20MHz", "40MHz", "80MHz", "160MHz"];

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct TxRateInfo {
    pub mcs: [u32; 10],
    pub sgi: [u32; 10],
    pub nss: [u32; 3],
    pub stbc: [u32; 10],
    pub bw: [u32; 3],
    pub pream: [u32; 4],
    pub ldpc: u32,
    pub rts_cnt: u32,
    pub ack_rssi: u32,
}

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct TxRateInfoV2 {
    pub mcs: [u32; 10],
    pub sgi: [u32; 10],
    pub nss: [u32; 3],
    pub stbc: [u32; 10],
    pub bw: [u32; 4],
    pub pream: [u32; 4],
    pub ldpc: u32,
    pub rts_cnt: u32,
    pub ack_rssi: u32,
}

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct RxRateInfo {
    pub mcs: [u32; 10],
    pub sgi: [u32; 10],
    pub nss: [u32; 4],
    pub nsts: u32,
    pub stbc: [u32; 10],
    pub bw: [u32; 3],
    pub pream: [u32; 6],
    pub ldpc: u32,
    pub txbf: u32,
    pub data_rssi: u32,
    pub mgmt_rssi: u32,
    pub rssi_chain0: u32,
    pub rssi_chain1: u32,
    pub rssi_chain2: u32,
}

#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct RxRateInfoV2 {
    pub mcs: [u32; 10],
    pub sgi: [u32; 10],
    pub nss: [u32; 4],
    pub nsts: u32,
    pub stbc: [u32; 10],
    pub bw: [u32; 4],
    pub pream: [u32; 6],
    pub ldpc: u32,
    pub txbf: u32,
    pub data_rssi: u32,
    pub mgmt_rssi: u32,
    pub rssi_chain0: u32,
    pub rssi_chain1: u32,
    pub rssi_chain2: u32,
}

/// The field set shared by both tx layouts, copied out of either.
struct TxRateFields {
    mcs: [u32; 10],
    sgi: [u32; 10],
    nss: [u32; 3],
    stbc: [u32; 10],
    bw: [u32; 4],
    bw_buckets: usize,
    pream: [u32; 4],
    ldpc: u32,
    rts_cnt: u32,
    ack_rssi: u32,
}

/// The field set shared by both rx layouts, copied out of either.
struct RxRateFields {
    mcs: [u32; 10],
    sgi: [u32; 10],
    nss: [u32; 4],
    nsts: u32,
    stbc: [u32; 10],
    bw: [u32; 4],
    bw_buckets: usize,
    pream: [u32; 6],
    ldpc: u32,
    txbf: u32,
    data_rssi: u32,
    mgmt_rssi: u32,
    rssi_chains: [u32; 3],
}

fn widen(bw: &[u32]) -> [u32; 4] {
    let mut out = [0; 4];
    out[..bw.len()].copy_from_slice(bw);
    out
}

impl From<&TxRateInfo> for TxRateFields {
    fn from(info: &TxRateInfo) -> Self {
        TxRateFields {
            mcs: info.mcs,
            sgi: info.sgi,
            nss: info.nss,
            stbc: info.stbc,
            bw: widen(&{ info.bw }),
            bw_buckets: 3,
            pream: info.pream,
            ldpc: info.ldpc,
            rts_cnt: info.rts_cnt,
            ack_rssi: info.ack_rssi,
        }
    }
}

impl From<&TxRateInfoV2> for TxRateFields {
    fn from(info: &TxRateInfoV2) -> Self {
        TxRateFields {
            mcs: info.mcs,
            sgi: info.sgi,
            nss: info.nss,
            stbc: info.stbc,
            bw: info.bw,
            bw_buckets: 4,
            pream: info.pream,
            ldpc: info.ldpc,
            rts_cnt: info.rts_cnt,
            ack_rssi: info.ack_rssi,
        }
    }
}

impl From<&RxRateInfo> for RxRateFields {
    fn from(info: &RxRateInfo) -> Self {
        RxRateFields {
            mcs: info.mcs,
            sgi: info.sgi,
            nss: info.nss,
            nsts: info.nsts,
            stbc: info.stbc,
            bw: widen(&{ info.bw }),
            bw_buckets: 3,
            pream: info.pream,
            ldpc: info.ldpc,
            txbf: info.txbf,
            data_rssi: info.data_rssi,
            mgmt_rssi: info.mgmt_rssi,
            rssi_chains: [info.rssi_chain0, info.rssi_chain1, info.rssi_chain2],
        }
    }
}

impl From<&RxRateInfoV2> for RxRateFields {
    fn from(info: &RxRateInfoV2) -> Self {
        RxRateFields {
            mcs: info.mcs,
            sgi: info.sgi,
            nss: info.nss,
            nsts: info.nsts,
            stbc: info.stbc,
            bw: info.bw,
            bw_buckets: 4,
            pream: info.pream,
            ldpc: info.ldpc,
            txbf: info.txbf,
            data_rssi: info.data_rssi,
            mgmt_rssi: info.mgmt_rssi,
            rssi_chains: [info.rssi_chain0, info.rssi_chain1, info.rssi_chain2],
        }
    }
}

fn bw_counts(bw: &[u32]) -> String {
    let mut out = String::new();
    for (i, (count, label)) in bw.iter().zip(BW_LABELS.iter()).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {}", label, count);
    }
    out
}

fn log_tx_rate(fields: &TxRateFields, logger: &mut dyn StatsLogger) {
    logger.debug(format_args!("TX Rate Info:"));
    logger.debug(format_args!("MCS counts (0..9): {}", counts(&fields.mcs)));
    logger.debug(format_args!("SGI counts (0..9): {}", counts(&fields.sgi)));
    logger.debug(format_args!(
        "NSS counts: 1x1 {}, 2x2 {}, 3x3 {}",
        fields.nss[0], fields.nss[1], fields.nss[2]
    ));
    logger.debug(format_args!("BW counts: {}", bw_counts(&fields.bw[..fields.bw_buckets])));
    logger.debug(format_args!(
        "Preamble (O C H V) counts: {}",
        counts(&fields.pream)
    ));
    logger.debug(format_args!("STBC rate counts (0..9): {}", counts(&fields.stbc)));
    logger.debug(format_args!("LDPC Counts: {}", fields.ldpc));
    logger.debug(format_args!("RTS Counts: {}", fields.rts_cnt));
    logger.debug(format_args!("Ack RSSI: {}", fields.ack_rssi));
}

fn log_rx_rate(fields: &RxRateFields, logger: &mut dyn StatsLogger) {
    logger.debug(format_args!("RX Rate Info:"));
    logger.debug(format_args!("MCS counts (0..9): {}", counts(&fields.mcs)));
    logger.debug(format_args!("SGI counts (0..9): {}", counts(&fields.sgi)));
    // nss[0] only counts non-STBC 1x1 frames; frames sent with STBC are
    // tallied in nsts, so the 1x1 column reports their sum.
    logger.debug(format_args!(
        "NSS counts: 1x1 {}, 2x2 {}, 3x3 {}, 4x4 {}",
        fields.nss[0].wrapping_add(fields.nsts),
        fields.nss[1],
        fields.nss[2],
        fields.nss[3]
    ));
    logger.debug(format_args!("NSTS count: {}", fields.nsts));
    logger.debug(format_args!("BW counts: {}", bw_counts(&fields.bw[..fields.bw_buckets])));
    logger.debug(format_args!("Preamble counts: {}", counts(&fields.pream)));
    logger.debug(format_args!("STBC rate counts (0..9): {}", counts(&fields.stbc)));
    logger.debug(format_args!("LDPC TXBF Counts: {}, {}", fields.ldpc, fields.txbf));
    logger.debug(format_args!(
        "RSSI (data, mgmt): {}, {}",
        fields.data_rssi, fields.mgmt_rssi
    ));
    for (chain, rssi) in fields.rssi_chains.iter().enumerate() {
        logger.debug(format_args!(
            "RSSI Chain {} (0x{:02x} 0x{:02x} 0x{:02x} 0x{:02x})",
            chain,
            rssi >> 24 & 0xff,
            rssi >> 16 & 0xff,
            rssi >> 8 & 0xff,
            rssi & 0xff
        ));
    }
}

pub fn decode_tx(payload: &[u8], logger: &mut dyn StatsLogger) {
    if let Some(info) = view::<TxRateInfo>(payload, "tx rate info", logger) {
        log_tx_rate(&TxRateFields::from(&*info), logger);
    }
}

pub fn decode_tx_v2(payload: &[u8], logger: &mut dyn StatsLogger) {
    if let Some(info) = view::<TxRateInfoV2>(payload, "tx rate info v2", logger) {
        log_tx_rate(&TxRateFields::from(&*info), logger);
    }
}

pub fn decode_rx(payload: &[u8], logger: &mut dyn StatsLogger) {
    if let Some(info) = view::<RxRateInfo>(payload, "rx rate info", logger) {
        log_rx_rate(&RxRateFields::from(&*info), logger);
    }
}

pub fn decode_rx_v2(payload: &[u8], logger: &mut dyn StatsLogger) {
    if let Some(info) = view::<RxRateInfoV2>(payload, "rx rate info v2", logger) {
        log_rx_rate(&RxRateFields::from(&*info), logger);
    }
}
