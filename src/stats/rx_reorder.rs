// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::view,
    crate::logger::StatsLogger,
    static_assertions::const_assert_eq,
    zerocopy::{FromBytes, Unaligned},
};

/// Rx reorder counters: one 32-bit count per event class, in upload order.
/// Every line has the same `"<count> <description>"` shape, so the counters
/// stay an array paired with a label table instead of 53 named fields.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct RxReorderStats {
    pub counters: [u32; LABELS.len()],
}

const LABELS: [&str; 53] = [
    "non-QoS frames received",
    "frames received in-order",
    "frames flushed due to timeout",
    "frames flushed due to moving out of window",
    "frames flushed due to receiving DELBA",
    "frames discarded due to FCS error",
    "frames discarded due to invalid peer",
    "frames discarded due to duplication (non aggregation)",
    "frames discarded due to duplication in reorder queue",
    "frames discarded due to processed before",
    "times reorder timeout happened",
    "times incorrect bar received",
    "times bar ssn reset happened",
    "times flushed due to peer delete",
    "times flushed due to offload",
    "times flushed due to out of buffer",
    "MPDU's dropped due to PN check fail",
    "MPDU's dropped due to lack of memory",
    "times tid pool alloc succeeded",
    "times MPDU pool alloc succeeded",
    "times MSDU pool alloc succeeded",
    "times tid pool alloc failed",
    "times MPDU pool alloc failed",
    "times MSDU pool alloc failed",
    "times tid pool freed",
    "times MPDU pool freed",
    "times MSDU pool freed",
    "MSDUs undelivered to HTT, queued to Rx MSDU free list",
    "MSDUs released from Rx MSDU list to MAC ring",
    "MPDUs with invalid peer but A2 found in AST",
    "MPDUs with invalid peer but A3 found in AST",
    "MPDUs with invalid peer, Broadcast or Multicast frame",
    "MSDUs with err attention word",
    "MSDUs with flag of peer_idx_invalid",
    "MSDUs with flag of peer_idx_timeout",
    "MSDUs with flag of overflow",
    "MSDUs with flag of msdu_length_err",
    "MSDUs with flag of mpdu_length_err",
    "MSDUs with flag of tkip_mic_err",
    "MSDUs with flag of decrypt_err",
    "MSDUs with flag of fcs_err",
    "Unicast frames with invalid peer handler",
    "unicast frame to DUT with invalid peer handler",
    "Broadcast/Multicast frames with invalid peer handler",
    "MSDUs dropped due to no first MSDU flag",
    "MSDUs dropped due to ring overflow",
    "MSDUs dropped due to FC mismatch",
    "MSDUs dropped due to mgt frame in Remote ring",
    "MSDUs dropped due to misc non error",
    "MSDUs go to offload before reorder",
    "data frame dropped by offload after reorder",
    "MPDUs with SN in the past & within BA window",
    "MPDUs with SN in the past & outside BA window",
];

const_assert_eq!(std::mem::size_of::<RxReorderStats>(), 53 * 4);

pub fn decode(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<RxReorderStats>(payload, "rx reorder stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    let counters = stats.counters;
    logger.debug(format_args!("Rx reorder statistics:"));
    for (count, label) in counters.iter().zip(LABELS.iter()) {
        logger.debug(format_args!("  {} {}", count, label));
    }
}
