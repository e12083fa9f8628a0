// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{endian::WordSwap, logger::StatsLogger},
    std::fmt::Write,
};

// One 32-bit queue status word, then three arrays of 16-bit queue depths.
// The halfword fields sit in swap-sensitive word storage, so each one goes
// through the halfword reader rather than a direct struct view.
const NUM_PKTS_QUEUED: usize = 10;
const TID_DEPTH: usize = 20;
const STATUS_SIZE: usize = 4;
const PAYLOAD_SIZE: usize = STATUS_SIZE + (NUM_PKTS_QUEUED + 2 * TID_DEPTH) * 2;

pub fn decode(payload: &[u8], swap: WordSwap, logger: &mut dyn StatsLogger) {
    if payload.len() < PAYLOAD_SIZE {
        logger.error(format_args!("TID queue stats payload too short: {} bytes", payload.len()));
        return;
    }
    let status = u32::from_ne_bytes([payload[0], payload[1], payload[2], payload[3]]);
    // In bounds after the length check above; a remapped read stays within
    // its own 32-bit word.
    let halfword = |index: usize| swap.read_u16(payload, STATUS_SIZE + index * 2).unwrap_or(0);
    let row = |start: usize, len: usize| {
        let mut out = String::new();
        for i in 0..len {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", halfword(start + i));
        }
        out
    };

    logger.debug(format_args!("TID QUEUE STATS:"));
    logger.debug(format_args!("tid_txq_stats: {}", status));
    logger.debug(format_args!("num_pkts_queued(0..9):"));
    logger.debug(format_args!("{}", row(0, NUM_PKTS_QUEUED)));
    logger.debug(format_args!("tid_hw_qdepth(0..19):"));
    logger.debug(format_args!("{}", row(NUM_PKTS_QUEUED, 10)));
    logger.debug(format_args!("{}", row(NUM_PKTS_QUEUED + 10, 10)));
    logger.debug(format_args!("tid_sw_qdepth(0..19):"));
    logger.debug(format_args!("{}", row(NUM_PKTS_QUEUED + TID_DEPTH, 10)));
    logger.debug(format_args!("{}", row(NUM_PKTS_QUEUED + TID_DEPTH + 10, 10)));
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::BufferedLogger,
    };

    fn payload(status: u32, depths: impl Iterator<Item = u16>) -> Vec<u8> {
        let mut out = status.to_ne_bytes().to_vec();
        for depth in depths {
            out.extend_from_slice(&depth.to_ne_bytes());
        }
        out
    }

    #[test]
    fn renders_status_and_depth_rows() {
        let bytes = payload(9, 0..50);
        assert_eq!(bytes.len(), PAYLOAD_SIZE);
        let mut logger = BufferedLogger::new();
        decode(&bytes, WordSwap::None, &mut logger);
        let lines = logger.lines();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "tid_txq_stats: 9");
        assert_eq!(lines[3], "0, 1, 2, 3, 4, 5, 6, 7, 8, 9");
        assert_eq!(lines[5], "10, 11, 12, 13, 14, 15, 16, 17, 18, 19");
        assert_eq!(lines[6], "20, 21, 22, 23, 24, 25, 26, 27, 28, 29");
        assert_eq!(lines[8], "30, 31, 32, 33, 34, 35, 36, 37, 38, 39");
        assert_eq!(lines[9], "40, 41, 42, 43, 44, 45, 46, 47, 48, 49");
    }

    #[test]
    fn word_swapped_storage_reads_the_same() {
        let plain = payload(9, 0..50);
        // Trade the halfword pairs within each 32-bit word past the status
        // word, the way word-swapped transport storage lays them out.
        let mut swapped = plain.clone();
        for word in swapped[STATUS_SIZE..].chunks_exact_mut(4) {
            word.rotate_left(2);
        }
        let mut logger_plain = BufferedLogger::new();
        decode(&plain, WordSwap::None, &mut logger_plain);
        let mut logger_swapped = BufferedLogger::new();
        decode(&swapped, WordSwap::PerWord, &mut logger_swapped);
        assert_eq!(logger_plain.entries, logger_swapped.entries);
    }

    #[test]
    fn short_payload_is_one_error() {
        let mut logger = BufferedLogger::new();
        decode(&payload(0, 0..49), WordSwap::None, &mut logger);
        assert_eq!(logger.entries.len(), 1);
        assert!(logger.errors()[0].contains("TID queue stats"));
    }
}
