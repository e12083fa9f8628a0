// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::view,
    crate::logger::StatsLogger,
    zerocopy::{FromBytes, Unaligned},
};

/// Remote rx buffer management counters.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct RxRemoteBufStats {
    pub counters: [u32; LABELS.len()],
}

const LABELS: [&str; 13] = [
    "MSDU's reaped for Rx processing",
    "MSDU's recycled within firmware",
    "MSDU's stored by Data Rx",
    "HTT indications from WAL Rx MSDU",
    "HTT indications unconsumed from WAL Rx MSDU",
    "HTT indications from Data Rx MSDU",
    "HTT indications unconsumed from Data Rx MSDU",
    "HTT indications from ATHBUF",
    "Remote buffers requested for refill",
    "Remote buffers filled by host",
    "times MAC has no buffers",
    "times f/w write & read indices on MAC ring are equal",
    "times f/w has no remote buffers to post to MAC",
];

pub fn decode(payload: &[u8], logger: &mut dyn StatsLogger) {
    let stats = match view::<RxRemoteBufStats>(payload, "rx remote buffer stats", logger) {
        Some(stats) => stats,
        None => return,
    };
    let counters = stats.counters;
    logger.debug(format_args!("Rx Remote Buffer Statistics:"));
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
        let payload = words(&(1..=13).collect::<Vec<u32>>());
        let mut logger = BufferedLogger::new();
        decode(&payload, &mut logger);
        assert_eq!(logger.entries.len(), 1 + LABELS.len());
        assert_eq!(logger.lines()[1], "  1 MSDU's reaped for Rx processing");
        assert_eq!(logger.lines()[13], "  13 times f/w has no remote buffers to post to MAC");
    }

    #[test]
    fn short_payload_is_one_error() {
        let mut logger = BufferedLogger::new();
        decode(&words(&[0; 12]), &mut logger);
        assert_eq!(logger.entries.len(), 1);
        assert!(logger.errors()[0].contains("rx remote buffer stats"));
    }
}
