// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The statistics envelope: one leading 32-bit word carrying the type tag,
//! upload status and payload length, followed by a type-specific body.

use {
    crate::{
        buffer_reader::BufferReader,
        endian::WordSwap,
        fields::BitField,
        logger::StatsLogger,
        ppdu::{self, PrintMode},
        stats,
    },
    std::fmt,
    zerocopy::{FromBytes, Unaligned},
};

// The envelope word layout is part of the host-target transport ABI. Bits
// 15:8 carry a header-size field this decoder does not consume.
const ENVELOPE_TYPE: BitField = BitField::new("type", 0, 0, 5);
const ENVELOPE_STATUS: BitField = BitField::new("status", 0, 5, 3);
const ENVELOPE_LENGTH: BitField = BitField::new("length", 0, 16, 16);

/// Statistics type tag carried by the envelope. Values not listed here come
/// from newer firmware and are silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsType(pub u8);

impl StatsType {
    pub const WAL_PDEV_TXRX: Self = Self(0);
    pub const RX_REORDER: Self = Self(1);
    pub const RX_RATE_INFO: Self = Self(2);
    pub const TX_PPDU_LOG: Self = Self(3);
    pub const TX_RATE_INFO: Self = Self(4);
    pub const TIDQ: Self = Self(5);
    pub const TXBF_INFO: Self = Self(6);
    pub const SND_INFO: Self = Self(7);
    pub const ERROR_INFO: Self = Self(8);
    pub const TX_SELFGEN_INFO: Self = Self(9);
    pub const TX_MU_INFO: Self = Self(10);
    pub const SIFS_RESP_INFO: Self = Self(11);
    pub const RX_REMOTE_RING_BUFFER_INFO: Self = Self(12);
    pub const RX_RATE_INFO_V2: Self = Self(13);
    pub const TX_RATE_INFO_V2: Self = Self(14);
    pub const TXBF_MUSU_NDPA_PKT: Self = Self(15);
}

impl fmt::Display for StatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Firmware-reported status of one statistics upload. `SERIES_DONE`,
/// `INVALID` and `ERROR` are terminal for the blob: no payload decode is
/// attempted under them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsStatus(pub u8);

impl StatsStatus {
    pub const PRESENT: Self = Self(0);
    pub const PARTIAL: Self = Self(1);
    pub const ERROR: Self = Self(2);
    pub const INVALID: Self = Self(3);
    pub const SERIES_DONE: Self = Self(7);
}

/// The decoded leading word of a statistics blob. `length` counts the
/// payload bytes that follow the envelope word and is firmware-supplied,
/// never a trusted bound on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsEnvelope {
    pub stats_type: StatsType,
    pub status: StatsStatus,
    pub length: u32,
}

impl StatsEnvelope {
    pub fn parse(word: u32) -> Self {
        let words = [word];
        StatsEnvelope {
            stats_type: StatsType(ENVELOPE_TYPE.get(&words) as u8),
            status: StatsStatus(ENVELOPE_STATUS.get(&words) as u8),
            length: ENVELOPE_LENGTH.get(&words),
        }
    }
}

#[derive(FromBytes, Unaligned, Clone, Copy)]
#[repr(C, packed)]
struct RawEnvelope(u32);

impl RawEnvelope {
    fn word(&self) -> u32 {
        self.0
    }
}

/// Decodes one statistics blob, emitting structured entries through
/// `logger`.
///
/// The buffer must stay valid and unmodified for the duration of the call;
/// nothing in it is retained afterwards. Reads never go past the envelope's
/// declared length nor past the end of `blob`, whichever is shorter.
pub fn dispatch(blob: &[u8], mode: PrintMode, swap: WordSwap, logger: &mut dyn StatsLogger) {
    let mut reader = BufferReader::new(blob);
    let envelope = match reader.read::<RawEnvelope>() {
        Some(raw) => StatsEnvelope::parse(raw.word()),
        None => {
            logger.error(format_args!("stats blob too short for the envelope word"));
            return;
        }
    };

    match envelope.status {
        // End of a multi-part transfer, not an error.
        StatsStatus::SERIES_DONE => return,
        StatsStatus::INVALID => {
            logger.debug(format_args!(
                "target doesn't support stats type {}",
                envelope.stats_type
            ));
            return;
        }
        StatsStatus::ERROR => {
            logger.debug(format_args!(
                "target couldn't upload stats type {} (no mem?)",
                envelope.stats_type
            ));
            return;
        }
        // Got valid, though perhaps partial, stats.
        _ => {}
    }

    let length = envelope.length as usize;
    let remaining = reader.into_remaining();
    let payload = match remaining.get(..length) {
        Some(payload) => payload,
        None => {
            logger.error(format_args!(
                "stats blob truncated: {} payload bytes claimed, {} present",
                length,
                remaining.len()
            ));
            return;
        }
    };

    match envelope.stats_type {
        StatsType::WAL_PDEV_TXRX => stats::pdev::decode(payload, logger),
        StatsType::RX_REORDER => stats::rx_reorder::decode(payload, logger),
        StatsType::RX_RATE_INFO => stats::rate::decode_rx(payload, logger),
        StatsType::RX_RATE_INFO_V2 => stats::rate::decode_rx_v2(payload, logger),
        StatsType::TX_PPDU_LOG => {
            if envelope.status == StatsStatus::PARTIAL && length == 0 {
                logger.debug(format_args!("tx PPDU log with zero length"));
                return;
            }
            ppdu::decode(payload, mode, swap, logger);
        }
        StatsType::TX_RATE_INFO => stats::rate::decode_tx(payload, logger),
        StatsType::TX_RATE_INFO_V2 => stats::rate::decode_tx_v2(payload, logger),
        StatsType::RX_REMOTE_RING_BUFFER_INFO => stats::remote_buf::decode(payload, logger),
        StatsType::TXBF_INFO => stats::txbf::decode_data(payload, logger),
        StatsType::SND_INFO => stats::txbf::decode_snd(payload, logger),
        StatsType::TX_SELFGEN_INFO => stats::selfgen::decode(payload, logger),
        StatsType::ERROR_INFO => stats::sched_err::decode(payload, logger),
        StatsType::TXBF_MUSU_NDPA_PKT => stats::txbf::decode_musu_ndpa(payload, logger),
        StatsType::TIDQ => stats::tidq::decode(payload, swap, logger),
        StatsType::TX_MU_INFO => stats::mu::decode(payload, logger),
        StatsType::SIFS_RESP_INFO => stats::sifs::decode(payload, logger),
        // Unknown types are not errors; newer firmware may send them.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::{blob, words, BufferedLogger},
        crate::Severity,
    };

    fn dispatch_concise(bytes: &[u8]) -> BufferedLogger {
        let mut logger = BufferedLogger::new();
        dispatch(bytes, PrintMode::Concise, WordSwap::None, &mut logger);
        logger
    }

    #[test]
    fn parse_splits_the_envelope_word() {
        let envelope = StatsEnvelope::parse(0x0123_0000 | 7 << 5 | 0x1f);
        assert_eq!(envelope.stats_type, StatsType(0x1f));
        assert_eq!(envelope.status, StatsStatus::SERIES_DONE);
        assert_eq!(envelope.length, 0x0123);

        let envelope = StatsEnvelope::parse(u32::MAX);
        assert_eq!(envelope.stats_type, StatsType(31));
        assert_eq!(envelope.status, StatsStatus(7));
        assert_eq!(envelope.length, 0xffff);

        let envelope = StatsEnvelope::parse(0);
        assert_eq!(envelope.stats_type, StatsType::WAL_PDEV_TXRX);
        assert_eq!(envelope.status, StatsStatus::PRESENT);
        assert_eq!(envelope.length, 0);
    }

    #[test]
    fn series_done_emits_nothing() {
        // Payload contents are irrelevant under SERIES_DONE.
        let bytes = blob(StatsType::TX_PPDU_LOG.0, StatsStatus::SERIES_DONE.0, 8, &[0xff; 8]);
        let logger = dispatch_concise(&bytes);
        assert!(logger.entries.is_empty());
    }

    #[test]
    fn invalid_status_reports_unsupported_type() {
        let bytes = blob(23, StatsStatus::INVALID.0, 0, &[]);
        let logger = dispatch_concise(&bytes);
        assert_eq!(logger.lines(), vec!["target doesn't support stats type 23"]);
    }

    #[test]
    fn error_status_reports_failed_upload() {
        let bytes = blob(StatsType::RX_REORDER.0, StatsStatus::ERROR.0, 0, &[]);
        let logger = dispatch_concise(&bytes);
        assert_eq!(logger.lines(), vec!["target couldn't upload stats type 1 (no mem?)"]);
    }

    #[test]
    fn unknown_type_is_silently_ignored() {
        let bytes = blob(29, StatsStatus::PRESENT.0, 4, &words(&[0xdead]));
        let logger = dispatch_concise(&bytes);
        assert!(logger.entries.is_empty());
    }

    #[test]
    fn empty_blob_reports_missing_envelope() {
        let logger = dispatch_concise(&[]);
        assert_eq!(logger.entries.len(), 1);
        assert_eq!(logger.entries[0].0, Severity::Error);
    }

    #[test]
    fn truncated_payload_is_rejected() {
        // The envelope claims 32 payload bytes but only 4 follow.
        let bytes = blob(StatsType::TX_PPDU_LOG.0, StatsStatus::PRESENT.0, 32, &words(&[0]));
        let logger = dispatch_concise(&bytes);
        assert_eq!(logger.entries.len(), 1);
        assert!(logger.errors()[0].contains("truncated"));
    }

    #[test]
    fn partial_zero_length_ppdu_log_short_circuits() {
        let bytes = blob(StatsType::TX_PPDU_LOG.0, StatsStatus::PARTIAL.0, 0, &[]);
        let logger = dispatch_concise(&bytes);
        assert_eq!(logger.lines(), vec!["tx PPDU log with zero length"]);
    }

    #[test]
    fn present_zero_length_ppdu_log_is_an_underflow() {
        let bytes = blob(StatsType::TX_PPDU_LOG.0, StatsStatus::PRESENT.0, 0, &[]);
        let logger = dispatch_concise(&bytes);
        assert_eq!(logger.entries.len(), 1);
        assert!(logger.errors()[0].contains("too small for the log header"));
    }

    #[test]
    fn ppdu_log_blob_decodes_end_to_end() {
        // Header with no trailing arrays plus three incomplete records.
        let mut payload = words(&[1, 0, 0, 0]);
        for seq in &[10u32, 11, 12] {
            let mut record = [0u32; 10];
            record[0] = *seq;
            payload.extend_from_slice(&words(&record));
        }
        let bytes = blob(
            StatsType::TX_PPDU_LOG.0,
            StatsStatus::PRESENT.0,
            payload.len() as u16,
            &payload,
        );
        let logger = dispatch_concise(&bytes);
        assert_eq!(logger.entries.len(), 3);
        assert!(logger.errors().is_empty());
        assert!(logger.lines().iter().all(|line| line.ends_with("(not completed)")));
    }

    #[test]
    fn payload_beyond_declared_length_is_not_decoded() {
        // Two whole records follow, but the envelope only admits to the
        // header plus one; the second must not be decoded.
        let mut payload = words(&[1, 0, 0, 0]);
        for seq in &[21u32, 22] {
            let mut record = [0u32; 10];
            record[0] = *seq;
            payload.extend_from_slice(&words(&record));
        }
        let declared = (payload.len() - 40) as u16;
        let bytes = blob(StatsType::TX_PPDU_LOG.0, StatsStatus::PRESENT.0, declared, &payload);
        let logger = dispatch_concise(&bytes);
        assert_eq!(logger.lines(), vec!["start seq num = 21 (not completed)"]);
    }
}
