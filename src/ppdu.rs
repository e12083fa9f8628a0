// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Decoder for the tx PPDU log: a header carrying firmware-declared array
//! lengths followed by a run of variable-stride records, each a fixed
//! 10-word bit-packed base plus three trailing arrays sized by the header.
//!
//! The header's length fields are hostile input. Record stride is computed
//! with overflow detection at every accumulation before the record count
//! division runs, and the per-record array cursor re-checks its own
//! arithmetic, so a crafted header terminates the decode instead of steering
//! reads out of bounds.

use {
    crate::{
        buffer_reader::BufferReader,
        endian::WordSwap,
        error::SizeError,
        fields::BitField,
        logger::StatsLogger,
        render,
    },
    static_assertions::const_assert_eq,
    std::mem::size_of,
    zerocopy::{FromBytes, Unaligned},
};

/// How much of each record to render. The mode changes which fields are
/// extracted and printed, never where record boundaries fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// Sequence number and ack window only.
    Concise,
    /// Every field plus the per-record trailing arrays.
    Complete,
}

/// Per-blob log header shared by every record: the timestamp tick scale and
/// the element counts of the three per-record trailing arrays.
#[derive(FromBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct PpduLogHeader {
    pub microsec_per_tick: u32,
    pub mpdu_bytes_array_len: u32,
    pub mpdu_msdus_array_len: u32,
    pub msdu_bytes_array_len: u32,
}

const_assert_eq!(size_of::<PpduLogHeader>(), 16);

/// Fixed bit-packed base of every record; the trailing arrays follow it
/// immediately.
const RECORD_BASE_WORDS: usize = 10;
pub const RECORD_BASE_SIZE: usize = RECORD_BASE_WORDS * size_of::<u32>();

/// Output capacity for one rendered trailing array.
const LIST_BUF_SIZE: usize = 80;

// Layout of the record base. Word 2 bits 7:0 are reserved for an MSDU count
// the target does not fill in yet; words 5..=8 hold the acked and enqueued
// window bitmaps, LSBs first.
const START_SEQ_NUM: BitField = BitField::new("start_seq_num", 0, 0, 16);
const START_PN_LSBS: BitField = BitField::new("start_pn_lsbs", 0, 16, 16);
const NUM_BYTES: BitField = BitField::new("num_bytes", 1, 0, 32);
const NUM_MPDUS: BitField = BitField::new("num_mpdus", 2, 8, 8);
const EXT_TID: BitField = BitField::new("ext_tid", 2, 16, 5);
const PEER_ID: BitField = BitField::new("peer_id", 2, 21, 11);
const TIMESTAMP_ENQUEUE: BitField = BitField::new("timestamp_enqueue", 3, 0, 32);
const TIMESTAMP_COMPLETION: BitField = BitField::new("timestamp_completion", 4, 0, 32);
const ACKED_LSBS_WORD: usize = 5;
const ENQUEUED_LSBS_WORD: usize = 7;
const RATE_CODE: BitField = BitField::new("rate_code", 9, 0, 8);
const RATE_FLAGS: BitField = BitField::new("rate_flags", 9, 8, 8);
const TRIES: BitField = BitField::new("tries", 9, 16, 8);
const COMPLETE: BitField = BitField::new("complete", 9, 24, 8);

// Channel-width bits within the record's rate flags.
const RATE_FLAG_40MHZ: u32 = 0x20;
const RATE_FLAG_80MHZ: u32 = 0x40;
const RATE_FLAG_160MHZ: u32 = 0x80;

/// Computes the stride of one record from the header's declared array
/// lengths.
///
/// The total is accumulated in the 32-bit range the length fields themselves
/// occupy, checked at every step; a wrap invalidates every record boundary
/// downstream, so the caller must abort the whole blob.
pub fn record_size(hdr: &PpduLogHeader) -> Result<usize, SizeError> {
    let mut size = RECORD_BASE_SIZE as u32;
    for &(len, elem_size, field) in &[
        (hdr.mpdu_bytes_array_len, size_of::<u16>() as u32, "mpdu_bytes_array_len"),
        (hdr.mpdu_msdus_array_len, size_of::<u8>() as u32, "mpdu_msdus_array_len"),
        (hdr.msdu_bytes_array_len, size_of::<u16>() as u32, "msdu_bytes_array_len"),
    ] {
        size = len
            .checked_mul(elem_size)
            .and_then(|bytes| size.checked_add(bytes))
            .ok_or(SizeError::Overflow { field })?;
    }
    Ok(size as usize)
}

/// Decodes a tx PPDU log payload, rendering each record through `logger`.
pub fn decode(payload: &[u8], mode: PrintMode, swap: WordSwap, logger: &mut dyn StatsLogger) {
    let mut reader = BufferReader::new(payload);
    let hdr = match reader.read::<PpduLogHeader>() {
        Some(hdr) => hdr,
        None => {
            let e = SizeError::Underflow { length: payload.len() };
            logger.error(format_args!("tx PPDU log: {}; no records decoded", e));
            return;
        }
    };
    let record_size = match record_size(&hdr) {
        Ok(record_size) => record_size,
        Err(e) => {
            logger.error(format_args!("tx PPDU log: {}", e));
            return;
        }
    };
    let records = reader.into_remaining();
    let num_records = records.len() / record_size;
    if mode == PrintMode::Complete {
        logger.debug(format_args!("Tx PPDU log elements: num_records {}", num_records));
    }
    for index in 0..num_records {
        decode_record(records, index, index * record_size, &hdr, mode, swap, logger);
    }
}

fn decode_record(
    records: &[u8],
    index: usize,
    start: usize,
    hdr: &PpduLogHeader,
    mode: PrintMode,
    swap: WordSwap,
    logger: &mut dyn StatsLogger,
) {
    let mut words = [0u32; RECORD_BASE_WORDS];
    for (w, word) in words.iter_mut().enumerate() {
        // In bounds: `start` comes from the record count division in
        // `decode`, and the stride covers the whole base.
        let at = start + w * size_of::<u32>();
        *word =
            u32::from_ne_bytes([records[at], records[at + 1], records[at + 2], records[at + 3]]);
    }
    let start_seq_num = START_SEQ_NUM.get(&words);
    let complete = COMPLETE.get(&words) != 0;

    match mode {
        PrintMode::Concise => {
            if complete {
                logger.debug(format_args!("start seq num = {}", start_seq_num));
                logger.debug(format_args!("enqueued and acked MPDU bitmaps:"));
                log_ack_window(&words, logger);
            } else {
                logger.debug(format_args!("start seq num = {} (not completed)", start_seq_num));
            }
        }
        PrintMode::Complete => {
            let microsec_per_tick = hdr.microsec_per_tick;
            let time_enqueue_us = ticks_to_usec(TIMESTAMP_ENQUEUE.get(&words), microsec_per_tick);
            logger.debug(format_args!(
                " - PPDU tx to peer {}, TID {}",
                PEER_ID.get(&words),
                EXT_TID.get(&words)
            ));
            logger.debug(format_args!(
                "   start seq num = {}, start PN LSBs = {:#06x}",
                start_seq_num,
                START_PN_LSBS.get(&words)
            ));
            logger.debug(format_args!(
                "   PPDU: {} MPDUs, {} bytes",
                NUM_MPDUS.get(&words),
                NUM_BYTES.get(&words)
            ));
            if complete {
                let time_completion_us =
                    ticks_to_usec(TIMESTAMP_COMPLETION.get(&words), microsec_per_tick);
                logger.debug(format_args!(
                    "   enqueued: {} usec, completed: {} usec",
                    time_enqueue_us, time_completion_us
                ));
                let rate_flags = RATE_FLAGS.get(&words);
                logger.debug(format_args!(
                    "   {} tries, last tx used rate {} on {} MHz chan (flags = {:#x})",
                    TRIES.get(&words),
                    RATE_CODE.get(&words),
                    rate_flags_to_mhz(rate_flags),
                    rate_flags
                ));
                logger.debug(format_args!("   enqueued and acked MPDU bitmaps:"));
                log_ack_window(&words, logger);
                render_trailing_arrays(records, index, start, hdr, swap, logger);
            } else {
                logger.debug(format_args!(
                    "   enqueued: {} usec, not yet completed",
                    time_enqueue_us
                ));
            }
        }
    }
}

/// Renders a completed record's three trailing arrays.
///
/// The array cursor re-checks every advance: a crafted header can wrap this
/// arithmetic on an accumulation path the blob-level size check never took.
/// A wrap abandons the rest of this record's arrays; the caller goes on to
/// the next record, which has its own cursor.
fn render_trailing_arrays(
    records: &[u8],
    index: usize,
    start: usize,
    hdr: &PpduLogHeader,
    swap: WordSwap,
    logger: &mut dyn StatsLogger,
) {
    let mpdu_bytes_len = hdr.mpdu_bytes_array_len as usize;
    let mpdu_msdus_len = hdr.mpdu_msdus_array_len as usize;
    let msdu_bytes_len = hdr.msdu_bytes_array_len as usize;

    let cursor = match start.checked_add(RECORD_BASE_SIZE) {
        Some(cursor) => cursor,
        None => {
            logger
                .error(format_args!("tx PPDU log record {}: record base wraps the cursor", index));
            return;
        }
    };
    if mpdu_bytes_len != 0 {
        let list = render::render_u16_list(records, cursor, swap, mpdu_bytes_len, LIST_BUF_SIZE);
        logger.debug(format_args!("   MPDU bytes: {}", list));
    }
    let cursor = match advance(cursor, mpdu_bytes_len, size_of::<u16>()) {
        Some(cursor) => cursor,
        None => {
            logger.error(format_args!(
                "tx PPDU log record {}: mpdu_bytes_array_len {} wraps the cursor",
                index, mpdu_bytes_len
            ));
            return;
        }
    };
    if mpdu_msdus_len != 0 {
        let list = render::render_u8_list(records, cursor, swap, mpdu_msdus_len, LIST_BUF_SIZE);
        logger.debug(format_args!("   MPDU MSDUs: {}", list));
    }
    let cursor = match advance(cursor, mpdu_msdus_len, size_of::<u8>()) {
        Some(cursor) => cursor,
        None => {
            logger.error(format_args!(
                "tx PPDU log record {}: mpdu_msdus_array_len {} wraps the cursor",
                index, mpdu_msdus_len
            ));
            return;
        }
    };
    if msdu_bytes_len != 0 {
        let list = render::render_u16_list(records, cursor, swap, msdu_bytes_len, LIST_BUF_SIZE);
        logger.debug(format_args!("   MSDU bytes: {}", list));
    }
}

fn advance(cursor: usize, elems: usize, elem_size: usize) -> Option<usize> {
    elems.checked_mul(elem_size).and_then(|bytes| cursor.checked_add(bytes))
}

fn log_ack_window(words: &[u32; RECORD_BASE_WORDS], logger: &mut dyn StatsLogger) {
    let queued = [words[ENQUEUED_LSBS_WORD], words[ENQUEUED_LSBS_WORD + 1]];
    let acked = [words[ACKED_LSBS_WORD], words[ACKED_LSBS_WORD + 1]];
    let (queued_str, acked_str) = render::render_block_ack_window(queued, acked);
    logger.debug(format_args!("{}", queued_str));
    logger.debug(format_args!("{}", acked_str));
}

fn ticks_to_usec(ticks: u32, microsec_per_tick: u32) -> u64 {
    u64::from(ticks) * u64::from(microsec_per_tick)
}

fn rate_flags_to_mhz(rate_flags: u32) -> u32 {
    if rate_flags & RATE_FLAG_40MHZ != 0 {
        40
    } else if rate_flags & RATE_FLAG_80MHZ != 0 {
        80
    } else if rate_flags & RATE_FLAG_160MHZ != 0 {
        160
    } else {
        20
    }
}
