// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::logger::{Severity, StatsLogger},
    std::fmt,
};

/// A logger that buffers every entry for assertions.
#[derive(Debug, Default)]
pub struct BufferedLogger {
    pub entries: Vec<(Severity, String)>,
}

impl BufferedLogger {
    pub fn new() -> Self {
        BufferedLogger::default()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, line)| line.as_str()).collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(severity, _)| *severity == Severity::Error)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|(_, line)| line.contains(needle))
    }
}

impl StatsLogger for BufferedLogger {
    fn log(&mut self, severity: Severity, args: fmt::Arguments<'_>) {
        self.entries.push((severity, args.to_string()));
    }
}

/// Serializes native-order 32-bit words the way the transport lays them out.
pub fn words(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_ne_bytes().to_vec()).collect()
}

/// Builds a whole stats blob: envelope word plus payload bytes.
pub fn blob(stats_type: u8, status: u8, length: u16, payload: &[u8]) -> Vec<u8> {
    let envelope =
        u32::from(stats_type) & 0x1f | (u32::from(status) & 0x7) << 5 | u32::from(length) << 16;
    let mut out = words(&[envelope]);
    out.extend_from_slice(payload);
    out
}
