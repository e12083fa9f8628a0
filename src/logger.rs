// Copyright 2021 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::fmt;

/// Severity of a decoded diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Error,
}

/// Sink for decoded diagnostic entries.
///
/// Each entry is one discrete, orderable unit of text; the decoder makes no
/// assumption about where entries end up. Delivery is fire-and-forget:
/// implementations must not fail back into the decoder.
pub trait StatsLogger {
    fn log(&mut self, severity: Severity, args: fmt::Arguments<'_>);

    fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    fn error(&mut self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }
}

/// Forwards entries to the `log` crate facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLogger;

impl StatsLogger for DefaultLogger {
    fn log(&mut self, severity: Severity, args: fmt::Arguments<'_>) {
        match severity {
            Severity::Debug => log::debug!(target: "wlan-fw-stats", "{}", args),
            Severity::Error => log::error!(target: "wlan-fw-stats", "{}", args),
        }
    }
}
