// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup: structured logs to stderr, plus a rolling file appender
//! when a log directory is configured.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. Returns the file-appender
/// guard when `log_dir` is set; the caller must keep it alive for the
/// duration of the process or buffered log lines are lost on exit.
pub fn init(log_dir: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "dispatchd.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(non_blocking).init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
