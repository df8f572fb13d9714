// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-daemon: the process that wires `dispatch-storage`, the
//! `dispatch-adapters` collaborators, and `dispatch-engine`'s `DispatchCore`
//! together, then keeps the SLA monitor running for the process lifetime.

pub mod logging;
pub mod settings;

use dispatch_adapters::{BroadcastEventBus, InMemoryCache, LoggingWalletSink};
use dispatch_core::{DispatchConfig, SystemClock};
use dispatch_engine::{DispatchCore, Monitor};
use dispatch_storage::Store;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub use settings::Settings;

/// The concrete `DispatchCore` this process runs, wired to its production
/// collaborators. A test harness would instantiate `DispatchCore` directly
/// with fakes instead of going through this alias.
pub type ProductionCore = DispatchCore<InMemoryCache, BroadcastEventBus, LoggingWalletSink, SystemClock>;

/// Everything `run` needs to serve requests and keep the SLA monitor alive.
/// An HTTP/WebSocket front end (outside this core, spec §1) would hold its
/// own clone of `core` and `bus` and call into them directly.
pub struct App {
    pub core: Arc<ProductionCore>,
    pub bus: Arc<BroadcastEventBus>,
    monitor: Monitor,
}

impl App {
    /// Build the storage, collaborators, and `DispatchCore`, then spawn the
    /// SLA monitor's background loops against the same store/bus/wallet.
    pub fn start(config: DispatchConfig) -> Self {
        let store = Arc::new(Store::new());
        let cache = InMemoryCache::new();
        let bus = Arc::new(BroadcastEventBus::default());
        let wallet = Arc::new(LoggingWalletSink);
        let clock = SystemClock;

        let monitor = Monitor::spawn(store.clone(), clock.clone(), bus.clone(), wallet.clone(), config.monitor.clone());
        let core = Arc::new(DispatchCore::new(store, cache, bus.clone(), wallet, clock, config));

        Self { core, bus, monitor }
    }

    /// Stop the SLA monitor's loops and wait for them to exit.
    pub async fn shutdown(self) {
        self.monitor.shutdown().await;
    }
}

/// Wait for either Ctrl-C or an externally supplied cancellation, then
/// return so the caller can drive [`App::shutdown`].
pub async fn wait_for_shutdown_signal(cancellation: &CancellationToken) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received Ctrl-C, shutting down");
        }
        _ = cancellation.cancelled() => {
            tracing::info!("shutdown requested");
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
