// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-adapters: injected collaborator interfaces (cache, event bus,
//! wallet) the dispatch core depends on but never owns the implementation
//! of.

pub mod cache;
pub mod event_bus;
pub mod wallet;

pub use cache::{Cache, CacheError, CacheResult, InMemoryCache};
pub use event_bus::{BroadcastEventBus, EventBus};
pub use wallet::{LoggingWalletSink, WalletError, WalletSink};
