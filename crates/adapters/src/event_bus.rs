// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process fan-out for typed domain events (spec §4.5).
//!
//! Publication is fire-and-forget: a full or subscriber-less channel must
//! never block or fail the caller's transition.

use async_trait::async_trait;
use dispatch_core::DispatchEvent;
use tokio::sync::broadcast;

#[async_trait]
pub trait EventBus: Send + Sync + 'static {
    /// Publish an event. Best-effort: implementations log and swallow any
    /// delivery failure rather than returning it, per spec §4.5/§7.
    async fn publish(&self, event: DispatchEvent);
}

/// Default adapter: a `tokio::sync::broadcast` channel. Lagging subscribers
/// drop old events rather than block the publisher, matching "delivery is
/// fire-and-forget ... the bus must not block the publisher."
pub struct BroadcastEventBus {
    sender: broadcast::Sender<DispatchEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DispatchEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[async_trait]
impl EventBus for BroadcastEventBus {
    async fn publish(&self, event: DispatchEvent) {
        tracing::debug!(summary = %event.log_summary(), "publishing event");
        // Err(SendError) only means there are currently no subscribers,
        // which is a normal and expected state, not a delivery failure.
        let _ = self.sender.send(event);
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::{DispatchEvent, EventBus};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Records every published event for test assertions.
    #[derive(Default)]
    pub struct RecordingEventBus {
        events: Mutex<Vec<DispatchEvent>>,
    }

    impl RecordingEventBus {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<DispatchEvent> {
            self.events.lock().clone()
        }
    }

    #[async_trait]
    impl EventBus for RecordingEventBus {
        async fn publish(&self, event: DispatchEvent) {
            self.events.lock().push(event);
        }
    }

    /// Discards every event; used where a collaborator is required but the
    /// test under it doesn't assert on the event stream.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NullEventBus;

    #[async_trait]
    impl EventBus for NullEventBus {
        async fn publish(&self, _event: DispatchEvent) {}
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;
