// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-engine: the job lifecycle controller, allocation engine, pricing
//! helper, and SLA monitor built on top of `dispatch-storage`'s tables and
//! `dispatch-adapters`' injected collaborators.

pub mod allocation;
pub mod core;
pub mod monitor;
pub mod pricing;
pub mod state_machine;

pub use allocation::{allocate, allocation_metrics, AllocationMetrics, AllocationOutcome};
pub use core::{CreateJobRequest, DispatchCore};
pub use monitor::Monitor;
pub use pricing::{quote, PricingInput};
pub use state_machine::{transition, unassign, TransitionRequest};
