// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::booking::Region;
use crate::job::JobStatus;
use crate::money::Money;

/// Proptest strategies for core domain types.
pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::PendingAssignment),
            Just(JobStatus::Confirmed),
            Just(JobStatus::Assigned),
            Just(JobStatus::InProgress),
            Just(JobStatus::Paused),
            Just(JobStatus::Completed),
            Just(JobStatus::Cancelled),
            Just(JobStatus::Failed),
            Just(JobStatus::Refunded),
            Just(JobStatus::NoShow),
        ]
    }

    pub fn arb_region() -> impl Strategy<Value = Region> {
        prop_oneof![
            Just(Region::Dxb),
            Just(Region::Auh),
            Just(Region::Shj),
            Just(Region::Ajm),
            Just(Region::Rak),
            Just(Region::Fuj),
            Just(Region::Uaq),
        ]
    }

    /// Cents in a plausible range for a cleaning booking: 0 to 100,000 AED.
    pub fn arb_money() -> impl Strategy<Value = Money> {
        (0i64..10_000_000).prop_map(Money::from_cents)
    }
}
