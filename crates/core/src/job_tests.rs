// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::strategies::arb_job_status;
use chrono::Duration;
use proptest::prelude::*;

fn sample_pricing() -> PricingSnapshot {
    PricingSnapshot {
        base: Money::from_cents(20000),
        size_adjustment: Money::ZERO,
        add_ons: Money::ZERO,
        discount: Money::ZERO,
        tax: Money::from_cents(1000),
        total: Money::from_cents(21000),
        demand_multiplier: 1.0,
        rush_premium: 1.0,
        utilization_at_booking: 0.4,
        pricing_tier: "standard".into(),
        rush_tier: "standard".into(),
    }
}

fn sample_job(now: DateTime<Utc>) -> Job {
    Job::new(
        JobId::new(),
        BookingNumber::new(now, "abcdef"),
        CustomerId::new("cust-1"),
        "deep-clean",
        Address { line1: "1 Main St".into(), city: "Dubai".into(), region: Region::Dxb },
        now + Duration::hours(2),
        2.0,
        sample_pricing(),
        now,
    )
}

#[test]
fn allowed_transitions_match_table() {
    assert!(JobStatus::Pending.can_transition_to(JobStatus::PendingAssignment));
    assert!(JobStatus::Pending.can_transition_to(JobStatus::Cancelled));
    assert!(!JobStatus::Pending.can_transition_to(JobStatus::Assigned));
    assert!(JobStatus::Cancelled.can_transition_to(JobStatus::Refunded));
    assert!(JobStatus::Failed.can_transition_to(JobStatus::PendingAssignment));
    assert!(JobStatus::Completed.allowed_transitions().is_empty());
}

#[test]
fn terminal_states() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Refunded.is_terminal());
    assert!(JobStatus::NoShow.is_terminal());
    assert!(!JobStatus::Cancelled.is_terminal());
}

#[test]
fn idempotency_log_is_scoped_to_status_and_key() {
    let now = Utc::now();
    let mut job = sample_job(now);
    job.version = 3;
    job.record_idempotency_key(JobStatus::Completed, "k1");
    assert_eq!(job.prior_idempotent_result(JobStatus::Completed, "k1"), Some(3));
    assert_eq!(job.prior_idempotent_result(JobStatus::Cancelled, "k1"), None);
    assert_eq!(job.prior_idempotent_result(JobStatus::Completed, "other"), None);
}

#[test]
fn conflicts_with_overlapping_window() {
    let now = Utc::now();
    let job = sample_job(now); // scheduled now+2h, 2h duration => [now+2h, now+4h)
    assert!(job.conflicts_with(now + Duration::hours(3), now + Duration::hours(5)));
    assert!(!job.conflicts_with(now + Duration::hours(4), now + Duration::hours(6)));
    assert!(!job.conflicts_with(now, now + Duration::hours(2)));
}

#[test]
fn cancelled_job_never_conflicts() {
    let now = Utc::now();
    let mut job = sample_job(now);
    job.status = JobStatus::Cancelled;
    assert!(!job.conflicts_with(now + Duration::hours(2), now + Duration::hours(4)));
}

#[test]
fn paused_accepts_failed_as_well_as_resume_and_cancel() {
    assert!(JobStatus::Paused.can_transition_to(JobStatus::InProgress));
    assert!(JobStatus::Paused.can_transition_to(JobStatus::Failed));
    assert!(JobStatus::Paused.can_transition_to(JobStatus::Cancelled));
    assert!(!JobStatus::Paused.can_transition_to(JobStatus::Completed));
}

proptest! {
    /// No status transitions to itself; the table models only real moves.
    #[test]
    fn no_self_transition(status in arb_job_status()) {
        prop_assert!(!status.can_transition_to(status));
    }

    /// JobStatus serializes and parses back to the same variant.
    #[test]
    fn job_status_serde_roundtrip(status in arb_job_status()) {
        let json = serde_json::to_string(&status).unwrap();
        let parsed: JobStatus = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(status, parsed);
    }
}
