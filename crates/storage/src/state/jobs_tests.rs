// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::super::MaterializedState;
use chrono::{TimeZone, Utc};
use dispatch_core::{
    Address, BookingNumber, CustomerId, EmployeeId, Job, JobId, JobStatus, Money, PricingSnapshot,
    Region, Worker, WorkerId,
};

fn pricing() -> PricingSnapshot {
    PricingSnapshot {
        base: Money::from_cents(10_000),
        size_adjustment: Money::ZERO,
        add_ons: Money::ZERO,
        discount: Money::ZERO,
        tax: Money::ZERO,
        total: Money::from_cents(10_000),
        demand_multiplier: 1.0,
        rush_premium: 0.0,
        utilization_at_booking: 0.0,
        pricing_tier: "standard".into(),
        rush_tier: "none".into(),
    }
}

fn address() -> Address {
    Address { line1: "1 Main St".into(), city: "Dubai".into(), region: Region::Dxb }
}

fn worker(id: &str) -> Worker {
    Worker::new(
        WorkerId::from_string(id),
        EmployeeId::new(Region::Dxb, "2601", 1),
        "+9710000000",
        "Jane",
        Region::Dxb,
    )
}

fn job(id: &str, worker_id: Option<WorkerId>, start_hour: i64) -> Job {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut j = Job::new(
        JobId::from_string(id),
        BookingNumber::new(now, "ABCDEF"),
        CustomerId::new("cust-1"),
        "svc-standard",
        address(),
        now + chrono::Duration::hours(start_hour),
        2.0,
        pricing(),
        now,
    );
    j.worker_id = worker_id;
    j
}

#[test]
fn candidates_without_conflict_excludes_busy_worker() {
    let mut state = MaterializedState::default();
    let w = worker("wrk-test0000000000001");
    state.insert_worker(w.clone());
    state.insert_job(job("job-test0000000000001", Some(w.id.clone()), 0));

    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let candidates = state.candidates_without_conflict(
        Region::Dxb,
        now,
        now + chrono::Duration::hours(2),
        &JobId::from_string("job-other00000000000001"),
    );
    // worker is not `Available` by default test setup is Available, but has a
    // conflicting job so should be excluded.
    assert!(candidates.is_empty());
}

#[test]
fn jobs_with_status_filters() {
    let mut state = MaterializedState::default();
    let mut j = job("job-test0000000000002", None, 0);
    j.status = JobStatus::Completed;
    state.insert_job(j);
    state.insert_job(job("job-test0000000000003", None, 1));

    assert_eq!(state.jobs_with_status(JobStatus::Completed).count(), 1);
    assert_eq!(state.jobs_with_status(JobStatus::Pending).count(), 1);
}
