// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use chrono::{TimeZone, Utc};
use dispatch_core::{
    Address, BookingNumber, CustomerId, EmployeeId, Job, JobId, Money, PricingSnapshot, Region,
    Worker, WorkerId,
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

#[test]
fn insert_and_get_job_roundtrips() {
    let mut state = MaterializedState::default();
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let job = Job::new(
        JobId::from_string("job-test0000000000099"),
        BookingNumber::new(now, "ABCDEF"),
        CustomerId::new("cust-1"),
        "svc-standard",
        Address { line1: "1 Main St".into(), city: "Dubai".into(), region: Region::Dxb },
        now,
        2.0,
        pricing(),
        now,
    );
    let id = job.id.clone();
    state.insert_job(job);

    assert!(state.get_job(&id).is_some());
    assert_eq!(state.jobs_in_region(Region::Dxb).count(), 1);
    assert_eq!(state.jobs_in_region(Region::Auh).count(), 0);
}

#[test]
fn insert_worker_indexes_by_employee_id() {
    let mut state = MaterializedState::default();
    let employee_id = EmployeeId::new(Region::Dxb, "2601", 1);
    let worker = Worker::new(
        WorkerId::from_string("wrk-test0000000000098"),
        employee_id.clone(),
        "+9710000000",
        "Jane",
        Region::Dxb,
    );
    state.insert_worker(worker);

    assert!(state.worker_by_employee_id(&employee_id).is_some());
    assert_eq!(state.workers_in_region(Region::Dxb).count(), 1);
}
