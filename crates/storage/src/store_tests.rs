// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Store;
use chrono::{TimeZone, Utc};
use dispatch_core::{
    Address, BookingNumber, CustomerId, DispatchError, EmployeeId, Job, JobId, Money,
    PricingSnapshot, Region, Worker, WorkerId,
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

fn sample_job() -> Job {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    Job::new(
        JobId::from_string("job-test0000000000077"),
        BookingNumber::new(now, "ABCDEF"),
        CustomerId::new("cust-1"),
        "svc-standard",
        Address { line1: "1 Main St".into(), city: "Dubai".into(), region: Region::Dxb },
        now,
        2.0,
        pricing(),
        now,
    )
}

#[test]
fn update_job_bumps_version_on_success() {
    let store = Store::new();
    let job = sample_job();
    let id = job.id.clone();
    store.insert_job(job);

    let updated = store.update_job(&id, Some(0), |j| {
        j.customer_notes = Some("ring the bell".into());
        Ok(true)
    }).unwrap();
    assert_eq!(updated.version, 1);
    assert_eq!(updated.customer_notes.as_deref(), Some("ring the bell"));
}

#[test]
fn update_job_does_not_bump_version_on_idempotent_no_op() {
    let store = Store::new();
    let job = sample_job();
    let id = job.id.clone();
    store.insert_job(job);

    let updated = store.update_job(&id, Some(0), |_| Ok(false)).unwrap();
    assert_eq!(updated.version, 0);
}

#[test]
fn update_job_rejects_stale_version() {
    let store = Store::new();
    let job = sample_job();
    let id = job.id.clone();
    store.insert_job(job);

    let err = store.update_job(&id, Some(5), |_| Ok(true)).unwrap_err();
    assert_eq!(err, DispatchError::ConcurrentModification { expected: 5, actual: 0 });
}

#[test]
fn update_job_missing_is_not_found() {
    let store = Store::new();
    let err = store.update_job(&JobId::from_string("job-missing00000000001"), None, |_| Ok(true)).unwrap_err();
    assert!(matches!(err, DispatchError::NotFound(_)));
}

#[test]
fn next_employee_sequence_is_monotonic() {
    let store = Store::new();
    assert_eq!(store.next_employee_sequence(Region::Dxb, "2601"), 1);
    assert_eq!(store.next_employee_sequence(Region::Dxb, "2601"), 2);
}

#[test]
fn insert_and_get_worker_roundtrips() {
    let store = Store::new();
    let worker = Worker::new(
        WorkerId::from_string("wrk-test0000000000076"),
        EmployeeId::new(Region::Dxb, "2601", 1),
        "+9710000000",
        "Jane",
        Region::Dxb,
    );
    let id = worker.id.clone();
    store.insert_worker(worker);
    assert!(store.get_worker(&id).is_some());
}
