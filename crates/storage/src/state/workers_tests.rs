// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::super::MaterializedState;
use chrono::{TimeZone, Utc};
use dispatch_core::{EmployeeId, OperationalStatus, Region, Worker, WorkerId};

fn worker(id: &str) -> Worker {
    Worker::new(
        WorkerId::from_string(id),
        EmployeeId::new(Region::Dxb, "2601", 1),
        "+9710000000",
        "Jane",
        Region::Dxb,
    )
}

#[test]
fn assignable_in_region_excludes_busy() {
    let mut state = MaterializedState::default();
    let mut w1 = worker("wrk-test0000000000011");
    let mut w2 = worker("wrk-test0000000000012");
    w2.operational_status = OperationalStatus::Busy;
    state.insert_worker(w1.clone());
    state.insert_worker(w2.clone());

    let ids: Vec<_> = state.assignable_in_region(Region::Dxb).map(|w| w.id.clone()).collect();
    assert_eq!(ids, vec![w1.id.clone()]);
    w1.operational_status = OperationalStatus::Available;
}

#[test]
fn expired_cooldowns_only_returns_elapsed() {
    let mut state = MaterializedState::default();
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let mut expired = worker("wrk-test0000000000013");
    expired.operational_status = OperationalStatus::CoolingDown;
    expired.cooldown_expires_at = Some(now - chrono::Duration::minutes(1));

    let mut active = worker("wrk-test0000000000014");
    active.operational_status = OperationalStatus::CoolingDown;
    active.cooldown_expires_at = Some(now + chrono::Duration::minutes(10));

    state.insert_worker(expired.clone());
    state.insert_worker(active);

    let ids: Vec<_> = state.expired_cooldowns(now).map(|w| w.id.clone()).collect();
    assert_eq!(ids, vec![expired.id]);
}
