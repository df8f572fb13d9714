// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker-domain queries over [`super::MaterializedState`].

use super::MaterializedState;
use chrono::{DateTime, Utc};
use dispatch_core::{OperationalStatus, Region, Worker};

impl MaterializedState {
    pub fn assignable_in_region(&self, region: Region) -> impl Iterator<Item = &Worker> {
        self.workers_in_region(region).filter(|w| w.is_assignable())
    }

    /// Workers whose cooldown has elapsed as of `now`, still flagged
    /// `CoolingDown` in the table (the release loop's work list).
    pub fn expired_cooldowns(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Worker> {
        self.workers
            .values()
            .filter(|w| w.operational_status == OperationalStatus::CoolingDown)
            .filter(move |w| w.cooldown_expired(now))
    }

    pub fn active_job_count(&self, worker_id: &dispatch_core::WorkerId) -> usize {
        self.jobs
            .values()
            .filter(|j| j.worker_id.as_ref() == Some(worker_id) && j.status.holds_worker())
            .count()
    }
}

#[cfg(test)]
#[path = "workers_tests.rs"]
mod tests;
