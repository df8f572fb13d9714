// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-domain queries over [`super::MaterializedState`].

use super::MaterializedState;
use chrono::{DateTime, Utc};
use dispatch_core::{Job, JobStatus, Region};

impl MaterializedState {
    /// Workers active in `region` whose schedule does not conflict with
    /// `[window_start, window_end)`, excluding `exclude_job`.
    pub fn candidates_without_conflict(
        &self,
        region: Region,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        exclude_job: &dispatch_core::JobId,
    ) -> Vec<&dispatch_core::Worker> {
        self.workers_in_region(region)
            .filter(|w| w.is_assignable())
            .filter(|w| {
                !self.jobs.values().any(|j| {
                    j.id != *exclude_job
                        && j.worker_id.as_ref() == Some(&w.id)
                        && j.conflicts_with(window_start, window_end)
                })
            })
            .collect()
    }

    pub fn jobs_with_status(&self, status: JobStatus) -> impl Iterator<Item = &Job> {
        self.jobs.values().filter(move |j| j.status == status)
    }

    /// Most recent `actual_end_time` per assignable worker in `region`, used
    /// to derive queue position (spec §3 "Cleaner queue position").
    pub fn last_completion_by_worker(&self, region: Region) -> Vec<(dispatch_core::WorkerId, Option<DateTime<Utc>>)> {
        self.workers_in_region(region)
            .map(|w| {
                let last = self
                    .jobs
                    .values()
                    .filter(|j| j.worker_id.as_ref() == Some(&w.id) && j.status == JobStatus::Completed)
                    .filter_map(|j| j.actual_end_time)
                    .max();
                (w.id.clone(), last)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
