// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory materialized state: the authoritative job/worker tables this
//! core would otherwise keep in `bookings`/`employees` (spec §6).

pub mod jobs;
pub mod workers;

use dispatch_core::{EmployeeId, Job, JobId, Region, Worker, WorkerId};
use std::collections::HashMap;

/// Everything the dispatch core holds in memory. Mirrors the relational
/// layout of spec §6 (`bookings`, `employees`) without a SQL driver.
#[derive(Debug, Default)]
pub struct MaterializedState {
    pub jobs: HashMap<JobId, Job>,
    pub workers: HashMap<WorkerId, Worker>,
    /// `employees(employee_id)` uniqueness index.
    pub workers_by_employee_id: HashMap<EmployeeId, WorkerId>,
}

impl MaterializedState {
    pub fn get_job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub fn get_worker(&self, id: &WorkerId) -> Option<&Worker> {
        self.workers.get(id)
    }

    pub fn insert_job(&mut self, job: Job) {
        self.jobs.insert(job.id.clone(), job);
    }

    pub fn insert_worker(&mut self, worker: Worker) {
        self.workers_by_employee_id.insert(worker.employee_id.clone(), worker.id.clone());
        self.workers.insert(worker.id.clone(), worker);
    }

    pub fn worker_by_employee_id(&self, employee_id: &EmployeeId) -> Option<&Worker> {
        self.workers_by_employee_id.get(employee_id).and_then(|id| self.workers.get(id))
    }

    pub fn jobs_in_region(&self, region: Region) -> impl Iterator<Item = &Job> {
        self.jobs.values().filter(move |j| j.address.region == region)
    }

    pub fn workers_in_region(&self, region: Region) -> impl Iterator<Item = &Worker> {
        self.workers.values().filter(move |w| w.region == region)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
