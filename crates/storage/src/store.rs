// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock-guarded access to the materialized state, with the optimistic
//! concurrency check spec §5 requires of every job mutation.

use crate::sequence::EmployeeSequence;
use crate::state::MaterializedState;
use dispatch_core::{DispatchError, DispatchResult, Job, JobId, Region, Worker, WorkerId};
use parking_lot::RwLock;

/// Single shared lock over the in-memory tables plus the employee-id
/// sequence counter. One lock rather than per-table locks: job mutations
/// read and write worker state together often enough (assignment, release)
/// that finer-grained locking would just move the contention, not remove it.
#[derive(Default)]
pub struct Store {
    state: RwLock<MaterializedState>,
    sequence: EmployeeSequence,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_job(&self, id: &JobId) -> Option<Job> {
        self.state.read().get_job(id).cloned()
    }

    pub fn get_worker(&self, id: &WorkerId) -> Option<Worker> {
        self.state.read().get_worker(id).cloned()
    }

    pub fn insert_job(&self, job: Job) {
        self.state.write().insert_job(job);
    }

    pub fn insert_worker(&self, worker: Worker) {
        self.state.write().insert_worker(worker);
    }

    pub fn next_employee_sequence(&self, region: Region, year_month: &str) -> u32 {
        self.sequence.next(region, year_month)
    }

    /// Run `f` against a read-only view of the whole table set. Used by the
    /// allocation engine's candidate scan, which needs jobs and workers
    /// together and would otherwise have to clone both tables up front.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&MaterializedState) -> R,
    {
        f(&self.state.read())
    }

    /// Apply `mutate` to the job identified by `id`, enforcing optimistic
    /// concurrency when `expected_version` is given. `mutate` returns
    /// whether it actually changed the job; the version only bumps when it
    /// did, so an idempotent no-op (a repeated call with a previously-seen
    /// idempotency key) can return the job unchanged without advancing
    /// `version`.
    pub fn update_job<F>(&self, id: &JobId, expected_version: Option<u32>, mutate: F) -> DispatchResult<Job>
    where
        F: FnOnce(&mut Job) -> DispatchResult<bool>,
    {
        let mut state = self.state.write();
        let job = state
            .jobs
            .get_mut(id)
            .ok_or_else(|| DispatchError::NotFound(format!("job {id}")))?;
        if let Some(expected) = expected_version {
            if job.version != expected {
                return Err(DispatchError::ConcurrentModification { expected, actual: job.version });
            }
        }
        if mutate(job)? {
            job.version += 1;
        }
        Ok(job.clone())
    }

    pub fn update_worker<F>(&self, id: &WorkerId, mutate: F) -> DispatchResult<Worker>
    where
        F: FnOnce(&mut Worker) -> DispatchResult<()>,
    {
        let mut state = self.state.write();
        let worker = state
            .workers
            .get_mut(id)
            .ok_or_else(|| DispatchError::NotFound(format!("worker {id}")))?;
        mutate(worker)?;
        Ok(worker.clone())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
