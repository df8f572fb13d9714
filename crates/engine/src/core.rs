// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `DispatchCore`: the callable surface an HTTP layer would sit on top of
//! (spec §6), composing the state machine, allocation engine, pricing
//! helper, and injected collaborators behind one generic struct.

use crate::allocation::{allocate, allocation_metrics, AllocationMetrics, AllocationOutcome};
use crate::pricing::{quote, PricingInput};
use crate::state_machine::{transition, unassign, TransitionRequest};
use chrono::{DateTime, Utc};
use dispatch_adapters::{Cache, EventBus, WalletSink};
use dispatch_core::{
    Actor, Address, BookingNumber, Clock, CustomerId, DiscountCode, DispatchConfig, DispatchEvent,
    DispatchResult, Job, JobId, JobStatus, Money, PaymentStatus, Region, WorkerId,
};
use dispatch_storage::Store;
use std::sync::Arc;
use std::time::Duration as StdDuration;

/// Composition root generic over the four injected collaborators: storage
/// never knows which cache, event bus, wallet, or clock implementation
/// it's wired to.
/// Store, bus, and wallet are `Arc`-wrapped so the daemon can share them
/// with [`crate::monitor::Monitor`]'s background loops.
pub struct DispatchCore<C, B, W, K> {
    store: Arc<Store>,
    cache: C,
    bus: Arc<B>,
    wallet: Arc<W>,
    clock: K,
    config: DispatchConfig,
}

/// Input to `create_job`, grouped the way `createJob`'s parameter list is
/// sketched in spec §6.
pub struct CreateJobRequest<'a> {
    pub customer: CustomerId,
    pub service_ref: String,
    pub address: Address,
    pub scheduled_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub subtotal: Money,
    pub discount_code: Option<&'a DiscountCode>,
    pub prior_discount_uses_by_customer: u32,
    pub utilization: f64,
    pub booking_suffix: String,
}

impl<C, B, W, K> DispatchCore<C, B, W, K>
where
    C: Cache,
    B: EventBus,
    W: WalletSink,
    K: Clock,
{
    pub fn new(store: Arc<Store>, cache: C, bus: Arc<B>, wallet: Arc<W>, clock: K, config: DispatchConfig) -> Self {
        Self { store, cache, bus, wallet, clock, config }
    }

    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    pub fn bus(&self) -> Arc<B> {
        self.bus.clone()
    }

    pub fn wallet(&self) -> Arc<W> {
        self.wallet.clone()
    }

    pub fn clock(&self) -> K {
        self.clock.clone()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// `createJob`: price the booking and persist it in `PENDING`, awaiting payment.
    pub async fn create_job(&self, request: CreateJobRequest<'_>) -> DispatchResult<Job> {
        let now = self.clock.utc_now();
        let pricing = quote(
            PricingInput {
                customer: &request.customer,
                subtotal: request.subtotal,
                scheduled_date: request.scheduled_date,
                now,
                utilization: request.utilization,
                discount: request.discount_code,
                prior_discount_uses_by_customer: request.prior_discount_uses_by_customer,
            },
            &self.config.pricing,
        )?;

        let job = Job::new(
            JobId::new(),
            BookingNumber::new(now, &request.booking_suffix),
            request.customer.clone(),
            request.service_ref,
            request.address,
            request.scheduled_date,
            request.duration_hours,
            pricing,
            now,
        );
        self.store.insert_job(job.clone());

        self.bus
            .publish(DispatchEvent::JobCreated {
                job_id: job.id.clone(),
                booking_number: job.booking_number.clone(),
                customer_id: request.customer,
                at: now,
            })
            .await;

        let ttl = StdDuration::from_secs(30);
        let _ = self.cache.set(&format!("job:status:{}", job.id), job.status.to_string(), Some(ttl)).await;

        Ok(job)
    }

    /// `startPayment`/`markPaid`: flips payment to `PAID` and drives the job
    /// from `PENDING` into `PENDING_ASSIGNMENT`.
    pub async fn mark_paid(&self, job_id: &JobId) -> DispatchResult<Job> {
        self.store.update_job(job_id, None, |job| {
            if job.payment_status == PaymentStatus::Paid {
                return Ok(false);
            }
            job.payment_status = PaymentStatus::Paid;
            Ok(true)
        })?;

        transition(
            &self.store,
            &self.clock,
            self.bus.as_ref(),
            self.wallet.as_ref(),
            &self.config.monitor,
            TransitionRequest::new(job_id.clone(), JobStatus::PendingAssignment, Actor::System),
        )
        .await
    }

    pub async fn allocate(&self, job_id: &JobId) -> DispatchResult<AllocationOutcome> {
        allocate(
            &self.store,
            &self.clock,
            self.bus.as_ref(),
            self.wallet.as_ref(),
            &self.cache,
            &self.config.allocation,
            &self.config.monitor,
            job_id,
        )
        .await
    }

    /// `allocationMetrics`: the `(region, date)` counters `allocate` updates
    /// as a side effect of every attempt, defaulting to zero for an unseen day.
    pub async fn allocation_metrics(&self, region: Region, date: chrono::NaiveDate) -> AllocationMetrics {
        allocation_metrics(&self.cache, region, date).await
    }

    pub async fn start(
        &self,
        job_id: &JobId,
        cleaner: WorkerId,
        expected_version: Option<u32>,
        idempotency_key: Option<String>,
    ) -> DispatchResult<Job> {
        let mut request = TransitionRequest::new(job_id.clone(), JobStatus::InProgress, Actor::Worker(cleaner));
        if let Some(v) = expected_version {
            request = request.expected_version(v);
        }
        if let Some(k) = idempotency_key {
            request = request.idempotency_key(k);
        }
        self.run(request).await
    }

    pub async fn pause(&self, job_id: &JobId, cleaner: WorkerId, reason: Option<String>) -> DispatchResult<Job> {
        let mut request = TransitionRequest::new(job_id.clone(), JobStatus::Paused, Actor::Worker(cleaner));
        if let Some(r) = reason {
            request = request.reason(r);
        }
        self.run(request).await
    }

    pub async fn resume(&self, job_id: &JobId, cleaner: WorkerId) -> DispatchResult<Job> {
        self.run(TransitionRequest::new(job_id.clone(), JobStatus::InProgress, Actor::Worker(cleaner))).await
    }

    pub async fn complete(
        &self,
        job_id: &JobId,
        cleaner: WorkerId,
        expected_version: Option<u32>,
        idempotency_key: Option<String>,
        notes: Option<String>,
    ) -> DispatchResult<Job> {
        if let Some(notes) = notes {
            self.store.update_job(job_id, None, |job| {
                job.cleaner_notes = Some(notes);
                Ok(false)
            })?;
        }
        let mut request = TransitionRequest::new(job_id.clone(), JobStatus::Completed, Actor::Worker(cleaner));
        if let Some(v) = expected_version {
            request = request.expected_version(v);
        }
        if let Some(k) = idempotency_key {
            request = request.idempotency_key(k);
        }
        self.run(request).await
    }

    pub async fn fail(&self, job_id: &JobId, actor: Actor, reason: String) -> DispatchResult<Job> {
        self.run(TransitionRequest::new(job_id.clone(), JobStatus::Failed, actor).reason(reason)).await
    }

    pub async fn assign(&self, job_id: &JobId, cleaner: WorkerId, _admin: String) -> DispatchResult<Job> {
        self.run(TransitionRequest::new(job_id.clone(), JobStatus::Assigned, Actor::System).assign_worker(cleaner)).await
    }

    pub async fn unassign(&self, job_id: &JobId, admin: String) -> DispatchResult<Job> {
        unassign(&self.store, &self.clock, job_id, Actor::Admin(admin)).await
    }

    pub async fn cancel(&self, job_id: &JobId, actor: Actor, reason: String) -> DispatchResult<Job> {
        self.run(TransitionRequest::new(job_id.clone(), JobStatus::Cancelled, actor).reason(reason)).await
    }

    /// `listDelayedJobs`: jobs past their SLA deadline, the same predicate
    /// the start-SLA loop alerts on.
    pub fn list_delayed_jobs(&self) -> Vec<Job> {
        let now = self.clock.utc_now();
        self.store.read(|state| {
            state
                .jobs
                .values()
                .filter(|job| match job.status {
                    JobStatus::Assigned => job.sla_deadline.is_some_and(|deadline| now > deadline),
                    JobStatus::InProgress => {
                        matches!((job.actual_start_time, job.sla_deadline), (Some(start), Some(deadline)) if start > deadline)
                    }
                    _ => false,
                })
                .cloned()
                .collect()
        })
    }

    /// `queueStatus`: current assignable-worker count and active job count
    /// for a region, a coarser read model than the full per-worker queue
    /// position map (which the allocation engine computes fresh per call).
    pub fn queue_status(&self, region: Region) -> (usize, usize) {
        self.store.read(|state| {
            let assignable = state.assignable_in_region(region).count();
            let active = state.jobs_in_region(region).filter(|j| j.status.holds_worker()).count();
            (assignable, active)
        })
    }

    /// `realtimeStats`: counts of jobs by terminal outcome in a region,
    /// written through to the `dashboard:stats` hash the cache contract
    /// names so a dashboard poller can read it without hitting the store.
    pub async fn realtime_stats(&self, region: Region) -> DispatchResult<(u64, u64)> {
        let (completed, failed) = self.store.read(|state| {
            let completed = state.jobs_in_region(region).filter(|j| j.status == JobStatus::Completed).count() as u64;
            let failed = state.jobs_in_region(region).filter(|j| j.status == JobStatus::Failed).count() as u64;
            (completed, failed)
        });
        let _ = self.cache.hset("dashboard:stats", &format!("{region}:completed"), completed.to_string()).await;
        let _ = self.cache.hset("dashboard:stats", &format!("{region}:failed"), failed.to_string()).await;
        Ok((completed, failed))
    }

    async fn run(&self, request: TransitionRequest) -> DispatchResult<Job> {
        transition(&self.store, &self.clock, self.bus.as_ref(), self.wallet.as_ref(), &self.config.monitor, request).await
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
