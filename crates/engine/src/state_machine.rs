// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job lifecycle controller: validates and executes transitions, owns
//! cleaner-status and stats side effects, emits events.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dispatch_adapters::{EventBus, WalletSink};
use dispatch_core::{
    Actor, Clock, CustomerId, DispatchError, DispatchEvent, DispatchResult, Job, JobId,
    JobStatus, Money, MonitorConfig, OperationalStatus, PaymentStatus, Worker, WorkerId,
};
use dispatch_storage::Store;

/// Everything a `transition` call needs beyond the job itself.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub job_id: JobId,
    pub new_status: JobStatus,
    pub actor: Actor,
    pub expected_version: Option<u32>,
    pub reason: Option<String>,
    pub idempotency_key: Option<String>,
    /// Set only by `assign()`: the worker to attach when moving to `ASSIGNED`.
    pub assign_worker: Option<WorkerId>,
}

impl TransitionRequest {
    pub fn new(job_id: JobId, new_status: JobStatus, actor: Actor) -> Self {
        Self {
            job_id,
            new_status,
            actor,
            expected_version: None,
            reason: None,
            idempotency_key: None,
            assign_worker: None,
        }
    }

    pub fn expected_version(mut self, version: u32) -> Self {
        self.expected_version = Some(version);
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    pub fn assign_worker(mut self, worker_id: WorkerId) -> Self {
        self.assign_worker = Some(worker_id);
        self
    }
}

enum WorkerEffect {
    SetBusy,
    CoolDown { until: DateTime<Utc> },
    ReleaseAvailable,
}

/// Default status-history reason when the caller passes none, following the
/// same per-pair convention the original source hardcodes.
fn default_reason(from: JobStatus, to: JobStatus) -> String {
    use JobStatus::*;
    match (from, to) {
        (Pending, PendingAssignment) => "Payment completed".to_string(),
        (PendingAssignment, Assigned) | (Confirmed, Assigned) => "Cleaner assigned".to_string(),
        (Assigned, InProgress) => "Job started by cleaner".to_string(),
        (InProgress, Paused) => "Job paused by cleaner".to_string(),
        (Paused, InProgress) => "Job resumed by cleaner".to_string(),
        (InProgress, Completed) => "Job completed by cleaner".to_string(),
        (InProgress, Failed) => "Job marked failed".to_string(),
        (Cancelled, Refunded) => "Refund processed".to_string(),
        (Failed, PendingAssignment) => "Reassignment after failure".to_string(),
        (_, Cancelled) => "Job cancelled".to_string(),
        _ => format!("Status changed to {to}"),
    }
}

fn build_event(job: &Job, from: JobStatus) -> Option<DispatchEvent> {
    let at = job.status_history.last().map(|h| h.at).unwrap_or(job.created_at);
    match job.status {
        JobStatus::Assigned => job.worker_id.clone().map(|worker_id| DispatchEvent::JobAssigned {
            job_id: job.id.clone(),
            booking_number: job.booking_number.clone(),
            worker_id,
            at,
        }),
        JobStatus::InProgress if from == JobStatus::Assigned => job.worker_id.clone().map(|worker_id| {
            DispatchEvent::JobStarted { job_id: job.id.clone(), booking_number: job.booking_number.clone(), worker_id, at }
        }),
        JobStatus::InProgress if from == JobStatus::Paused => {
            Some(DispatchEvent::JobResumed { job_id: job.id.clone(), booking_number: job.booking_number.clone(), at })
        }
        JobStatus::Paused => Some(DispatchEvent::JobPaused { job_id: job.id.clone(), booking_number: job.booking_number.clone(), at }),
        JobStatus::Completed => job.worker_id.clone().map(|worker_id| {
            DispatchEvent::JobCompleted { job_id: job.id.clone(), booking_number: job.booking_number.clone(), worker_id, at }
        }),
        JobStatus::Cancelled => Some(DispatchEvent::JobCancelled {
            job_id: job.id.clone(),
            booking_number: job.booking_number.clone(),
            reason: job.cancellation_reason.clone().unwrap_or_default(),
            at,
        }),
        JobStatus::Failed => Some(DispatchEvent::JobFailed {
            job_id: job.id.clone(),
            booking_number: job.booking_number.clone(),
            reason: job.failure_reason.clone().unwrap_or_default(),
            at,
        }),
        _ => None,
    }
}

/// Cashback is a flat 5% of `total`, skipped entirely when `total <= 0`
/// (not even attempted), matching the original's guard.
const CASHBACK_RATE: f64 = 0.05;

/// Execute a validated transition, its pre-transition guards, and its side
/// effects, then publish the resulting event. Event emission and wallet
/// credits are best-effort: their failure never fails the transition.
pub async fn transition<B, W, C>(
    store: &Store,
    clock: &C,
    bus: &B,
    wallet: &W,
    config: &MonitorConfig,
    request: TransitionRequest,
) -> DispatchResult<Job>
where
    B: EventBus,
    W: WalletSink,
    C: Clock,
{
    let now = clock.utc_now();
    let TransitionRequest { job_id, new_status, actor, expected_version, reason, idempotency_key, assign_worker } =
        request;

    if new_status == JobStatus::Assigned {
        if let Some(worker_id) = &assign_worker {
            let worker = store.get_worker(worker_id).ok_or_else(|| DispatchError::NotFound(format!("worker {worker_id}")))?;
            if worker.operational_status != OperationalStatus::Available {
                return Err(DispatchError::BadRequest(format!("worker {worker_id} is not available")));
            }
        }
    }

    let mut worker_effect: Option<(WorkerId, WorkerEffect)> = None;
    let mut cashback: Option<(CustomerId, Money)> = None;
    let mut refund: Option<(CustomerId, Money)> = None;
    let mut completed = false;
    let mut failed = false;

    let job = store.update_job(&job_id, expected_version, |job| {
        if let Some(key) = &idempotency_key {
            if job.prior_idempotent_result(new_status, key).is_some() {
                return Ok(false);
            }
        }

        let from = job.status;
        if !from.can_transition_to(new_status) {
            return Err(DispatchError::InvalidTransition { from: from.to_string(), to: new_status.to_string() });
        }

        if from == JobStatus::Assigned && new_status == JobStatus::InProgress {
            if let Actor::Worker(ref actor_worker) = actor {
                if job.worker_id.as_ref() != Some(actor_worker) {
                    return Err(DispatchError::Forbidden("worker may only start their own job".into()));
                }
            }
        }

        if from == JobStatus::Paused && new_status == JobStatus::InProgress {
            if let Some(paused_at) = job.paused_at {
                if now - paused_at > ChronoDuration::minutes(config.paused_job_limit_minutes) {
                    return Err(DispatchError::BadRequest(
                        "paused too long to resume; fail the job instead".into(),
                    ));
                }
            }
        }

        if let Some(worker_id) = &assign_worker {
            job.worker_id = Some(worker_id.clone());
        }

        let reason_text = reason.clone().unwrap_or_else(|| default_reason(from, new_status));
        job.status = new_status;

        match new_status {
            JobStatus::Assigned => {
                job.assigned_at = Some(now);
                job.sla_deadline = Some(job.scheduled_date + ChronoDuration::minutes(10));
                if let Some(worker_id) = job.worker_id.clone() {
                    worker_effect = Some((worker_id, WorkerEffect::SetBusy));
                }
            }
            JobStatus::InProgress if from == JobStatus::Assigned => {
                job.actual_start_time = Some(now);
            }
            JobStatus::InProgress if from == JobStatus::Paused => {
                job.resumed_at = Some(now);
            }
            JobStatus::Paused => {
                job.paused_at = Some(now);
            }
            JobStatus::Completed => {
                job.actual_end_time = Some(now);
                if let Some(worker_id) = job.worker_id.clone() {
                    let until = now + ChronoDuration::minutes(config.cleaner_cooldown_minutes);
                    worker_effect = Some((worker_id, WorkerEffect::CoolDown { until }));
                }
                completed = true;
                if !job.pricing.total.is_zero() && !job.pricing.total.is_negative() {
                    cashback = Some((job.customer_id.clone(), job.pricing.total.scale(CASHBACK_RATE)));
                }
            }
            JobStatus::Failed => {
                job.failed_at = Some(now);
                job.failure_reason = Some(reason_text.clone());
                if let Some(worker_id) = job.worker_id.clone() {
                    worker_effect = Some((worker_id, WorkerEffect::ReleaseAvailable));
                }
                failed = true;
            }
            JobStatus::Cancelled => {
                job.cancelled_at = Some(now);
                job.cancelled_by = Some(actor.clone());
                job.cancellation_reason = Some(reason_text.clone());
                if let Some(worker_id) = job.worker_id.clone() {
                    worker_effect = Some((worker_id, WorkerEffect::ReleaseAvailable));
                }
                if job.payment_status == PaymentStatus::Paid {
                    refund = Some((job.customer_id.clone(), job.pricing.total));
                }
            }
            _ => {}
        }

        job.push_history(Some(from), actor.clone(), reason_text, now);
        if let Some(key) = &idempotency_key {
            job.record_idempotency_key(new_status, key);
        }

        Ok(true)
    })?;

    if let Some((worker_id, effect)) = worker_effect {
        apply_worker_effect(store, &worker_id, effect, completed, failed);
    }

    if let Some((customer, amount)) = cashback {
        if let Err(err) = wallet.credit(&customer, amount, "cashback").await {
            tracing::warn!(job_id = %job.id, error = %err, "cashback credit failed, ignoring");
        }
    }
    if let Some((customer, amount)) = refund {
        if let Err(err) = wallet.credit(&customer, amount, "refund").await {
            tracing::warn!(job_id = %job.id, error = %err, "refund credit failed, ignoring");
        }
    }

    if let Some(event) = build_event(&job, job.status_history.last().and_then(|h| h.previous_status).unwrap_or(job.status))
    {
        bus.publish(event).await;
    }

    Ok(job)
}

fn apply_worker_effect(store: &Store, worker_id: &WorkerId, effect: WorkerEffect, completed: bool, failed: bool) {
    let result = store.update_worker(worker_id, |worker: &mut Worker| {
        match effect {
            WorkerEffect::SetBusy => worker.operational_status = OperationalStatus::Busy,
            WorkerEffect::CoolDown { until } => {
                worker.operational_status = OperationalStatus::CoolingDown;
                worker.cooldown_expires_at = Some(until);
            }
            WorkerEffect::ReleaseAvailable => worker.operational_status = OperationalStatus::Available,
        }
        if completed {
            worker.completed_count += 1;
        }
        if failed {
            worker.failed_count += 1;
        }
        Ok(())
    });
    if let Err(err) = result {
        tracing::warn!(%worker_id, error = %err, "worker side effect failed, ignoring");
    }
}

/// Detach a worker from an `ASSIGNED` job and return it to `PENDING_ASSIGNMENT`.
/// Not in the general transition table: this is an admin escape hatch, not a
/// cleaner-lifecycle step, so it bypasses `transition`'s table check but
/// still requires the job to currently be `ASSIGNED`.
pub async fn unassign(store: &Store, clock: &impl Clock, job_id: &JobId, admin: Actor) -> DispatchResult<Job> {
    let now = clock.utc_now();
    let mut worker_to_release: Option<WorkerId> = None;

    let job = store.update_job(job_id, None, |job| {
        if job.status != JobStatus::Assigned {
            return Err(DispatchError::BadRequest("can only unassign a job in ASSIGNED".into()));
        }
        worker_to_release = job.worker_id.take();
        job.status = JobStatus::PendingAssignment;
        job.push_history(Some(JobStatus::Assigned), admin.clone(), "Unassigned by admin".into(), now);
        Ok(true)
    })?;

    if let Some(worker_id) = worker_to_release {
        apply_worker_effect(store, &worker_id, WorkerEffect::ReleaseAvailable, false, false);
    }

    Ok(job)
}

#[cfg(test)]
#[path = "state_machine_tests.rs"]
mod tests;
