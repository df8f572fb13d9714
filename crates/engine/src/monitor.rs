// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SLA monitor: four independent cancellable periodic loops that enforce
//! time-based rules over job and worker state (spec §4.3).

use crate::state_machine::{transition, TransitionRequest};
use chrono::{Duration as ChronoDuration, Utc};
use dispatch_adapters::{EventBus, WalletSink};
use dispatch_core::{Actor, Clock, DispatchEvent, JobStatus, MonitorConfig, OperationalStatus, PaymentStatus};
use dispatch_storage::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Owns the four background loops and their shutdown handle. Dropping a
/// `Monitor` does not stop its loops; call [`Monitor::shutdown`] and await
/// the returned handles to do that cleanly.
pub struct Monitor {
    cancellation: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl Monitor {
    /// Spawn all four loops plus the orphan-job sweep. The SLA monitor acts
    /// as the `System` actor wherever it drives a transition.
    pub fn spawn<B, W, C>(store: Arc<Store>, clock: C, bus: Arc<B>, wallet: Arc<W>, config: MonitorConfig) -> Self
    where
        B: EventBus + 'static,
        W: WalletSink + 'static,
        C: Clock + 'static,
    {
        let cancellation = CancellationToken::new();
        let mut handles = Vec::new();

        handles.push(tokio::spawn(start_sla_loop(
            store.clone(),
            clock.clone(),
            bus.clone(),
            cancellation.clone(),
            config.clone(),
        )));
        handles.push(tokio::spawn(cooldown_release_loop(
            store.clone(),
            clock.clone(),
            cancellation.clone(),
            config.clone(),
        )));
        handles.push(tokio::spawn(payment_timeout_loop(
            store.clone(),
            clock.clone(),
            bus.clone(),
            wallet.clone(),
            cancellation.clone(),
            config.clone(),
        )));
        handles.push(tokio::spawn(offline_and_orphan_loop(store, clock, bus, cancellation.clone(), config)));

        Self { cancellation, handles }
    }

    /// Signal every loop to stop and wait for them to exit.
    pub async fn shutdown(self) {
        self.cancellation.cancel();
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

async fn sleep_or_cancel(cancellation: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = cancellation.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

async fn start_sla_loop<B, C>(store: Arc<Store>, clock: C, bus: Arc<B>, cancellation: CancellationToken, config: MonitorConfig)
where
    B: EventBus,
    C: Clock,
{
    let interval = Duration::from_secs(config.start_sla_interval_seconds);
    while sleep_or_cancel(&cancellation, interval).await {
        let now = clock.utc_now();
        let delayed: Vec<_> = store.read(|state| {
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
        });

        for job in delayed {
            let Some(deadline) = job.sla_deadline else { continue };
            let delay_minutes = (now - deadline).num_minutes().max(0);
            bus.publish(DispatchEvent::JobDelayed {
                job_id: job.id.clone(),
                booking_number: job.booking_number.clone(),
                previous_status: job.status,
                worker_id: job.worker_id.clone(),
                delay_minutes,
                at: now,
            })
            .await;
        }
    }
}

async fn cooldown_release_loop<C>(store: Arc<Store>, clock: C, cancellation: CancellationToken, config: MonitorConfig)
where
    C: Clock,
{
    let interval = Duration::from_secs(config.cooldown_release_interval_seconds);
    while sleep_or_cancel(&cancellation, interval).await {
        let now = clock.utc_now();
        let expired: Vec<_> = store.read(|state| state.expired_cooldowns(now).map(|w| w.id.clone()).collect());
        for worker_id in expired {
            let result = store.update_worker(&worker_id, |worker| {
                worker.operational_status = OperationalStatus::Available;
                worker.cooldown_expires_at = None;
                Ok(())
            });
            if let Err(err) = result {
                tracing::warn!(%worker_id, error = %err, "cooldown release failed, ignoring");
            }
        }
    }
}

async fn payment_timeout_loop<B, W, C>(
    store: Arc<Store>,
    clock: C,
    bus: Arc<B>,
    wallet: Arc<W>,
    cancellation: CancellationToken,
    config: MonitorConfig,
) where
    B: EventBus,
    W: WalletSink,
    C: Clock,
{
    let interval = Duration::from_secs(config.payment_timeout_interval_seconds);
    while sleep_or_cancel(&cancellation, interval).await {
        let now = clock.utc_now();
        let threshold = ChronoDuration::minutes(config.payment_timeout_minutes);
        let timed_out: Vec<_> = store.read(|state| {
            state
                .jobs_with_status(JobStatus::Pending)
                .filter(|job| job.payment_status == PaymentStatus::Pending)
                .filter(|job| now - job.created_at > threshold)
                .map(|job| job.id.clone())
                .collect()
        });

        for job_id in timed_out {
            let request = TransitionRequest::new(job_id.clone(), JobStatus::Cancelled, Actor::System)
                .reason("Payment timeout");
            if let Err(err) = transition(&store, &clock, bus.as_ref(), wallet.as_ref(), &config, request).await {
                tracing::warn!(%job_id, error = %err, "payment timeout cancellation failed, ignoring");
            }
        }
    }
}

async fn offline_and_orphan_loop<B, C>(
    store: Arc<Store>,
    clock: C,
    bus: Arc<B>,
    cancellation: CancellationToken,
    config: MonitorConfig,
) where
    B: EventBus,
    C: Clock,
{
    let interval = Duration::from_secs(config.offline_check_interval_seconds);
    while sleep_or_cancel(&cancellation, interval).await {
        let now = clock.utc_now();
        let orphan_threshold = ChronoDuration::hours(config.orphan_job_hours);

        let (offline_alerts, orphans): (Vec<_>, Vec<_>) = store.read(|state| {
            let mut offline_alerts = Vec::new();
            let mut orphans = Vec::new();
            for job in state.jobs_with_status(JobStatus::InProgress) {
                let worker_offline = job
                    .worker_id
                    .as_ref()
                    .and_then(|id| state.get_worker(id))
                    .is_some_and(|w| w.operational_status == OperationalStatus::Offline);
                if worker_offline {
                    offline_alerts.push(job.id.clone());
                }
                if let Some(start) = job.actual_start_time {
                    if now - start > orphan_threshold {
                        orphans.push(job.id.clone());
                    }
                }
            }
            (offline_alerts, orphans)
        });

        for job_id in offline_alerts {
            let Some(job) = store.get_job(&job_id) else { continue };
            let Some(worker_id) = job.worker_id.clone() else { continue };
            bus.publish(DispatchEvent::CleanerOfflineAlert {
                worker_id,
                job_id: job.id.clone(),
                severity: "high".into(),
                at: now,
            })
            .await;
        }

        for job_id in orphans {
            bus.publish(DispatchEvent::AdminAlert {
                message: format!("job {job_id} has been IN_PROGRESS for more than {} hours", config.orphan_job_hours),
                job_id: Some(job_id),
                severity: "medium".into(),
                at: now,
            })
            .await;
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
