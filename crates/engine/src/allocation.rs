// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Candidate scoring and commit-with-timeout allocation (spec §4.2).

use crate::state_machine::{transition, TransitionRequest};
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use dispatch_adapters::{Cache, EventBus, WalletSink};
use dispatch_core::{Actor, AllocationConfig, Clock, DispatchError, DispatchResult, Job, JobId, MonitorConfig, Region, Worker, WorkerId};
use dispatch_storage::Store;
use std::collections::HashMap;
use std::time::Duration;

const METRICS_TTL: Duration = Duration::from_secs(24 * 3600);

const EARTH_RADIUS_KM: f64 = 6371.0;
const MAX_DISTANCE_KM: f64 = 50.0;
/// Rating used for scoring a worker who hasn't completed a job yet, below
/// the 5.0 shown to customers, so an untested worker doesn't automatically
/// outrank an experienced one at the top of an empty queue.
const MISSING_RATING_FALLBACK: f64 = 4.0;

fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[derive(Debug, Clone)]
struct Scored {
    worker: Worker,
    total: f64,
}

/// Which region tier a non-empty candidate set was found in, so the caller
/// can report `region_expanded`/`fallback_used` on the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TierKind {
    Home,
    Adjacent,
    AnyRegion,
}

/// Candidate set for `job`, plus which tier it came from. Empty candidates
/// means even the widest enabled tier had nobody available.
fn candidate_pool(store: &Store, job: &Job, config: &AllocationConfig) -> (Vec<Worker>, TierKind) {
    let window_start = job.scheduled_date;
    let window_end = window_start + ChronoDuration::milliseconds((job.duration_hours * 3_600_000.0) as i64);
    let home = job.address.region;

    let mut region_tiers: Vec<(TierKind, Vec<Region>)> = vec![(TierKind::Home, vec![home])];
    if config.expand_to_adjacent_regions {
        region_tiers.push((TierKind::Adjacent, home.adjacent().to_vec()));
    }
    if config.fallback_to_any_region {
        region_tiers.push((TierKind::AnyRegion, Region::ALL.to_vec()));
    }

    store.read(|state| {
        for (kind, tier) in &region_tiers {
            let mut found: Vec<Worker> = Vec::new();
            for region in tier {
                found.extend(
                    state
                        .candidates_without_conflict(*region, window_start, window_end, &job.id)
                        .into_iter()
                        .cloned(),
                );
            }
            if !found.is_empty() {
                found.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string()));
                found.dedup_by(|a, b| a.id == b.id);
                return (found, *kind);
            }
        }
        (Vec::new(), TierKind::Home)
    })
}

fn score_candidates(store: &Store, job: &Job, candidates: Vec<Worker>, config: &AllocationConfig) -> Vec<Scored> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut last_completion: HashMap<WorkerId, Option<DateTime<Utc>>> = HashMap::new();
    for region in candidates.iter().map(|w| w.region).collect::<std::collections::HashSet<_>>() {
        for (worker_id, last) in store.read(|state| state.last_completion_by_worker(region)) {
            last_completion.insert(worker_id, last);
        }
    }

    let mut ranked: Vec<&Worker> = candidates.iter().collect();
    ranked.sort_by_key(|w| last_completion.get(&w.id).copied().flatten().unwrap_or(DateTime::<Utc>::MIN_UTC));
    let queue_position: HashMap<WorkerId, usize> =
        ranked.iter().enumerate().map(|(pos, w)| (w.id.clone(), pos)).collect();
    let pool_size = candidates.len() as f64;

    let job_coords = job.address.region.coordinates();

    candidates
        .into_iter()
        .map(|worker| {
            let position = *queue_position.get(&worker.id).unwrap_or(&0) as f64;
            let queue_score = 1.0 - position / pool_size;

            let distance_km = haversine_km(job_coords, worker.region.coordinates());
            let distance_score = (1.0 - distance_km / MAX_DISTANCE_KM).max(0.0);

            let rating = if worker.completed_count == 0 { MISSING_RATING_FALLBACK } else { worker.rating };
            let rating_score = rating / 5.0;

            let total = config.queue_weight * queue_score
                + config.distance_weight * distance_score
                + config.rating_weight * rating_score;

            Scored { worker, total }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    pub job: Job,
    pub worker_id: WorkerId,
    pub score: f64,
    pub candidates_considered: usize,
    pub candidates_tried: usize,
    pub elapsed_ms: u64,
    /// Candidate set came from the adjacent-region or system-wide tier
    /// rather than the job's home region.
    pub region_expanded: bool,
    /// Candidate set came from the system-wide fallback tier.
    pub fallback_used: bool,
}

/// Per-`(region, date)` allocation counters (spec §3): monotonic counts
/// plus a rolling mean commit time, kept in the `allocation:metrics:*` hash.
#[derive(Debug, Clone, Default)]
pub struct AllocationMetrics {
    pub total_allocations: u64,
    pub successful: u64,
    pub failed: u64,
    pub avg_time_ms: u64,
}

fn metrics_key(region: Region, date: NaiveDate) -> String {
    format!("allocation:metrics:{}:{}", region.code().to_ascii_lowercase(), date.format("%Y-%m-%d"))
}

/// Step 6: increment `total_allocations`, and either roll `successful` /
/// `avg_time_ms` forward or increment `failed`, refreshing the key's TTL.
async fn record_metrics<Ca: Cache>(cache: &Ca, region: Region, date: NaiveDate, elapsed_ms: Option<u64>) {
    let key = metrics_key(region, date);
    let _ = cache.hincrby(&key, "total_allocations", 1).await;
    match elapsed_ms {
        Some(elapsed_ms) => {
            let successful = cache.hincrby(&key, "successful", 1).await.unwrap_or(1).max(1);
            let prior_avg: i64 =
                cache.hget(&key, "avg_time_ms").await.ok().flatten().and_then(|v| v.parse().ok()).unwrap_or(0);
            let next_avg = prior_avg + (elapsed_ms as i64 - prior_avg) / successful;
            let _ = cache.hset(&key, "avg_time_ms", next_avg.to_string()).await;
        }
        None => {
            let _ = cache.hincrby(&key, "failed", 1).await;
        }
    }
    let _ = cache.expire(&key, METRICS_TTL).await;
}

/// Read the `(region, date)` allocation metrics snapshot, defaulting
/// unseen counters to zero rather than erroring.
pub async fn allocation_metrics<Ca: Cache>(cache: &Ca, region: Region, date: NaiveDate) -> AllocationMetrics {
    let key = metrics_key(region, date);
    async fn field<Ca: Cache>(cache: &Ca, key: &str, name: &str) -> u64 {
        cache.hget(key, name).await.ok().flatten().and_then(|v| v.parse().ok()).unwrap_or(0)
    }
    AllocationMetrics {
        total_allocations: field(cache, &key, "total_allocations").await,
        successful: field(cache, &key, "successful").await,
        failed: field(cache, &key, "failed").await,
        avg_time_ms: field(cache, &key, "avg_time_ms").await,
    }
}

/// Score and commit a worker to `job_id`. Tries up to
/// `config.max_candidates_to_try` candidates, highest score first, each
/// under `config.assignment_timeout_seconds`; moves to the next candidate
/// if a commit is rejected (the worker went unavailable in the meantime) or
/// times out. Always records the attempt in the region's allocation metrics,
/// win or lose.
#[allow(clippy::too_many_arguments)]
pub async fn allocate<B, W, C, Ca>(
    store: &Store,
    clock: &C,
    bus: &B,
    wallet: &W,
    cache: &Ca,
    allocation_config: &AllocationConfig,
    monitor_config: &MonitorConfig,
    job_id: &JobId,
) -> DispatchResult<AllocationOutcome>
where
    B: EventBus,
    W: WalletSink,
    C: Clock,
    Ca: Cache,
{
    let start_ms = clock.epoch_ms();
    let job = store.get_job(job_id).ok_or_else(|| DispatchError::NotFound(format!("job {job_id}")))?;
    let region = job.address.region;
    let today = clock.utc_now().date_naive();

    let (candidates, tier) = candidate_pool(store, &job, allocation_config);
    let region_expanded = tier != TierKind::Home;
    let fallback_used = tier == TierKind::AnyRegion;
    if candidates.is_empty() {
        record_metrics(cache, region, today, None).await;
        return Err(DispatchError::Unavailable("no available cleaners".to_string()));
    }
    let candidates_considered = candidates.len();

    let mut scored = score_candidates(store, &job, candidates, allocation_config);
    scored.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(allocation_config.max_candidates_to_try);

    let deadline = Duration::from_secs(allocation_config.assignment_timeout_seconds);
    let mut candidates_tried = 0;
    let mut last_err = DispatchError::Unavailable("all candidates rejected or timed out".to_string());

    for candidate in &scored {
        candidates_tried += 1;
        let request = TransitionRequest::new(job_id.clone(), dispatch_core::JobStatus::Assigned, Actor::System)
            .assign_worker(candidate.worker.id.clone());

        let attempt = tokio::time::timeout(deadline, transition(store, clock, bus, wallet, monitor_config, request)).await;
        match attempt {
            Ok(Ok(updated_job)) => {
                tracing::info!(job_id = %job_id, worker_id = %candidate.worker.id, score = candidate.total, "allocation committed");
                let elapsed_ms = clock.epoch_ms().saturating_sub(start_ms);
                record_metrics(cache, region, today, Some(elapsed_ms)).await;
                return Ok(AllocationOutcome {
                    job: updated_job,
                    worker_id: candidate.worker.id.clone(),
                    score: candidate.total,
                    candidates_considered,
                    candidates_tried,
                    elapsed_ms,
                    region_expanded,
                    fallback_used,
                });
            }
            Ok(Err(err)) => {
                tracing::warn!(job_id = %job_id, worker_id = %candidate.worker.id, error = %err, "allocation candidate rejected");
                last_err = err;
            }
            Err(_) => {
                tracing::warn!(job_id = %job_id, worker_id = %candidate.worker.id, "allocation candidate commit timed out");
                last_err = DispatchError::Unavailable(format!("commit to worker {} timed out", candidate.worker.id));
            }
        }
    }

    record_metrics(cache, region, today, None).await;
    Err(last_err)
}

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod tests;
