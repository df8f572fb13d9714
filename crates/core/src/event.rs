// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed events published by the state machine, allocation engine, and
//! SLA monitor (spec §4.5).

use crate::booking::{BookingNumber, Region};
use crate::ids::{CustomerId, JobId, WorkerId};
use crate::job::JobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serializes as `{"type": "JOB_CREATED", ...}` using SCREAMING_SNAKE_CASE
/// event-type identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DispatchEvent {
    #[serde(rename = "JOB_CREATED")]
    JobCreated { job_id: JobId, booking_number: BookingNumber, customer_id: CustomerId, at: DateTime<Utc> },

    #[serde(rename = "JOB_ASSIGNED")]
    JobAssigned { job_id: JobId, booking_number: BookingNumber, worker_id: WorkerId, at: DateTime<Utc> },

    #[serde(rename = "JOB_STARTED")]
    JobStarted { job_id: JobId, booking_number: BookingNumber, worker_id: WorkerId, at: DateTime<Utc> },

    #[serde(rename = "JOB_PAUSED")]
    JobPaused { job_id: JobId, booking_number: BookingNumber, at: DateTime<Utc> },

    #[serde(rename = "JOB_RESUMED")]
    JobResumed { job_id: JobId, booking_number: BookingNumber, at: DateTime<Utc> },

    #[serde(rename = "JOB_COMPLETED")]
    JobCompleted { job_id: JobId, booking_number: BookingNumber, worker_id: WorkerId, at: DateTime<Utc> },

    #[serde(rename = "JOB_CANCELLED")]
    JobCancelled { job_id: JobId, booking_number: BookingNumber, reason: String, at: DateTime<Utc> },

    #[serde(rename = "JOB_FAILED")]
    JobFailed { job_id: JobId, booking_number: BookingNumber, reason: String, at: DateTime<Utc> },

    #[serde(rename = "JOB_DELAYED")]
    JobDelayed {
        job_id: JobId,
        booking_number: BookingNumber,
        previous_status: JobStatus,
        worker_id: Option<WorkerId>,
        delay_minutes: i64,
        at: DateTime<Utc>,
    },

    #[serde(rename = "CLEANER_ONLINE")]
    CleanerOnline { worker_id: WorkerId, at: DateTime<Utc> },

    #[serde(rename = "CLEANER_OFFLINE")]
    CleanerOffline { worker_id: WorkerId, at: DateTime<Utc> },

    #[serde(rename = "CLEANER_STATUS_CHANGED")]
    CleanerStatusChanged { worker_id: WorkerId, status: String, at: DateTime<Utc> },

    #[serde(rename = "CLEANER_OFFLINE_ALERT")]
    CleanerOfflineAlert { worker_id: WorkerId, job_id: JobId, severity: String, at: DateTime<Utc> },

    #[serde(rename = "STATS_UPDATED")]
    StatsUpdated { region: Region, at: DateTime<Utc> },

    #[serde(rename = "ADMIN_ALERT")]
    AdminAlert { message: String, job_id: Option<JobId>, severity: String, at: DateTime<Utc> },
}

impl DispatchEvent {
    pub fn job_id(&self) -> Option<&JobId> {
        use DispatchEvent::*;
        match self {
            JobCreated { job_id, .. }
            | JobAssigned { job_id, .. }
            | JobStarted { job_id, .. }
            | JobPaused { job_id, .. }
            | JobResumed { job_id, .. }
            | JobCompleted { job_id, .. }
            | JobCancelled { job_id, .. }
            | JobFailed { job_id, .. }
            | JobDelayed { job_id, .. } => Some(job_id),
            CleanerOfflineAlert { job_id, .. } => Some(job_id),
            AdminAlert { job_id, .. } => job_id.as_ref(),
            CleanerOnline { .. } | CleanerOffline { .. } | CleanerStatusChanged { .. } | StatsUpdated { .. } => None,
        }
    }

    pub fn log_summary(&self) -> String {
        use DispatchEvent::*;
        match self {
            JobCreated { booking_number, .. } => format!("job created {booking_number}"),
            JobAssigned { booking_number, worker_id, .. } => format!("job {booking_number} assigned to {worker_id}"),
            JobStarted { booking_number, .. } => format!("job {booking_number} started"),
            JobPaused { booking_number, .. } => format!("job {booking_number} paused"),
            JobResumed { booking_number, .. } => format!("job {booking_number} resumed"),
            JobCompleted { booking_number, .. } => format!("job {booking_number} completed"),
            JobCancelled { booking_number, reason, .. } => format!("job {booking_number} cancelled: {reason}"),
            JobFailed { booking_number, reason, .. } => format!("job {booking_number} failed: {reason}"),
            JobDelayed { booking_number, delay_minutes, .. } => {
                format!("job {booking_number} delayed by {delay_minutes}m")
            }
            CleanerOnline { worker_id, .. } => format!("worker {worker_id} online"),
            CleanerOffline { worker_id, .. } => format!("worker {worker_id} offline"),
            CleanerStatusChanged { worker_id, status, .. } => format!("worker {worker_id} -> {status}"),
            CleanerOfflineAlert { worker_id, job_id, .. } => format!("worker {worker_id} offline with active job {job_id}"),
            StatsUpdated { region, .. } => format!("stats updated for {region}"),
            AdminAlert { message, .. } => format!("admin alert: {message}"),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
