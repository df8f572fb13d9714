// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job aggregate: one scheduled cleaning instance, from creation through
//! a terminal outcome.

use crate::actor::Actor;
use crate::booking::{BookingNumber, Region};
use crate::ids::{CustomerId, JobId, WorkerId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `PENDING_ASSIGNMENT` and `CONFIRMED` are kept distinct rather than merged
/// because the source system uses them inconsistently (see DESIGN.md Open
/// Question 1); both are accepted as `ASSIGNED`'s predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    PendingAssignment,
    Confirmed,
    Assigned,
    InProgress,
    Paused,
    Completed,
    Cancelled,
    Failed,
    Refunded,
    NoShow,
}

crate::simple_display! {
    JobStatus {
        Pending => "PENDING",
        PendingAssignment => "PENDING_ASSIGNMENT",
        Confirmed => "CONFIRMED",
        Assigned => "ASSIGNED",
        InProgress => "IN_PROGRESS",
        Paused => "PAUSED",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
        Failed => "FAILED",
        Refunded => "REFUNDED",
        NoShow => "NO_SHOW",
    }
}

impl JobStatus {
    /// Exhaustive transition table from spec §4.1. Any pair not listed here
    /// fails with `InvalidTransition`.
    pub fn allowed_transitions(&self) -> &'static [JobStatus] {
        use JobStatus::*;
        match self {
            Pending => &[PendingAssignment, Cancelled],
            PendingAssignment => &[Assigned, Cancelled],
            Confirmed => &[Assigned, Cancelled],
            Assigned => &[InProgress, Cancelled],
            InProgress => &[Paused, Completed, Failed, Cancelled],
            Paused => &[InProgress, Failed, Cancelled],
            Cancelled => &[Refunded],
            Failed => &[PendingAssignment],
            Completed | Refunded | NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, to: JobStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Refunded | JobStatus::NoShow)
    }

    pub fn holds_worker(&self) -> bool {
        matches!(self, JobStatus::Assigned | JobStatus::InProgress | JobStatus::Paused)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

crate::simple_display! {
    PaymentStatus {
        Pending => "PENDING",
        Paid => "PAID",
        Refunded => "REFUNDED",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub region: Region,
}

/// The pricing snapshot captured at booking time (spec §3/§4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub base: Money,
    pub size_adjustment: Money,
    pub add_ons: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
    pub demand_multiplier: f64,
    pub rush_premium: f64,
    pub utilization_at_booking: f64,
    pub pricing_tier: String,
    pub rush_tier: String,
}

/// Append-only per-transition row (spec §3 "Status history entry").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub job_id: JobId,
    pub previous_status: Option<JobStatus>,
    pub new_status: JobStatus,
    pub actor: Actor,
    pub reason: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub booking_number: BookingNumber,
    pub customer_id: CustomerId,
    pub worker_id: Option<WorkerId>,
    pub service_ref: String,
    pub address: Address,
    pub scheduled_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub status: JobStatus,
    /// Monotonically increasing optimistic-concurrency token.
    pub version: u32,
    pub payment_status: PaymentStatus,
    pub pricing: PricingSnapshot,

    pub assigned_at: Option<DateTime<Utc>>,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub resumed_at: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<Actor>,

    pub customer_notes: Option<String>,
    pub cleaner_notes: Option<String>,
    pub failure_reason: Option<String>,
    pub cancellation_reason: Option<String>,

    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,

    /// `"{target_status}:{idempotency_key}" -> version observed right after
    /// that call completed`. Scoped to `(job_id, target_status)` per spec §4.1.
    #[serde(default)]
    pub idempotency_log: HashMap<String, u32>,

    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(
        id: JobId,
        booking_number: BookingNumber,
        customer_id: CustomerId,
        service_ref: impl Into<String>,
        address: Address,
        scheduled_date: DateTime<Utc>,
        duration_hours: f64,
        pricing: PricingSnapshot,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            booking_number,
            customer_id,
            worker_id: None,
            service_ref: service_ref.into(),
            address,
            scheduled_date,
            duration_hours,
            status: JobStatus::Pending,
            version: 0,
            payment_status: PaymentStatus::Pending,
            pricing,
            assigned_at: None,
            sla_deadline: None,
            actual_start_time: None,
            paused_at: None,
            resumed_at: None,
            actual_end_time: None,
            failed_at: None,
            cancelled_at: None,
            cancelled_by: None,
            customer_notes: None,
            cleaner_notes: None,
            failure_reason: None,
            cancellation_reason: None,
            status_history: Vec::new(),
            idempotency_log: HashMap::new(),
            created_at: now,
        }
    }

    fn idempotency_scope(status: JobStatus, key: &str) -> String {
        format!("{status}:{key}")
    }

    /// Returns the version recorded for a prior successful call with this
    /// idempotency key against this target status, if any.
    pub fn prior_idempotent_result(&self, status: JobStatus, key: &str) -> Option<u32> {
        self.idempotency_log.get(&Self::idempotency_scope(status, key)).copied()
    }

    pub fn record_idempotency_key(&mut self, status: JobStatus, key: &str) {
        self.idempotency_log.insert(Self::idempotency_scope(status, key), self.version);
    }

    pub fn push_history(&mut self, previous: Option<JobStatus>, actor: Actor, reason: String, at: DateTime<Utc>) {
        self.status_history.push(StatusHistoryEntry {
            job_id: self.id.clone(),
            previous_status: previous,
            new_status: self.status,
            actor,
            reason,
            at,
        });
    }

    pub fn conflicts_with(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        if matches!(self.status, JobStatus::Cancelled | JobStatus::NoShow) {
            return false;
        }
        let my_start = self.scheduled_date;
        let my_end = my_start + chrono::Duration::milliseconds((self.duration_hours * 3_600_000.0) as i64);
        my_start < window_end && window_start < my_end
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
