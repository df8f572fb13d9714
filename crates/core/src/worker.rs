// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker aggregate: an employee eligible to be allocated to jobs.

use crate::booking::{EmployeeId, Region};
use crate::ids::WorkerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A worker's employment standing. Only `Active` workers may be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
    Terminated,
}

crate::simple_display! {
    AccountStatus {
        Active => "active",
        Suspended => "suspended",
        Terminated => "terminated",
    }
}

/// A worker's current availability for allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Available,
    Busy,
    CoolingDown,
    Offline,
}

crate::simple_display! {
    OperationalStatus {
        Available => "available",
        Busy => "busy",
        CoolingDown => "cooling_down",
        Offline => "offline",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub employee_id: EmployeeId,
    pub phone: String,
    pub display_name: String,
    pub region: Region,
    pub account_status: AccountStatus,
    pub operational_status: OperationalStatus,
    /// One decimal place, e.g. 4.9. Defaults to 5.0 for a newly created worker.
    pub rating: f64,
    pub completed_count: u32,
    pub failed_count: u32,
    pub cooldown_expires_at: Option<DateTime<Utc>>,
    /// Opaque pass-through for the legacy `User.cleaner_id` mirror; this core
    /// never reads or writes through it (see DESIGN.md Open Question 4).
    #[serde(default)]
    pub legacy_user_id: Option<String>,
}

impl Worker {
    /// Displayed rating for a worker with no completed jobs yet.
    pub const DEFAULT_DISPLAY_RATING: f64 = 5.0;

    pub fn new(
        id: WorkerId,
        employee_id: EmployeeId,
        phone: impl Into<String>,
        display_name: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            id,
            employee_id,
            phone: phone.into(),
            display_name: display_name.into(),
            region,
            account_status: AccountStatus::Active,
            operational_status: OperationalStatus::Available,
            rating: Self::DEFAULT_DISPLAY_RATING,
            completed_count: 0,
            failed_count: 0,
            cooldown_expires_at: None,
            legacy_user_id: None,
        }
    }

    pub fn is_assignable(&self) -> bool {
        self.account_status == AccountStatus::Active
            && self.operational_status == OperationalStatus::Available
    }

    pub fn cooldown_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.cooldown_expires_at, Some(expiry) if expiry < now)
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
