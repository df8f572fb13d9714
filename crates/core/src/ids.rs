// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque identifiers for the core aggregates.
//!
//! A `Job`/`Worker`'s durable identity is its numeric id; these wrap that
//! identity in a typed, prefixed string so the two can never be confused
//! at a call site. Human-facing identifiers (`BookingNumber`, `EmployeeId`)
//! live in [`crate::booking`].

crate::define_id! {
    /// Opaque identity of a [`crate::job::Job`].
    pub struct JobId("job-");
}

crate::define_id! {
    /// Opaque identity of a [`crate::worker::Worker`].
    pub struct WorkerId("wrk-");
}

/// Identity of the actor who initiated an action (customer, worker, admin id, or blank for system).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
