// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tagged union of who may initiate a job-lifecycle action.
//!
//! Pre-transition guards switch on this tag rather than on separate
//! role-specific call paths.

use crate::ids::{CustomerId, WorkerId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    Customer(CustomerId),
    Worker(WorkerId),
    Admin(String),
    /// The SLA monitor and other background loops, never a human.
    System,
}

impl Actor {
    pub fn as_worker(&self) -> Option<&WorkerId> {
        match self {
            Actor::Worker(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Actor::System)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin(_))
    }

    pub fn log(&self) -> String {
        match self {
            Actor::Customer(id) => format!("customer={id}"),
            Actor::Worker(id) => format!("worker={id}"),
            Actor::Admin(id) => format!("admin={id}"),
            Actor::System => "system".to_string(),
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}

#[cfg(test)]
#[path = "actor_tests.rs"]
mod tests;
