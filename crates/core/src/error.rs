// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain error kinds shared by the state machine, allocation engine,
//! pricing helper, and SLA monitor.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("concurrent modification: expected version {expected}, found {actual}")]
    ConcurrentModification { expected: u32, actual: u32 },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("rate limited")]
    RateLimited,

    #[error("unavailable: {0}")]
    Unavailable(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
