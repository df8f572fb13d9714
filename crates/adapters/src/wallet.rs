// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wallet credit/debit side effects triggered by the state machine
//! (cashback on completion, refund on cancellation, referral credit).
//!
//! Wallet/referral *accounting* — ledger correctness, balance queries — is
//! out of scope (spec §1); this core only needs to fire a narrow,
//! best-effort credit/debit call and move on.

use async_trait::async_trait;
use dispatch_core::ids::CustomerId;
use dispatch_core::money::Money;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet operation failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait WalletSink: Send + Sync + 'static {
    async fn credit(&self, customer: &CustomerId, amount: Money, reason: &str) -> Result<(), WalletError>;
}

/// Stands in for a real wallet-service client. This core has no outbound
/// HTTP stack of its own (spec §1 names the wallet ledger an external
/// collaborator), so the default production adapter just logs the credit
/// it would have issued; a deployment that needs the call to actually land
/// swaps in a `WalletSink` backed by its own HTTP client.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingWalletSink;

#[async_trait]
impl WalletSink for LoggingWalletSink {
    async fn credit(&self, customer: &CustomerId, amount: Money, reason: &str) -> Result<(), WalletError> {
        tracing::info!(%customer, %amount, reason, "wallet credit (logged, not dispatched)");
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::{CustomerId, Money, WalletError, WalletSink};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Debug, Clone)]
    pub struct CreditCall {
        pub customer: CustomerId,
        pub amount: Money,
        pub reason: String,
    }

    #[derive(Default)]
    pub struct RecordingWalletSink {
        calls: Mutex<Vec<CreditCall>>,
    }

    impl RecordingWalletSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<CreditCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl WalletSink for RecordingWalletSink {
        async fn credit(&self, customer: &CustomerId, amount: Money, reason: &str) -> Result<(), WalletError> {
            self.calls.lock().push(CreditCall { customer: customer.clone(), amount, reason: reason.to_string() });
            Ok(())
        }
    }

    /// Always fails, for exercising the "logged and swallowed" path.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FailingWalletSink;

    #[async_trait]
    impl WalletSink for FailingWalletSink {
        async fn credit(&self, _customer: &CustomerId, _amount: Money, _reason: &str) -> Result<(), WalletError> {
            Err(WalletError::Failed("simulated wallet outage".into()))
        }
    }
}

#[cfg(test)]
#[path = "wallet_tests.rs"]
mod tests;
