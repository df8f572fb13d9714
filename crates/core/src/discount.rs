// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discount-code validation applied at booking-creation time.
//!
//! This is deliberately narrow: coupon CRUD/issuance stays an external
//! concern (billing/admin), the core only validates and applies a code
//! it is handed.

use crate::ids::CustomerId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountKind {
    Percentage(u8),
    FixedAmount(Money),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCode {
    pub code: String,
    pub kind: DiscountKind,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: Option<u32>,
    pub uses_count: u32,
    pub max_uses_per_customer: Option<u32>,
    pub min_order_amount: Option<Money>,
}

impl DiscountCode {
    /// Validate and compute the discount amount against `subtotal`, applied
    /// before demand/rush pricing (matching the original's call site, where
    /// the discount service runs ahead of the pricing engine).
    pub fn apply(
        &self,
        customer: &CustomerId,
        subtotal: Money,
        now: DateTime<Utc>,
        prior_uses_by_customer: u32,
    ) -> Result<Money, String> {
        let _ = customer;
        if let Some(from) = self.valid_from {
            if now < from {
                return Err("discount code is not yet active".into());
            }
        }
        if let Some(until) = self.valid_until {
            if now > until {
                return Err("discount code has expired".into());
            }
        }
        if let Some(max) = self.max_uses {
            if self.uses_count >= max {
                return Err("discount code has reached its usage limit".into());
            }
        }
        if let Some(max_per_customer) = self.max_uses_per_customer {
            if prior_uses_by_customer >= max_per_customer {
                return Err("discount code already used by this customer".into());
            }
        }
        if let Some(min) = self.min_order_amount {
            if subtotal < min {
                return Err(format!("order does not meet the minimum amount of {min}"));
            }
        }
        let amount = match self.kind {
            DiscountKind::Percentage(pct) => subtotal.scale(pct as f64 / 100.0),
            DiscountKind::FixedAmount(amount) => amount,
        };
        Ok(amount.min(subtotal).clamp_non_negative())
    }
}

#[cfg(test)]
#[path = "discount_tests.rs"]
mod tests;
