// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic pricing: utilization-based demand multiplier, days-ahead rush
//! premium, discount, and tax, composed into a final quote (spec §4.4).

use chrono::{DateTime, Utc};
use dispatch_core::{CustomerId, DiscountCode, DispatchError, DispatchResult, Money, PricingConfig, PricingSnapshot};

/// Everything `quote` needs to price one booking.
#[derive(Debug, Clone)]
pub struct PricingInput<'a> {
    pub customer: &'a CustomerId,
    pub subtotal: Money,
    pub scheduled_date: DateTime<Utc>,
    pub now: DateTime<Utc>,
    pub utilization: f64,
    pub discount: Option<&'a DiscountCode>,
    pub prior_discount_uses_by_customer: u32,
}

fn demand_multiplier(utilization: f64) -> (f64, &'static str) {
    if utilization <= 0.50 {
        (1.00, "standard")
    } else if utilization <= 0.70 {
        (1.02, "moderate")
    } else if utilization <= 0.85 {
        (1.05, "high")
    } else {
        (1.10, "peak")
    }
}

fn rush_premium(scheduled_date: DateTime<Utc>, now: DateTime<Utc>) -> (f64, &'static str) {
    let days_ahead = (scheduled_date.date_naive() - now.date_naive()).num_days();
    if days_ahead <= 0 {
        (1.25, "same_day")
    } else if days_ahead == 1 {
        (1.15, "next_day")
    } else if days_ahead <= 3 {
        (1.05, "within_3_days")
    } else {
        (1.00, "none")
    }
}

/// Compose the demand multiplier, rush premium, discount, and tax into a
/// final quote. The discount's eligibility checks and percentage/cap
/// computation run against the pre-demand/rush subtotal, then the resulting
/// amount is subtracted from the demand/rush-adjusted subtotal.
pub fn quote(input: PricingInput<'_>, config: &PricingConfig) -> DispatchResult<PricingSnapshot> {
    let (demand_multiplier, pricing_tier) = demand_multiplier(input.utilization);
    let (rush_premium, rush_tier) = rush_premium(input.scheduled_date, input.now);

    let adjusted_subtotal = input.subtotal.scale(demand_multiplier * rush_premium);

    let discount = match input.discount {
        Some(code) => code
            .apply(input.customer, input.subtotal, input.now, input.prior_discount_uses_by_customer)
            .map_err(DispatchError::BadRequest)?,
        None => Money::ZERO,
    };

    let taxable = (adjusted_subtotal - discount).clamp_non_negative();
    let tax = taxable.scale(config.tax_rate);
    let total = taxable + tax;

    Ok(PricingSnapshot {
        base: input.subtotal,
        size_adjustment: Money::ZERO,
        add_ons: Money::ZERO,
        discount,
        tax,
        total,
        demand_multiplier,
        rush_premium,
        utilization_at_booking: input.utilization,
        pricing_tier: pricing_tier.to_string(),
        rush_tier: rush_tier.to_string(),
    })
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
