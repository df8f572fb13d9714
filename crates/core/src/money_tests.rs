// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::strategies::arb_money;
use proptest::prelude::*;

#[test]
fn formats_with_two_decimals() {
    assert_eq!(Money::from_cents(1050).to_string(), "10.50");
    assert_eq!(Money::from_cents(5).to_string(), "0.05");
    assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
}

#[test]
fn rounds_half_up() {
    // 10.005 -> 10.01, not banker's rounding to 10.00
    assert_eq!(Money::from_decimal(10.005).cents(), 1001);
    assert_eq!(Money::from_decimal(10.004).cents(), 1000);
}

#[test]
fn scale_rounds_half_up() {
    let amount = Money::from_cents(100);
    // 5% of 1.00 = 0.05
    assert_eq!(amount.scale(0.05).cents(), 5);
}

#[test]
fn clamp_non_negative() {
    assert_eq!(Money::from_cents(-10).clamp_non_negative(), Money::ZERO);
    assert_eq!(Money::from_cents(10).clamp_non_negative(), Money::from_cents(10));
}

#[test]
fn arithmetic() {
    let a = Money::from_cents(300);
    let b = Money::from_cents(100);
    assert_eq!(a - b, Money::from_cents(200));
    assert_eq!(a + b, Money::from_cents(400));
    assert_eq!(b * 3, a);
}

proptest! {
    /// Scaling by 1.0 is always a no-op, regardless of amount.
    #[test]
    fn scale_by_one_is_identity(amount in arb_money()) {
        prop_assert_eq!(amount.scale(1.0), amount);
    }

    /// clamp_non_negative never produces a negative amount, and is a no-op
    /// on amounts already non-negative.
    #[test]
    fn clamp_non_negative_never_negative(amount in arb_money()) {
        let clamped = amount.clamp_non_negative();
        prop_assert!(!clamped.is_negative());
        if !amount.is_negative() {
            prop_assert_eq!(clamped, amount);
        }
    }
}
