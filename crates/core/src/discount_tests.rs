// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Duration;

fn percent_code() -> DiscountCode {
    DiscountCode {
        code: "SAVE10".into(),
        kind: DiscountKind::Percentage(10),
        valid_from: None,
        valid_until: None,
        max_uses: None,
        uses_count: 0,
        max_uses_per_customer: None,
        min_order_amount: None,
    }
}

#[test]
fn percentage_discount_is_computed_on_subtotal() {
    let code = percent_code();
    let customer = CustomerId::new("c1");
    let discount = code.apply(&customer, Money::from_cents(10000), Utc::now(), 0).unwrap();
    assert_eq!(discount, Money::from_cents(1000));
}

#[test]
fn expired_code_is_rejected() {
    let mut code = percent_code();
    code.valid_until = Some(Utc::now() - Duration::days(1));
    let customer = CustomerId::new("c1");
    assert!(code.apply(&customer, Money::from_cents(10000), Utc::now(), 0).is_err());
}

#[test]
fn per_customer_cap_is_enforced() {
    let mut code = percent_code();
    code.max_uses_per_customer = Some(1);
    let customer = CustomerId::new("c1");
    assert!(code.apply(&customer, Money::from_cents(10000), Utc::now(), 1).is_err());
    assert!(code.apply(&customer, Money::from_cents(10000), Utc::now(), 0).is_ok());
}

#[test]
fn discount_never_exceeds_subtotal() {
    let code = DiscountCode {
        kind: DiscountKind::FixedAmount(Money::from_cents(100_000)),
        ..percent_code()
    };
    let customer = CustomerId::new("c1");
    let discount = code.apply(&customer, Money::from_cents(5000), Utc::now(), 0).unwrap();
    assert_eq!(discount, Money::from_cents(5000));
}

#[test]
fn minimum_order_amount_enforced() {
    let mut code = percent_code();
    code.min_order_amount = Some(Money::from_cents(20000));
    let customer = CustomerId::new("c1");
    assert!(code.apply(&customer, Money::from_cents(10000), Utc::now(), 0).is_err());
}
