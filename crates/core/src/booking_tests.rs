// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn employee_id_format_roundtrips() {
    let id = EmployeeId::new(Region::Dxb, "2601", 42);
    assert_eq!(id.as_str(), "CLN-DXB-2601-00042");
    let (region, ym, seq) = EmployeeId::parse(id.as_str()).unwrap();
    assert_eq!(region, Region::Dxb);
    assert_eq!(ym, "2601");
    assert_eq!(seq, 42);
}

#[test]
fn employee_id_rejects_malformed_input() {
    assert!(!EmployeeId::is_valid("CLN-XXX-2601-00042"));
    assert!(!EmployeeId::is_valid("CLN-DXB-26-00042"));
    assert!(!EmployeeId::is_valid("CLN-DXB-2601-42"));
    assert!(!EmployeeId::is_valid("not-an-id"));
}

#[test]
fn booking_number_format() {
    use chrono::TimeZone;
    let ts = chrono::Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).unwrap();
    let number = BookingNumber::new(ts, "a1b2c3");
    assert_eq!(number.as_str(), "BH260305A1B2C3");
}

#[test]
fn region_adjacency_is_symmetric_where_expected() {
    assert!(Region::Dxb.adjacent().contains(&Region::Shj));
    assert!(Region::Shj.adjacent().contains(&Region::Dxb));
    assert!(Region::Auh.adjacent().is_empty());
}
