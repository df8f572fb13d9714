// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-facing identifiers: booking numbers and employee ids, plus the
//! closed set of region codes they're built from.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// One of the seven regions this marketplace operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Dxb,
    Auh,
    Shj,
    Ajm,
    Rak,
    Fuj,
    Uaq,
}

crate::simple_display! {
    Region {
        Dxb => "DXB",
        Auh => "AUH",
        Shj => "SHJ",
        Ajm => "AJM",
        Rak => "RAK",
        Fuj => "FUJ",
        Uaq => "UAQ",
    }
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Dxb,
        Region::Auh,
        Region::Shj,
        Region::Ajm,
        Region::Rak,
        Region::Fuj,
        Region::Uaq,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::Dxb => "DXB",
            Region::Auh => "AUH",
            Region::Shj => "SHJ",
            Region::Ajm => "AJM",
            Region::Rak => "RAK",
            Region::Fuj => "FUJ",
            Region::Uaq => "UAQ",
        }
    }

    pub fn from_code(code: &str) -> Option<Region> {
        match code {
            "DXB" => Some(Region::Dxb),
            "AUH" => Some(Region::Auh),
            "SHJ" => Some(Region::Shj),
            "AJM" => Some(Region::Ajm),
            "RAK" => Some(Region::Rak),
            "FUJ" => Some(Region::Fuj),
            "UAQ" => Some(Region::Uaq),
            _ => None,
        }
    }

    /// Region center coordinates (lat, lng), used by the allocation engine's
    /// Haversine distance score.
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            Region::Dxb => (25.2048, 55.2708),
            Region::Auh => (24.4539, 54.3773),
            Region::Shj => (25.3462, 55.4211),
            Region::Ajm => (25.4052, 55.5136),
            Region::Rak => (25.7895, 55.9432),
            Region::Fuj => (25.1288, 56.3264),
            Region::Uaq => (25.5647, 55.5552),
        }
    }

    /// Statically configured neighbors used for allocation region-fallback.
    pub fn adjacent(&self) -> &'static [Region] {
        match self {
            Region::Dxb => &[Region::Shj, Region::Ajm],
            Region::Shj => &[Region::Dxb, Region::Ajm, Region::Uaq],
            Region::Ajm => &[Region::Dxb, Region::Shj, Region::Uaq],
            Region::Uaq => &[Region::Shj, Region::Ajm, Region::Rak],
            Region::Rak => &[Region::Uaq, Region::Fuj],
            Region::Fuj => &[Region::Rak],
            Region::Auh => &[],
        }
    }
}

/// Globally unique booking reference of the form `BH{yymmdd}{6 hex upper}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingNumber(String);

impl BookingNumber {
    /// Build a booking number for `created_at` using `suffix` as the random hex tail.
    /// `suffix` must already be six uppercase hex characters; callers typically derive
    /// it from a random id generator.
    pub fn new(created_at: chrono::DateTime<chrono::Utc>, suffix: &str) -> Self {
        debug_assert_eq!(suffix.len(), 6);
        Self(format!("BH{}{}", created_at.format("%y%m%d"), suffix.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookingNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for BookingNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Employee id of the form `CLN-{REGION3}-{yymm}-{seq:05d}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub const PREFIX: &'static str = "CLN";

    pub fn new(region: Region, year_month: &str, sequence: u32) -> Self {
        debug_assert_eq!(year_month.len(), 4, "year_month must be yymm");
        Self(format!(
            "{}-{}-{}-{:05}",
            Self::PREFIX,
            region.code(),
            year_month,
            sequence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the region, year-month, and sequence components back out of an employee id.
    pub fn parse(s: &str) -> Option<(Region, String, u32)> {
        let mut parts = s.split('-');
        let prefix = parts.next()?;
        let region_code = parts.next()?;
        let year_month = parts.next()?;
        let seq = parts.next()?;
        if prefix != Self::PREFIX || parts.next().is_some() {
            return None;
        }
        let region = Region::from_code(region_code)?;
        if year_month.len() != 4 || !year_month.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let sequence: u32 = seq.parse().ok()?;
        if seq.len() != 5 {
            return None;
        }
        Some((region, year_month.to_string(), sequence))
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_some()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EmployeeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for EmployeeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "booking_tests.rs"]
mod tests;
