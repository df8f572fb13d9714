// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide configuration, loaded from a TOML file with defaults
//! matching spec §5/§6.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub queue_weight: f64,
    pub distance_weight: f64,
    pub rating_weight: f64,
    pub assignment_timeout_seconds: u64,
    pub max_candidates_to_try: usize,
    pub queue_ttl_seconds: u64,
    pub expand_to_adjacent_regions: bool,
    pub fallback_to_any_region: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            queue_weight: 0.40,
            distance_weight: 0.30,
            rating_weight: 0.30,
            assignment_timeout_seconds: 3,
            max_candidates_to_try: 5,
            queue_ttl_seconds: 3600,
            expand_to_adjacent_regions: true,
            fallback_to_any_region: true,
        }
    }
}

impl AllocationConfig {
    pub fn weights_sum_to_one(&self) -> bool {
        (self.queue_weight + self.distance_weight + self.rating_weight - 1.0).abs() < 1e-9
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub tax_rate: f64,
    pub working_hours_per_worker: u32,
    pub utilization_cache_ttl_seconds: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.05,
            working_hours_per_worker: 8,
            utilization_cache_ttl_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub start_sla_interval_seconds: u64,
    pub cooldown_release_interval_seconds: u64,
    pub payment_timeout_interval_seconds: u64,
    pub offline_check_interval_seconds: u64,
    pub payment_timeout_minutes: i64,
    pub cleaner_cooldown_minutes: i64,
    pub paused_job_limit_minutes: i64,
    pub orphan_job_hours: i64,
    pub sla_start_threshold_minutes: i64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            start_sla_interval_seconds: 30,
            cooldown_release_interval_seconds: 60,
            payment_timeout_interval_seconds: 300,
            offline_check_interval_seconds: 120,
            payment_timeout_minutes: 15,
            cleaner_cooldown_minutes: 15,
            paused_job_limit_minutes: 30,
            orphan_job_hours: 4,
            sla_start_threshold_minutes: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub allocation: AllocationConfig,
    pub pricing: PricingConfig,
    pub monitor: MonitorConfig,
}

pub struct DispatchConfigBuilder {
    config: DispatchConfig,
}

impl DispatchConfig {
    pub fn builder() -> DispatchConfigBuilder {
        DispatchConfigBuilder { config: DispatchConfig::default() }
    }

    /// Parse from a TOML document; unspecified fields fall back to defaults.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

impl DispatchConfigBuilder {
    pub fn allocation(mut self, allocation: AllocationConfig) -> Self {
        self.config.allocation = allocation;
        self
    }

    pub fn pricing(mut self, pricing: PricingConfig) -> Self {
        self.config.pricing = pricing;
        self
    }

    pub fn monitor(mut self, monitor: MonitorConfig) -> Self {
        self.config.monitor = monitor;
        self
    }

    pub fn build(self) -> DispatchConfig {
        self.config
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
