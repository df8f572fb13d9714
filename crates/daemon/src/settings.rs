// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process configuration: a `DispatchConfig` plus the handful of knobs that
//! only make sense for the standalone process (log directory, config path).

use dispatch_core::DispatchConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub dispatch: DispatchConfig,
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dispatch: DispatchConfig::default(), log_dir: None }
    }
}

impl Settings {
    /// Load `DispatchConfig` from a TOML file, falling back to defaults for
    /// every field the file doesn't set.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Read { path: path.to_path_buf(), source })?;
        let dispatch = DispatchConfig::from_toml(&source).map_err(|source| SettingsError::Parse { path: path.to_path_buf(), source })?;
        Ok(Self { dispatch, log_dir: None })
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
