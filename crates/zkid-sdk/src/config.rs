// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Persisted configuration.
//!
//! Stored as JSON at `~/.zkid/config.json`; a missing file means defaults.
//! [`load_config`] additionally applies environment overrides:
//!
//! | Variable | Field |
//! |---|---|
//! | `ZKID_REGISTRY_URL` | `registry_url` |
//! | `ZKID_REGISTRY_TIMEOUT_SECS` | `registry_timeout_secs` |
//! | `ZKID_CIRCUITS_DIR` | `circuits_dir` |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chain::{AssemblyOptions, ChainPolicy};
use crate::error::{ZkIdError, ZkIdResult};

pub const DEFAULT_REGISTRY_URL: &str = "https://circuits.zkpassport.id";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Keys accepted by [`SdkConfig::set`].
pub const ALLOWED_KEYS: &[&str] = &[
    "registry_url",
    "registry_timeout_secs",
    "circuits_dir",
    "chain_policy",
    "require_exact_count",
];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SdkConfig {
    pub registry_url: String,
    pub registry_timeout_secs: u64,
    pub circuits_dir: Option<PathBuf>,
    pub chain_policy: ChainPolicy,
    pub require_exact_count: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            registry_timeout_secs: DEFAULT_TIMEOUT_SECS,
            circuits_dir: None,
            chain_policy: ChainPolicy::Observe,
            require_exact_count: false,
        }
    }
}

impl SdkConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.registry_timeout_secs)
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            chain_policy: self.chain_policy,
            require_exact_count: self.require_exact_count,
            expected_zk_id: None,
        }
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> ZkIdResult<Self> {
        if let Some(url) = lookup("ZKID_REGISTRY_URL") {
            self.registry_url = url;
        }
        if let Some(secs) = lookup("ZKID_REGISTRY_TIMEOUT_SECS") {
            self.registry_timeout_secs = parse_secs(&secs)?;
        }
        if let Some(dir) = lookup("ZKID_CIRCUITS_DIR") {
            self.circuits_dir = Some(PathBuf::from(dir));
        }
        Ok(self)
    }

    pub fn set(&mut self, key: &str, value: &str) -> ZkIdResult<()> {
        match key {
            "registry_url" => self.registry_url = value.to_string(),
            "registry_timeout_secs" => self.registry_timeout_secs = parse_secs(value)?,
            "circuits_dir" => {
                self.circuits_dir = match value {
                    "" | "none" => None,
                    dir => Some(PathBuf::from(dir)),
                }
            }
            "chain_policy" => {
                self.chain_policy = match value {
                    "observe" => ChainPolicy::Observe,
                    "enforce" => ChainPolicy::Enforce,
                    other => {
                        return Err(ZkIdError::Config(format!(
                            "chain_policy must be observe or enforce, got {other:?}"
                        )))
                    }
                }
            }
            "require_exact_count" => {
                self.require_exact_count = value.parse().map_err(|_| {
                    ZkIdError::Config(format!("require_exact_count must be true or false, got {value:?}"))
                })?
            }
            other => {
                return Err(ZkIdError::Config(format!(
                    "unknown config key {other:?} (allowed: {})",
                    ALLOWED_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_secs(value: &str) -> ZkIdResult<u64> {
    match value.parse::<u64>() {
        Ok(0) | Err(_) => Err(ZkIdError::Config(format!(
            "registry timeout must be a positive number of seconds, got {value:?}"
        ))),
        Ok(secs) => Ok(secs),
    }
}

pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".zkid").join("config.json"))
}

/// File contents only, no environment overrides.
pub fn load_config_from(path: &Path) -> Result<SdkConfig> {
    if !path.exists() {
        return Ok(SdkConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read config at {}", path.display()))?;
    serde_json::from_str(&data).context("invalid config JSON")
}

pub fn save_config_to(path: &Path, config: &SdkConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

/// `~/.zkid/config.json` plus environment overrides.
pub fn load_config() -> Result<SdkConfig> {
    let config = load_config_from(&config_path()?)?;
    Ok(config.with_overrides(|key| std::env::var(key).ok())?)
}

pub fn save_config(config: &SdkConfig) -> Result<()> {
    save_config_to(&config_path()?, config)
}
