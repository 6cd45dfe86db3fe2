// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Packaged-circuit lookup by `(version, name)`.
//!
//! Circuits are published as JSON documents at
//! `{base}/versions/{version}/circuits/{name}.json`, each carrying the
//! base64 verification key. [`HostedCircuitRegistry`] fetches them over
//! HTTP, [`LocalCircuitRegistry`] reads the same layout from disk, and
//! [`StaticCircuitRegistry`] holds them in memory.
//!
//! Absence is `Ok(None)`; only transport and parse problems are errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use zkid_sdk::registry::{CircuitRegistry, HostedCircuitRegistry};
//!
//! # async fn example() -> zkid_sdk::error::ZkIdResult<()> {
//! let registry = HostedCircuitRegistry::new("https://circuits.zkpassport.id", Duration::from_secs(10))?;
//! let circuit = registry.packaged_circuit("0.5.0", "disclose_bytes").await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ZkIdError, ZkIdResult};

/// A published circuit. Only the fields the resolver reads are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagedCircuit {
    pub name: Option<String>,
    pub noir_version: Option<String>,
    pub bb_version: Option<String>,
    /// Base64-encoded verification key.
    pub vkey: Option<String>,
    pub vkey_hash: Option<String>,
}

pub trait CircuitRegistry: Send + Sync {
    fn packaged_circuit(
        &self,
        version: &str,
        name: &str,
    ) -> impl Future<Output = ZkIdResult<Option<PackagedCircuit>>> + Send;
}

/// Relative location of a circuit document.
pub fn circuit_path(version: &str, name: &str) -> ZkIdResult<String> {
    check_component("version", version)?;
    check_component("name", name)?;
    Ok(format!("versions/{version}/circuits/{name}.json"))
}

fn check_component(what: &str, value: &str) -> ZkIdResult<()> {
    if value.is_empty() || value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ZkIdError::Lookup(format!("invalid circuit {what}: {value:?}")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Hosted
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct HostedCircuitRegistry {
    base_url: String,
    http: reqwest::Client,
}

impl HostedCircuitRegistry {
    pub fn new(base_url: &str, timeout: Duration) -> ZkIdResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ZkIdError::Config(format!("http client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl CircuitRegistry for HostedCircuitRegistry {
    async fn packaged_circuit(
        &self,
        version: &str,
        name: &str,
    ) -> ZkIdResult<Option<PackagedCircuit>> {
        let url = format!("{}/{}", self.base_url, circuit_path(version, name)?);
        tracing::debug!(%url, "fetching packaged circuit");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ZkIdError::Lookup(format!("{url}: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ZkIdError::Lookup(format!("{url}: HTTP {status}")));
        }
        resp.json::<PackagedCircuit>()
            .await
            .map(Some)
            .map_err(|e| ZkIdError::Lookup(format!("parse {url}: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Local directory
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct LocalCircuitRegistry {
    root: PathBuf,
}

impl LocalCircuitRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CircuitRegistry for LocalCircuitRegistry {
    async fn packaged_circuit(
        &self,
        version: &str,
        name: &str,
    ) -> ZkIdResult<Option<PackagedCircuit>> {
        let path = self.root.join(circuit_path(version, name)?);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ZkIdError::Lookup(format!("{}: {e}", path.display()))),
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| ZkIdError::Lookup(format!("parse {}: {e}", path.display())))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct StaticCircuitRegistry {
    circuits: HashMap<(String, String), PackagedCircuit>,
}

impl StaticCircuitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, version: &str, name: &str, circuit: PackagedCircuit) {
        self.circuits
            .insert((version.to_string(), name.to_string()), circuit);
    }

    pub fn with(mut self, version: &str, name: &str, circuit: PackagedCircuit) -> Self {
        self.insert(version, name, circuit);
        self
    }
}

impl CircuitRegistry for StaticCircuitRegistry {
    async fn packaged_circuit(
        &self,
        version: &str,
        name: &str,
    ) -> ZkIdResult<Option<PackagedCircuit>> {
        Ok(self
            .circuits
            .get(&(version.to_string(), name.to_string()))
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Configured
// ---------------------------------------------------------------------------

/// Registry picked at runtime from [`SdkConfig`](crate::config::SdkConfig).
#[derive(Clone, Debug)]
pub enum ConfiguredRegistry {
    Hosted(HostedCircuitRegistry),
    Local(LocalCircuitRegistry),
}

impl CircuitRegistry for ConfiguredRegistry {
    async fn packaged_circuit(
        &self,
        version: &str,
        name: &str,
    ) -> ZkIdResult<Option<PackagedCircuit>> {
        match self {
            ConfiguredRegistry::Hosted(r) => r.packaged_circuit(version, name).await,
            ConfiguredRegistry::Local(r) => r.packaged_circuit(version, name).await,
        }
    }
}
