// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! High-level entry point for proof-chain assembly.
//!
//! Bundles a circuit registry, the proving-library seams and the assembly
//! options into one value. The operations themselves live next to their
//! logic: [`vkey`](crate::vkey), [`format`](crate::format) and
//! [`chain`](crate::chain) each add an `impl` block.
//!
//! ```rust,no_run
//! use zkid_sdk::client::ProofChainClient;
//! use zkid_sdk::config::load_config;
//!
//! # async fn example(proofs: Vec<zkid_sdk::ProofResult>) -> anyhow::Result<()> {
//! let client = ProofChainClient::from_config(&load_config()?)?;
//! let assembly = client.assemble_chain(&proofs).await?;
//! println!("zkID {}", assembly.scoped_nullifier);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use crate::backend::{FieldCanonicalizer, HexProofDecoder, ProofDecoder, WordCanonicalizer};
use crate::chain::AssemblyOptions;
use crate::config::{SdkConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::ZkIdResult;
use crate::registry::{
    CircuitRegistry, ConfiguredRegistry, HostedCircuitRegistry, LocalCircuitRegistry,
};

pub struct ProofChainClient<R> {
    registry: R,
    decoder: Box<dyn ProofDecoder>,
    canonicalizer: Box<dyn FieldCanonicalizer>,
    lookup_timeout: Duration,
    options: AssemblyOptions,
}

impl<R: CircuitRegistry> ProofChainClient<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            decoder: Box::new(HexProofDecoder),
            canonicalizer: Box::new(WordCanonicalizer),
            lookup_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            options: AssemblyOptions::default(),
        }
    }

    pub fn with_decoder(mut self, decoder: impl ProofDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_canonicalizer(mut self, canonicalizer: impl FieldCanonicalizer + 'static) -> Self {
        self.canonicalizer = Box::new(canonicalizer);
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn with_options(mut self, options: AssemblyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    pub(crate) fn decoder(&self) -> &dyn ProofDecoder {
        self.decoder.as_ref()
    }

    pub(crate) fn canonicalizer(&self) -> &dyn FieldCanonicalizer {
        self.canonicalizer.as_ref()
    }
}

impl ProofChainClient<ConfiguredRegistry> {
    /// Local circuits directory wins over the hosted registry when set.
    pub fn from_config(config: &SdkConfig) -> ZkIdResult<Self> {
        let registry = match &config.circuits_dir {
            Some(dir) => ConfiguredRegistry::Local(LocalCircuitRegistry::new(dir)),
            None => ConfiguredRegistry::Hosted(HostedCircuitRegistry::new(
                &config.registry_url,
                config.lookup_timeout(),
            )?),
        };
        Ok(Self::new(registry)
            .with_lookup_timeout(config.lookup_timeout())
            .with_options(config.assembly_options()))
    }
}
