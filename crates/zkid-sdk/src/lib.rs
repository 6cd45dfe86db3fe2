// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # zkid-sdk
//!
//! Turns the four sub-proofs of a zkPassport-style identity proof into the
//! single argument the on-chain identity registry verifies.
//!
//! The proving service hands back four proof results (DSC, ID data,
//! integrity, disclosure). Each is decoded, its verification key fetched
//! from the circuit registry, everything is canonicalized into fixed-size
//! field-element arrays, and the commitments linking the four circuits are
//! checked. The zk verification itself happens on-chain; this crate only
//! gets the shape and the linkage right.
//!
//! ## Crate layout
//!
//! | Module | Purpose |
//! |---|---|
//! | *crate root* | Re-exports the data model from `zkid-types` |
//! | [`codec`] | base64 / hex ↔ field elements, pad / truncate |
//! | [`backend`] | Proof decoder and field canonicalizer seams |
//! | [`registry`] | Packaged-circuit lookup (hosted, local, in-memory) |
//! | [`client`] | [`ProofChainClient`](client::ProofChainClient), the entry point |
//! | [`vkey`] | Verification-key resolution with zero fallback |
//! | [`format`] | Per-circuit formatting |
//! | [`chain`] | Chain assembly and link validation |
//! | [`submission`] | zkID extraction and `verify_zkID` arguments |
//! | [`config`] | `~/.zkid/config.json` and environment overrides |
//! | [`error`] | [`ZkIdError`](error::ZkIdError) |
//!
//! ## Typical flow
//!
//! ```rust,no_run
//! use zkid_sdk::client::ProofChainClient;
//! use zkid_sdk::config::load_config;
//! use zkid_sdk::submission::{RegistryAction, VerifyZkIdCall};
//!
//! # async fn example(proofs: Vec<zkid_sdk::ProofResult>) -> anyhow::Result<()> {
//! // 1. Client from ~/.zkid/config.json (+ ZKID_* env)
//! let client = ProofChainClient::from_config(&load_config()?)?;
//!
//! // 2. Four proof results in any order
//! let assembly = client.assemble_chain(&proofs).await?;
//! if !assembly.validation.is_valid() {
//!     anyhow::bail!("proof chain does not link");
//! }
//!
//! // 3. Arguments for the registry contract
//! let call = VerifyZkIdCall::new(assembly.data, RegistryAction::Add)?;
//! println!("{}", serde_json::to_string(&call)?);
//! # Ok(())
//! # }
//! ```

pub use zkid_types::{
    CircuitRole, ContractProofData, FieldElement, FormattedCircuitProof, ProofKind, ProofResult,
    PublicInputs, PROOF_COUNT, PROOF_SIZE, PUBLIC_INPUT_COUNT, VKEY_SIZE,
};

pub mod backend;
pub mod chain;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod registry;
pub mod submission;
pub mod vkey;
