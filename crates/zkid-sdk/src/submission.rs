// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Arguments for the registry's `verify_zkID` entry point.
//!
//! The registry takes the assembled proof data, the zkID it proves and two
//! flags selecting registration or removal. Sending the transaction is the
//! caller's job; this module only builds the payload.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use zkid_types::{ContractProofData, FieldElement};

use crate::error::{ZkIdError, ZkIdResult};

/// The zkID is the disclosure circuit's nullifier. Zero counts as absent.
pub fn extract_zk_id(data: &ContractProofData) -> Option<FieldElement> {
    let id = &data.public_inputs.input_d[1];
    (!id.is_zero()).then(|| id.clone())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryAction {
    Add,
    Remove,
}

impl FromStr for RegistryAction {
    type Err = ZkIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(RegistryAction::Add),
            "remove" => Ok(RegistryAction::Remove),
            other => Err(ZkIdError::Config(format!(
                "unknown registry action {other:?} (expected add or remove)"
            ))),
        }
    }
}

impl fmt::Display for RegistryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryAction::Add => f.write_str("add"),
            RegistryAction::Remove => f.write_str("remove"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyZkIdCall {
    pub proof_data: ContractProofData,
    pub zk_id: FieldElement,
    pub add: bool,
    pub remove: bool,
}

impl VerifyZkIdCall {
    pub const METHOD: &'static str = "verify_zkID";

    /// zkID taken from the disclosure nullifier.
    pub fn new(proof_data: ContractProofData, action: RegistryAction) -> ZkIdResult<Self> {
        let zk_id = extract_zk_id(&proof_data).ok_or(ZkIdError::MissingZkId)?;
        Self::with_zk_id(proof_data, zk_id, action)
    }

    /// Caller-supplied zkID. The registry rejects it unless it equals the
    /// disclosure nullifier, so a mismatch fails here with the D→zkID link.
    pub fn with_zk_id(
        proof_data: ContractProofData,
        zk_id: FieldElement,
        action: RegistryAction,
    ) -> ZkIdResult<Self> {
        if zk_id.is_zero() {
            return Err(ZkIdError::MissingZkId);
        }
        if proof_data.public_inputs.input_d[1] != zk_id {
            return Err(ZkIdError::ChainLinkMismatch {
                links: vec!["D→zkID".to_string()],
            });
        }
        Ok(Self {
            proof_data,
            zk_id,
            add: action == RegistryAction::Add,
            remove: action == RegistryAction::Remove,
        })
    }

    pub fn action(&self) -> RegistryAction {
        if self.add {
            RegistryAction::Add
        } else {
            RegistryAction::Remove
        }
    }
}
