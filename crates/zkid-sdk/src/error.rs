// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Typed errors for proof-chain assembly.

use zkid_types::CircuitRole;

#[derive(Debug, thiserror::Error)]
pub enum ZkIdError {
    #[error("proof result is missing {0} (name, vkeyHash and version are required)")]
    MissingMetadata(&'static str),

    #[error("missing required proofs: {}", join_roles(.roles))]
    MissingProof { roles: Vec<CircuitRole> },

    #[error("decode: {0}")]
    Decode(String),

    #[error("circuit lookup: {0}")]
    Lookup(String),

    #[error("proof chain broken at {}", .links.join(", "))]
    ChainLinkMismatch { links: Vec<String> },

    #[error("expected {expected} proofs, got {got}")]
    Cardinality { expected: usize, got: usize },

    #[error("no zkID (disclosure nullifier) in proof data")]
    MissingZkId,

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn join_roles(roles: &[CircuitRole]) -> String {
    roles
        .iter()
        .map(|r| format!("{} proof (circuit {})", r.description(), r.letter()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ZkIdResult<T> = Result<T, ZkIdError>;
