// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Per-circuit formatting: one proof result in, one contract-shaped bundle
//! out.
//!
//! The vkey, the proof body and the public inputs are produced separately
//! and each falls back to zeros on its own, so a single bad piece never
//! blanks the whole bundle.

use zkid_types::{
    CircuitRole, FieldElement, FormattedCircuitProof, ProofResult, PROOF_SIZE, PUBLIC_INPUT_COUNT,
};

use crate::backend::{ProofData, PROOF_DATA_FORMAT};
use crate::client::ProofChainClient;
use crate::codec::{resize, to_field_elements, zeroed};
use crate::error::{ZkIdError, ZkIdResult};
use crate::registry::CircuitRegistry;

/// The two public inputs the contract reads for `role`:
/// A (merkle root, commitment), B and C (commitment in, commitment out),
/// D (commitment in, nullifier).
pub fn extract_public_inputs(
    data: &ProofData,
    role: CircuitRole,
) -> ZkIdResult<[FieldElement; PUBLIC_INPUT_COUNT]> {
    Ok(match role {
        CircuitRole::Dsc => [data.merkle_root_from_dsc()?, data.commitment_from_dsc()?],
        CircuitRole::IdData => [
            data.commitment_in_from_id_data()?,
            data.commitment_out_from_id_data()?,
        ],
        CircuitRole::Integrity => [
            data.commitment_in_from_integrity()?,
            data.commitment_out_from_integrity()?,
        ],
        CircuitRole::Disclose => [
            data.commitment_in_from_disclosure()?,
            data.nullifier_from_disclosure()?,
        ],
    })
}

impl<R: CircuitRegistry> ProofChainClient<R> {
    /// Canonical proof body, exactly [`PROOF_SIZE`] elements.
    pub fn format_proof_data(&self, data: &ProofData) -> ZkIdResult<Vec<FieldElement>> {
        let fields = self.canonicalizer().proof_to_fields(data)?;
        Ok(resize(to_field_elements(&fields)?, PROOF_SIZE))
    }

    pub fn decode_proof(&self, proof: &ProofResult) -> ZkIdResult<ProofData> {
        let raw = proof
            .proof
            .as_deref()
            .ok_or_else(|| ZkIdError::Decode("proof result has no proof payload".into()))?;
        self.decoder().proof_data(raw, PROOF_DATA_FORMAT)
    }

    /// Best effort: never fails, logs every piece that had to be zeroed.
    pub async fn format_circuit(
        &self,
        proof: &ProofResult,
        role: CircuitRole,
    ) -> FormattedCircuitProof {
        let circuit = proof.display_name();
        tracing::info!(role = %role, circuit, "formatting sub-circuit {}", role.letter());

        let proof_data = self
            .decode_proof(proof)
            .inspect_err(|e| {
                tracing::error!(role = %role, circuit, error = %e, "cannot decode proof data");
            })
            .ok();

        let vkey = self.resolve_verification_key(proof).await;

        let formatted = match proof_data.as_ref() {
            Some(data) => self.format_proof_data(data).unwrap_or_else(|e| {
                tracing::error!(role = %role, circuit, error = %e, "cannot format proof, using zeros");
                zeroed(PROOF_SIZE)
            }),
            None => zeroed(PROOF_SIZE),
        };

        let public_inputs = match proof_data.as_ref() {
            Some(data) => match extract_public_inputs(data, role) {
                Ok(inputs) => {
                    tracing::info!(
                        role = %role,
                        first = %inputs[0],
                        second = %inputs[1],
                        "public inputs for sub-circuit {}",
                        role.letter()
                    );
                    inputs
                }
                Err(e) => {
                    tracing::error!(role = %role, circuit, error = %e, "cannot extract public inputs, using zeros");
                    [FieldElement::zero(), FieldElement::zero()]
                }
            },
            None => [FieldElement::zero(), FieldElement::zero()],
        };

        FormattedCircuitProof {
            vkey,
            proof: formatted,
            public_inputs,
        }
    }
}
