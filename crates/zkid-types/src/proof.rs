use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::role::ProofKind;
use crate::{PROOF_SIZE, PUBLIC_INPUT_COUNT, VKEY_SIZE};

/// One sub-proof as handed over by the proving service.
///
/// Field names follow the service's JSON (`vkeyHash`); anything else it
/// attaches is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResult {
    pub name: Option<String>,
    pub vkey_hash: Option<String>,
    pub version: Option<String>,
    /// Raw proof payload, opaque to everything but the decoder.
    pub proof: Option<String>,
}

impl ProofResult {
    pub fn new(name: &str, version: &str, vkey_hash: &str, proof: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            vkey_hash: Some(vkey_hash.to_string()),
            version: Some(version.to_string()),
            proof: Some(proof.to_string()),
        }
    }

    pub fn kind(&self) -> ProofKind {
        ProofKind::classify(self.name.as_deref())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// A sub-proof reshaped for the verifier contract.
///
/// `vkey` holds [`VKEY_SIZE`] and `proof` holds [`PROOF_SIZE`] elements once
/// produced by the formatter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedCircuitProof {
    pub vkey: Vec<FieldElement>,
    pub proof: Vec<FieldElement>,
    pub public_inputs: [FieldElement; PUBLIC_INPUT_COUNT],
}

impl FormattedCircuitProof {
    /// All-zero bundle of the contract's shape.
    pub fn sentinel() -> Self {
        Self {
            vkey: vec![FieldElement::zero(); VKEY_SIZE],
            proof: vec![FieldElement::zero(); PROOF_SIZE],
            public_inputs: [FieldElement::zero(), FieldElement::zero()],
        }
    }
}
