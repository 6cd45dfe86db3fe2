use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::proof::FormattedCircuitProof;
use crate::role::CircuitRole;
use crate::{PROOF_SIZE, PUBLIC_INPUT_COUNT, VKEY_SIZE};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKeys {
    pub vkey_a: Vec<FieldElement>,
    pub vkey_b: Vec<FieldElement>,
    pub vkey_c: Vec<FieldElement>,
    pub vkey_d: Vec<FieldElement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitProofs {
    pub proof_a: Vec<FieldElement>,
    pub proof_b: Vec<FieldElement>,
    pub proof_c: Vec<FieldElement>,
    pub proof_d: Vec<FieldElement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInputs {
    pub input_a: [FieldElement; PUBLIC_INPUT_COUNT],
    pub input_b: [FieldElement; PUBLIC_INPUT_COUNT],
    pub input_c: [FieldElement; PUBLIC_INPUT_COUNT],
    pub input_d: [FieldElement; PUBLIC_INPUT_COUNT],
}

/// The argument the identity registry's verifier takes: four vkeys, four
/// proofs and four public-input pairs, in role order A, B, C, D.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractProofData {
    pub vkeys: VerificationKeys,
    pub proofs: CircuitProofs,
    pub public_inputs: PublicInputs,
}

/// A vector whose length differs from what the contract expects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeViolation {
    pub field: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl VerificationKeys {
    pub fn get(&self, role: CircuitRole) -> &[FieldElement] {
        match role {
            CircuitRole::Dsc => &self.vkey_a,
            CircuitRole::IdData => &self.vkey_b,
            CircuitRole::Integrity => &self.vkey_c,
            CircuitRole::Disclose => &self.vkey_d,
        }
    }
}

impl CircuitProofs {
    pub fn get(&self, role: CircuitRole) -> &[FieldElement] {
        match role {
            CircuitRole::Dsc => &self.proof_a,
            CircuitRole::IdData => &self.proof_b,
            CircuitRole::Integrity => &self.proof_c,
            CircuitRole::Disclose => &self.proof_d,
        }
    }
}

impl PublicInputs {
    pub fn get(&self, role: CircuitRole) -> &[FieldElement; PUBLIC_INPUT_COUNT] {
        match role {
            CircuitRole::Dsc => &self.input_a,
            CircuitRole::IdData => &self.input_b,
            CircuitRole::Integrity => &self.input_c,
            CircuitRole::Disclose => &self.input_d,
        }
    }
}

impl ContractProofData {
    /// Aggregate formatted sub-proofs given in role order A, B, C, D.
    pub fn from_formatted(
        a: FormattedCircuitProof,
        b: FormattedCircuitProof,
        c: FormattedCircuitProof,
        d: FormattedCircuitProof,
    ) -> Self {
        Self {
            vkeys: VerificationKeys {
                vkey_a: a.vkey,
                vkey_b: b.vkey,
                vkey_c: c.vkey,
                vkey_d: d.vkey,
            },
            proofs: CircuitProofs {
                proof_a: a.proof,
                proof_b: b.proof,
                proof_c: c.proof,
                proof_d: d.proof,
            },
            public_inputs: PublicInputs {
                input_a: a.public_inputs,
                input_b: b.public_inputs,
                input_c: c.public_inputs,
                input_d: d.public_inputs,
            },
        }
    }

    /// Every vkey / proof vector whose length is off. Empty means the data
    /// has the exact shape the verifier reads.
    pub fn check_shape(&self) -> Vec<ShapeViolation> {
        const VKEY_FIELDS: [&str; 4] = ["vkey_a", "vkey_b", "vkey_c", "vkey_d"];
        const PROOF_FIELDS: [&str; 4] = ["proof_a", "proof_b", "proof_c", "proof_d"];

        let mut violations = Vec::new();
        for role in CircuitRole::ALL {
            let vkey = self.vkeys.get(role);
            if vkey.len() != VKEY_SIZE {
                violations.push(ShapeViolation {
                    field: VKEY_FIELDS[role.index()],
                    expected: VKEY_SIZE,
                    actual: vkey.len(),
                });
            }
            let proof = self.proofs.get(role);
            if proof.len() != PROOF_SIZE {
                violations.push(ShapeViolation {
                    field: PROOF_FIELDS[role.index()],
                    expected: PROOF_SIZE,
                    actual: proof.len(),
                });
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(tag: u64) -> FormattedCircuitProof {
        FormattedCircuitProof {
            vkey: vec![FieldElement::from(tag); VKEY_SIZE],
            proof: vec![FieldElement::from(tag + 100); PROOF_SIZE],
            public_inputs: [FieldElement::from(tag), FieldElement::from(tag + 1)],
        }
    }

    #[test]
    fn from_formatted_keeps_role_order() {
        let data = ContractProofData::from_formatted(bundle(1), bundle(2), bundle(3), bundle(4));
        assert_eq!(data.vkeys.vkey_a[0], FieldElement::from(1));
        assert_eq!(data.proofs.proof_d[0], FieldElement::from(104));
        assert_eq!(data.public_inputs.input_c, [FieldElement::from(3), FieldElement::from(4)]);
        assert_eq!(data.public_inputs.get(CircuitRole::IdData)[1], FieldElement::from(3));
        assert!(data.check_shape().is_empty());
    }

    #[test]
    fn check_shape_reports_offenders() {
        let mut short = bundle(2);
        short.proof.truncate(10);
        let data = ContractProofData::from_formatted(bundle(1), short, bundle(3), bundle(4));
        assert_eq!(
            data.check_shape(),
            vec![ShapeViolation {
                field: "proof_b",
                expected: PROOF_SIZE,
                actual: 10
            }]
        );
    }

    #[test]
    fn json_field_names_match_contract() {
        let data = ContractProofData::from_formatted(bundle(1), bundle(2), bundle(3), bundle(4));
        let v = serde_json::to_value(&data).unwrap();
        assert!(v["vkeys"]["vkey_a"].is_array());
        assert!(v["proofs"]["proof_c"].is_array());
        assert_eq!(v["public_inputs"]["input_d"][1], "0x5");
    }

    #[test]
    fn public_inputs_must_be_pairs() {
        let data = ContractProofData::from_formatted(bundle(1), bundle(2), bundle(3), bundle(4));
        let mut v = serde_json::to_value(&data).unwrap();
        v["public_inputs"]["input_a"] = serde_json::json!(["0x1", "0x2", "0x3"]);
        assert!(serde_json::from_value::<ContractProofData>(v).is_err());
    }
}
