// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Proof-chain assembly and validation.
//!
//! A zkID registration is four sub-proofs linked by commitments:
//!
//! ```text
//! A (dsc)        [merkle_root, c1]
//! B (id_data)    [c1, c2]
//! C (integrity)  [c2, c3]
//! D (disclose)   [c3, nullifier]   nullifier == zkID
//! ```
//!
//! [`assemble_chain`](ProofChainClient::assemble_chain) locates each role by
//! name (not position), formats the four sub-proofs concurrently and checks
//! the links. Whether a broken link is fatal depends on [`ChainPolicy`]; the
//! result always carries the full [`ChainValidation`].

use serde::{Deserialize, Serialize};
use zkid_types::{
    CircuitRole, ContractProofData, FieldElement, ProofKind, ProofResult, PublicInputs, PROOF_COUNT,
};

use crate::client::ProofChainClient;
use crate::error::{ZkIdError, ZkIdResult};
use crate::registry::CircuitRegistry;

/// What to do when the commitments don't link up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainPolicy {
    /// Log and report in [`ChainValidation`], still return the data.
    #[default]
    Observe,
    /// Fail with [`ZkIdError::ChainLinkMismatch`].
    Enforce,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub chain_policy: ChainPolicy,
    /// Fail instead of warn when the input is not exactly four proofs.
    pub require_exact_count: bool,
    /// zkID the disclosure nullifier must equal. Without it the D→zkID link
    /// is checked against the nullifier itself.
    pub expected_zk_id: Option<FieldElement>,
}

/// One check in the chain. For commitment hand-offs `expected` is the
/// upstream circuit's output and `actual` the downstream circuit's input;
/// for D→zkID they are the target zkID and the disclosure nullifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainLink {
    pub link: &'static str,
    pub expected: FieldElement,
    pub actual: FieldElement,
    pub ok: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainValidation {
    pub links: Vec<ChainLink>,
}

impl ChainValidation {
    pub fn is_valid(&self) -> bool {
        self.links.iter().all(|l| l.ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ChainLink> {
        self.links.iter().filter(|l| !l.ok)
    }
}

/// How the input set looked before role lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapeReport {
    pub count: usize,
    pub detected: Vec<ProofKind>,
    /// Positions whose detected role differs from the canonical order.
    pub misplaced: Vec<usize>,
}

impl ShapeReport {
    pub fn count_ok(&self) -> bool {
        self.count == PROOF_COUNT
    }

    pub fn in_order(&self) -> bool {
        self.misplaced.is_empty()
    }
}

#[derive(Debug)]
pub struct ChainAssembly {
    pub data: ContractProofData,
    /// Nullifier output of the disclosure circuit, the registry's zkID.
    pub scoped_nullifier: FieldElement,
    pub validation: ChainValidation,
    pub shape: ShapeReport,
}

/// Check every commitment hand-off plus the final nullifier against `zk_id`.
pub fn validate_chain(inputs: &PublicInputs, zk_id: &FieldElement) -> ChainValidation {
    let pairs = [
        ("A→B", &inputs.input_a[1], &inputs.input_b[0]),
        ("B→C", &inputs.input_b[1], &inputs.input_c[0]),
        ("C→D", &inputs.input_c[1], &inputs.input_d[0]),
        ("D→zkID", zk_id, &inputs.input_d[1]),
    ];
    ChainValidation {
        links: pairs
            .into_iter()
            .map(|(link, expected, actual)| ChainLink {
                link,
                expected: expected.clone(),
                actual: actual.clone(),
                ok: expected == actual,
            })
            .collect(),
    }
}

/// Positions (over the first four) where the detected role is not the one
/// canonical order puts there.
pub fn check_order(detected: &[ProofKind]) -> Vec<usize> {
    detected
        .iter()
        .zip(CircuitRole::ALL)
        .enumerate()
        .filter(|(_, (kind, role))| **kind != ProofKind::Circuit(*role))
        .map(|(i, _)| i)
        .collect()
}

/// First proof whose name contains each role's keyword, in role order.
pub fn find_role_proofs(proofs: &[ProofResult]) -> ZkIdResult<[&ProofResult; PROOF_COUNT]> {
    let found = CircuitRole::ALL.map(|role| {
        proofs
            .iter()
            .find(|p| p.name.as_deref().is_some_and(|n| role.matches(n)))
    });
    if let [Some(a), Some(b), Some(c), Some(d)] = found {
        return Ok([a, b, c, d]);
    }
    let roles: Vec<CircuitRole> = CircuitRole::ALL
        .into_iter()
        .zip(found)
        .filter(|(_, p)| p.is_none())
        .map(|(role, _)| role)
        .collect();
    for role in &roles {
        tracing::error!(
            role = %role,
            "missing {} proof (circuit {})",
            role.description(),
            role.letter()
        );
    }
    Err(ZkIdError::MissingProof { roles })
}

fn inspect_shape(proofs: &[ProofResult]) -> ShapeReport {
    let detected: Vec<ProofKind> = proofs.iter().map(ProofResult::kind).collect();
    let misplaced = check_order(&detected);
    for &i in &misplaced {
        tracing::error!(
            position = i,
            expected = %CircuitRole::ALL[i],
            actual = %detected[i],
            "proof out of place"
        );
    }
    if misplaced.is_empty() && proofs.len() >= PROOF_COUNT {
        tracing::info!("proofs are in canonical order");
    } else if !misplaced.is_empty() {
        tracing::error!("proofs are not in canonical order (dsc → id_data → integrity → disclose)");
    }
    ShapeReport {
        count: proofs.len(),
        detected,
        misplaced,
    }
}

fn log_validation(validation: &ChainValidation) {
    for link in &validation.links {
        if link.ok {
            tracing::info!(link = link.link, expected = %link.expected, actual = %link.actual, "chain link ok");
        } else {
            tracing::error!(link = link.link, expected = %link.expected, actual = %link.actual, "chain link mismatch");
        }
    }
    if validation.is_valid() {
        tracing::info!("proof chain integrity verified");
    } else {
        tracing::error!("proof chain integrity verification failed, chain must link A → B → C → D");
    }
}

impl<R: CircuitRegistry> ProofChainClient<R> {
    pub async fn assemble_chain(&self, proofs: &[ProofResult]) -> ZkIdResult<ChainAssembly> {
        let options = self.options();

        if proofs.len() != PROOF_COUNT {
            tracing::error!(
                expected = PROOF_COUNT,
                got = proofs.len(),
                "incorrect number of proofs"
            );
            if options.require_exact_count {
                return Err(ZkIdError::Cardinality {
                    expected: PROOF_COUNT,
                    got: proofs.len(),
                });
            }
        }

        let shape = inspect_shape(proofs);
        let [a, b, c, d] = find_role_proofs(proofs)?;

        let (fa, fb, fc, fd) = tokio::join!(
            self.format_circuit(a, CircuitRole::Dsc),
            self.format_circuit(b, CircuitRole::IdData),
            self.format_circuit(c, CircuitRole::Integrity),
            self.format_circuit(d, CircuitRole::Disclose),
        );

        let scoped_nullifier = fd.public_inputs[1].clone();
        tracing::info!(zk_id = %scoped_nullifier, "scoped nullifier");

        let target = match &options.expected_zk_id {
            Some(expected) => {
                tracing::info!(zk_id = %expected, "checking nullifier against expected zkID");
                expected
            }
            None => &scoped_nullifier,
        };

        let data = ContractProofData::from_formatted(fa, fb, fc, fd);
        let validation = validate_chain(&data.public_inputs, target);
        log_validation(&validation);

        if options.chain_policy == ChainPolicy::Enforce && !validation.is_valid() {
            return Err(ZkIdError::ChainLinkMismatch {
                links: validation.failures().map(|l| l.link.to_string()).collect(),
            });
        }

        Ok(ChainAssembly {
            data,
            scoped_nullifier,
            validation,
            shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(v: u64) -> FieldElement {
        FieldElement::from(v)
    }

    fn named(name: &str) -> ProofResult {
        ProofResult {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn linked_inputs() -> PublicInputs {
        PublicInputs {
            input_a: [fe(100), fe(1)],
            input_b: [fe(1), fe(2)],
            input_c: [fe(2), fe(3)],
            input_d: [fe(3), fe(42)],
        }
    }

    #[test]
    fn validate_linked_chain() {
        let v = validate_chain(&linked_inputs(), &fe(42));
        assert!(v.is_valid());
        assert_eq!(v.links.len(), 4);
        assert_eq!(v.failures().count(), 0);
    }

    #[test]
    fn validate_reports_each_broken_link() {
        let mut inputs = linked_inputs();
        inputs.input_c[0] = fe(99);
        let v = validate_chain(&inputs, &fe(7));
        assert!(!v.is_valid());
        let broken: Vec<_> = v.failures().map(|l| l.link).collect();
        assert_eq!(broken, vec!["B→C", "D→zkID"]);
        assert_eq!(v.links[1].expected, fe(2));
        assert_eq!(v.links[1].actual, fe(99));
        assert_eq!(v.links[3].expected, fe(7));
        assert_eq!(v.links[3].actual, fe(42));
    }

    #[test]
    fn order_check() {
        let canonical: Vec<ProofKind> = CircuitRole::ALL.map(ProofKind::Circuit).to_vec();
        assert!(check_order(&canonical).is_empty());

        let swapped = vec![
            ProofKind::Circuit(CircuitRole::IdData),
            ProofKind::Circuit(CircuitRole::Dsc),
            ProofKind::Circuit(CircuitRole::Integrity),
            ProofKind::Unknown,
        ];
        assert_eq!(check_order(&swapped), vec![0, 1, 3]);

        // only the overlapping prefix is compared
        assert!(check_order(&canonical[..2]).is_empty());
    }

    #[test]
    fn find_roles_independent_of_position() {
        let proofs = vec![
            named("disclose_bytes"),
            named("data_check_integrity_sha256"),
            named("sig_check_dsc_tbs_700"),
            named("sig_check_id_data_tbs_700"),
        ];
        let [a, b, c, d] = find_role_proofs(&proofs).unwrap();
        assert_eq!(a.display_name(), "sig_check_dsc_tbs_700");
        assert_eq!(b.display_name(), "sig_check_id_data_tbs_700");
        assert_eq!(c.display_name(), "data_check_integrity_sha256");
        assert_eq!(d.display_name(), "disclose_bytes");
    }

    #[test]
    fn find_roles_reports_all_missing() {
        let proofs = vec![named("sig_check_dsc"), named("outer"), ProofResult::default()];
        match find_role_proofs(&proofs) {
            Err(ZkIdError::MissingProof { roles }) => assert_eq!(
                roles,
                vec![CircuitRole::IdData, CircuitRole::Integrity, CircuitRole::Disclose]
            ),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("expected missing proofs"),
        }
    }

    #[test]
    fn shape_report() {
        let proofs = vec![named("sig_check_dsc"), named("disclose_bytes")];
        let shape = inspect_shape(&proofs);
        assert!(!shape.count_ok());
        assert_eq!(shape.misplaced, vec![1]);
        assert_eq!(shape.detected[1], ProofKind::Circuit(CircuitRole::Disclose));
    }
}
