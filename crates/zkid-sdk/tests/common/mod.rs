// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Deterministic four-proof fixture with linked commitments.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use zkid_sdk::backend::HexProofDecoder;
use zkid_sdk::registry::{PackagedCircuit, StaticCircuitRegistry};
use zkid_sdk::{FieldElement, ProofResult};

pub const VERSION: &str = "0.5.0";

pub const NAMES: [&str; 4] = [
    "sig_check_dsc_tbs_700_rsa_pkcs_4096_sha512",
    "sig_check_id_data_tbs_700_rsa_pkcs_2048_sha256",
    "data_check_integrity_sha256",
    "disclose_bytes",
];

/// (vkey words, proof body words) per circuit; deliberately not all 128/459.
const SIZES: [(usize, usize); 4] = [(128, 459), (112, 440), (128, 470), (140, 459)];

pub struct Fixture {
    pub proofs: Vec<ProofResult>,
    pub circuits: Vec<(&'static str, PackagedCircuit)>,
    pub vkey_bytes: Vec<Vec<u8>>,
    pub merkle_root: FieldElement,
    pub commitments: [FieldElement; 3],
    pub nullifier: FieldElement,
}

impl Fixture {
    pub fn registry(&self) -> StaticCircuitRegistry {
        self.circuits
            .iter()
            .fold(StaticCircuitRegistry::new(), |r, (name, c)| {
                r.with(VERSION, name, c.clone())
            })
    }
}

/// xorshift64 stream, top byte cleared so words stay below 2^248.
fn words(seed: u64, count: usize) -> Vec<[u8; 32]> {
    let mut state = seed.wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1;
    (0..count)
        .map(|_| {
            let mut w = [0u8; 32];
            for chunk in w.chunks_mut(8) {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                chunk.copy_from_slice(&state.to_be_bytes());
            }
            w[0] = 0;
            w
        })
        .collect()
}

fn field(seed: u64) -> FieldElement {
    FieldElement::from_be_bytes(&words(seed, 1)[0])
}

pub fn fixture() -> Fixture {
    let merkle_root = field(1);
    let commitments = [field(2), field(3), field(4)];
    let nullifier = field(5);

    let inputs = [
        [merkle_root.clone(), commitments[0].clone()],
        [commitments[0].clone(), commitments[1].clone()],
        [commitments[1].clone(), commitments[2].clone()],
        [commitments[2].clone(), nullifier.clone()],
    ];

    let mut proofs = Vec::new();
    let mut circuits = Vec::new();
    let mut vkey_bytes = Vec::new();
    for (i, name) in NAMES.into_iter().enumerate() {
        let (vkey_words, proof_words) = SIZES[i];
        let body: Vec<FieldElement> = words(100 + i as u64, proof_words)
            .iter()
            .map(|w| FieldElement::from_be_bytes(w))
            .collect();
        let raw = HexProofDecoder::encode(&inputs[i], &body).unwrap();

        let vkey: Vec<u8> = words(200 + i as u64, vkey_words).concat();
        let vkey_hash = format!("0x{:064x}", 1000 + i);

        proofs.push(ProofResult::new(name, VERSION, &vkey_hash, &raw));
        circuits.push((
            name,
            PackagedCircuit {
                name: Some(name.to_string()),
                noir_version: Some("1.0.0-beta.3".into()),
                bb_version: Some("0.82.2".into()),
                vkey: Some(B64.encode(&vkey)),
                vkey_hash: Some(vkey_hash),
            },
        ));
        vkey_bytes.push(vkey);
    }

    Fixture {
        proofs,
        circuits,
        vkey_bytes,
        merkle_root,
        commitments,
        nullifier,
    }
}
