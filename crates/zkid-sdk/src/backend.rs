// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Seams to the proving library.
//!
//! Two functions are consumed from the outside world and not reimplemented:
//! a canonicalizer turning verification keys and proofs into hex field
//! strings, and a decoder splitting a raw proof payload into its public
//! inputs and proof words. [`WordCanonicalizer`] and [`HexProofDecoder`] are
//! the defaults for payloads laid out as flat 32-byte words.

use zkid_types::FieldElement;

use crate::codec::{bytes_to_words, decode_hex, parse_field, FIELD_BYTES};
use crate::error::{ZkIdError, ZkIdResult};

/// Format selector passed to the decoder for every sub-proof.
pub const PROOF_DATA_FORMAT: usize = 2;

/// A decoded proof: public inputs and proof body as hex field strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofData {
    pub public_inputs: Vec<String>,
    pub proof: Vec<String>,
}

impl ProofData {
    fn first_input(&self, what: &str) -> ZkIdResult<FieldElement> {
        let s = self
            .public_inputs
            .first()
            .ok_or_else(|| ZkIdError::Decode(format!("no public inputs for {what}")))?;
        parse_field(s)
    }

    fn last_input(&self, what: &str) -> ZkIdResult<FieldElement> {
        let s = self
            .public_inputs
            .last()
            .ok_or_else(|| ZkIdError::Decode(format!("no public inputs for {what}")))?;
        parse_field(s)
    }

    pub fn merkle_root_from_dsc(&self) -> ZkIdResult<FieldElement> {
        self.first_input("DSC merkle root")
    }

    pub fn commitment_from_dsc(&self) -> ZkIdResult<FieldElement> {
        self.last_input("DSC commitment")
    }

    pub fn commitment_in_from_id_data(&self) -> ZkIdResult<FieldElement> {
        self.first_input("ID data commitment in")
    }

    pub fn commitment_out_from_id_data(&self) -> ZkIdResult<FieldElement> {
        self.last_input("ID data commitment out")
    }

    pub fn commitment_in_from_integrity(&self) -> ZkIdResult<FieldElement> {
        self.first_input("integrity commitment in")
    }

    pub fn commitment_out_from_integrity(&self) -> ZkIdResult<FieldElement> {
        self.last_input("integrity commitment out")
    }

    pub fn commitment_in_from_disclosure(&self) -> ZkIdResult<FieldElement> {
        self.first_input("disclosure commitment in")
    }

    pub fn nullifier_from_disclosure(&self) -> ZkIdResult<FieldElement> {
        self.last_input("disclosure nullifier")
    }
}

pub trait ProofDecoder: Send + Sync {
    fn proof_data(&self, raw: &str, format: usize) -> ZkIdResult<ProofData>;
}

pub trait FieldCanonicalizer: Send + Sync {
    fn vkey_to_fields(&self, vkey: &[u8]) -> ZkIdResult<Vec<String>>;
    fn proof_to_fields(&self, proof: &ProofData) -> ZkIdResult<Vec<String>>;
}

/// Reads a hex payload of 32-byte words. The leading `format` words are the
/// public inputs, the rest is the proof body.
#[derive(Clone, Copy, Debug, Default)]
pub struct HexProofDecoder;

impl HexProofDecoder {
    /// Lay out a payload the way [`HexProofDecoder`] reads it.
    pub fn encode(public_inputs: &[FieldElement], proof: &[FieldElement]) -> ZkIdResult<String> {
        let mut out = String::with_capacity((public_inputs.len() + proof.len()) * FIELD_BYTES * 2);
        for fe in public_inputs.iter().chain(proof) {
            let bytes = fe.as_biguint().to_bytes_be();
            if bytes.len() > FIELD_BYTES {
                return Err(ZkIdError::Decode(format!("{fe} does not fit in {FIELD_BYTES} bytes")));
            }
            let mut word = [0u8; FIELD_BYTES];
            word[FIELD_BYTES - bytes.len()..].copy_from_slice(&bytes);
            out.push_str(&hex::encode(word));
        }
        Ok(out)
    }
}

impl ProofDecoder for HexProofDecoder {
    fn proof_data(&self, raw: &str, format: usize) -> ZkIdResult<ProofData> {
        let bytes = decode_hex(raw)?;
        if bytes.len() % FIELD_BYTES != 0 {
            return Err(ZkIdError::Decode(format!(
                "proof payload is {} bytes, not a multiple of {FIELD_BYTES}",
                bytes.len()
            )));
        }
        let mut words = bytes_to_words(&bytes);
        if words.len() < format {
            return Err(ZkIdError::Decode(format!(
                "proof payload has {} words, expected at least {format} public inputs",
                words.len()
            )));
        }
        let proof = words.split_off(format);
        Ok(ProofData {
            public_inputs: words,
            proof,
        })
    }
}

/// Verification keys are split into 32-byte words; proofs are already words.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordCanonicalizer;

impl FieldCanonicalizer for WordCanonicalizer {
    fn vkey_to_fields(&self, vkey: &[u8]) -> ZkIdResult<Vec<String>> {
        if vkey.is_empty() || vkey.len() % FIELD_BYTES != 0 {
            return Err(ZkIdError::Decode(format!(
                "verification key is {} bytes, not a non-empty multiple of {FIELD_BYTES}",
                vkey.len()
            )));
        }
        Ok(bytes_to_words(vkey))
    }

    fn proof_to_fields(&self, proof: &ProofData) -> ZkIdResult<Vec<String>> {
        if proof.proof.is_empty() {
            return Err(ZkIdError::Decode("proof body is empty".into()));
        }
        Ok(proof.proof.clone())
    }
}
