// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! String encodings ↔ field-element vectors.
//!
//! Backends speak base64 (packaged verification keys) and hex (field words,
//! raw proofs). Everything here normalizes into [`FieldElement`] vectors of a
//! fixed length, since the verifier contract takes fixed-size arrays.
//!
//! # Hex format
//!
//! [`parse_field`] accepts both `0x`-prefixed and raw hex. [`bytes_to_words`]
//! splits a byte string into 32-byte big-endian words, `0x`-prefixed.
//!
//! # Example
//!
//! ```rust
//! use zkid_sdk::codec::{resize, to_field_elements};
//!
//! let fields = to_field_elements(&["0x01", "02"]).unwrap();
//! let padded = resize(fields, 4);
//! assert_eq!(padded.len(), 4);
//! assert!(padded[3].is_zero());
//! ```

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use zkid_types::FieldElement;

use crate::error::{ZkIdError, ZkIdResult};

/// Width of one field word on the wire.
pub const FIELD_BYTES: usize = 32;

pub fn decode_base64(s: &str) -> ZkIdResult<Vec<u8>> {
    B64.decode(s.trim())
        .map_err(|e| ZkIdError::Decode(format!("invalid base64: {e}")))
}

pub fn decode_hex(s: &str) -> ZkIdResult<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| ZkIdError::Decode(format!("invalid hex: {e}")))
}

/// Parse one hex field string, prefixed or not.
pub fn parse_field(s: &str) -> ZkIdResult<FieldElement> {
    s.parse()
        .map_err(|e: zkid_types::ParseFieldError| ZkIdError::Decode(e.to_string()))
}

pub fn to_field_elements<S: AsRef<str>>(fields: &[S]) -> ZkIdResult<Vec<FieldElement>> {
    fields.iter().map(|f| parse_field(f.as_ref())).collect()
}

/// Split bytes into 32-byte big-endian words. A short trailing chunk is read
/// as a big-endian integer on its own.
pub fn bytes_to_words(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(FIELD_BYTES)
        .map(|chunk| {
            let mut word = [0u8; FIELD_BYTES];
            word[FIELD_BYTES - chunk.len()..].copy_from_slice(chunk);
            format!("0x{}", hex::encode(word))
        })
        .collect()
}

pub fn zeroed(len: usize) -> Vec<FieldElement> {
    vec![FieldElement::zero(); len]
}

/// Pad with zeros or truncate to exactly `target` elements.
pub fn resize(mut fields: Vec<FieldElement>, target: usize) -> Vec<FieldElement> {
    let len = fields.len();
    if len < target {
        tracing::debug!(from = len, to = target, "padding field vector");
        fields.resize(target, FieldElement::zero());
    } else if len > target {
        tracing::debug!(from = len, to = target, "truncating field vector");
        fields.truncate(target);
    }
    fields
}
