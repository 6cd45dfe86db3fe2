// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Verification-key resolution.
//!
//! A proof result only names its circuit; the key itself comes from the
//! circuit registry as base64 and is canonicalized into exactly
//! [`VKEY_SIZE`] field elements.
//!
//! [`try_resolve_verification_key`](ProofChainClient::try_resolve_verification_key)
//! reports every failure. [`resolve_verification_key`](ProofChainClient::resolve_verification_key)
//! is the fail-open variant the formatter uses: failures are logged and
//! replaced by [`VKEY_SIZE`] zeros.

use zkid_types::{FieldElement, ProofResult, VKEY_SIZE};

use crate::client::ProofChainClient;
use crate::codec::{decode_base64, resize, to_field_elements, zeroed};
use crate::error::{ZkIdError, ZkIdResult};
use crate::registry::CircuitRegistry;

fn required<'a>(value: &'a Option<String>, what: &'static str) -> ZkIdResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(ZkIdError::MissingMetadata(what))
}

/// Hashes may come prefixed or not; compare numerically when both parse.
fn same_hash(a: &str, b: &str) -> bool {
    match (a.parse::<FieldElement>(), b.parse::<FieldElement>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a.eq_ignore_ascii_case(b),
    }
}

impl<R: CircuitRegistry> ProofChainClient<R> {
    pub async fn try_resolve_verification_key(
        &self,
        proof: &ProofResult,
    ) -> ZkIdResult<Vec<FieldElement>> {
        let name = required(&proof.name, "name")?;
        let vkey_hash = required(&proof.vkey_hash, "vkeyHash")?;
        let version = required(&proof.version, "version")?;

        let timeout = self.lookup_timeout();
        let circuit = tokio::time::timeout(timeout, self.registry().packaged_circuit(version, name))
            .await
            .map_err(|_| {
                ZkIdError::Lookup(format!("timed out after {timeout:?} fetching {name}@{version}"))
            })??
            .ok_or_else(|| ZkIdError::Lookup(format!("circuit {name} not found for version {version}")))?;

        let vkey_b64 = circuit
            .vkey
            .as_deref()
            .ok_or_else(|| ZkIdError::Lookup(format!("packaged circuit {name} has no vkey")))?;

        if let Some(published) = circuit.vkey_hash.as_deref() {
            if !same_hash(published, vkey_hash) {
                tracing::warn!(
                    circuit = name,
                    expected = vkey_hash,
                    actual = published,
                    "packaged vkey hash differs from proof's vkeyHash"
                );
            }
        }

        let bytes = decode_base64(vkey_b64)?;
        let fields = to_field_elements(&self.canonicalizer().vkey_to_fields(&bytes)?)?;
        Ok(resize(fields, VKEY_SIZE))
    }

    /// Never fails: any error yields [`VKEY_SIZE`] zero elements.
    pub async fn resolve_verification_key(&self, proof: &ProofResult) -> Vec<FieldElement> {
        match self.try_resolve_verification_key(proof).await {
            Ok(vkey) => vkey,
            Err(e) => {
                tracing::warn!(
                    circuit = proof.display_name(),
                    version = proof.version.as_deref().unwrap_or("<none>"),
                    error = %e,
                    "verification key unavailable, substituting zero sentinel"
                );
                zeroed(VKEY_SIZE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use base64::{engine::general_purpose::STANDARD as B64, Engine};

    use super::*;
    use crate::registry::{PackagedCircuit, StaticCircuitRegistry};

    const NAME: &str = "sig_check_dsc_tbs_700_rsa_pkcs_4096_sha512";

    fn vkey_bytes(words: usize) -> Vec<u8> {
        (0..words * 32).map(|i| (i % 251) as u8 + 1).collect()
    }

    fn client_with(circuit: PackagedCircuit) -> ProofChainClient<StaticCircuitRegistry> {
        ProofChainClient::new(StaticCircuitRegistry::new().with("0.5.0", NAME, circuit))
    }

    fn proof_result() -> ProofResult {
        ProofResult::new(NAME, "0.5.0", "0xabc", "")
    }

    #[tokio::test]
    async fn resolves_and_pads() {
        let client = client_with(PackagedCircuit {
            vkey: Some(B64.encode(vkey_bytes(112))),
            ..Default::default()
        });
        let vkey = client.try_resolve_verification_key(&proof_result()).await.unwrap();
        assert_eq!(vkey.len(), VKEY_SIZE);
        assert!(!vkey[0].is_zero());
        assert!(vkey[112..].iter().all(FieldElement::is_zero));
    }

    #[tokio::test]
    async fn truncates_long_keys() {
        let client = client_with(PackagedCircuit {
            vkey: Some(B64.encode(vkey_bytes(140))),
            ..Default::default()
        });
        let vkey = client.try_resolve_verification_key(&proof_result()).await.unwrap();
        assert_eq!(vkey.len(), VKEY_SIZE);
        assert!(vkey.iter().all(|f| !f.is_zero()));
    }

    #[tokio::test]
    async fn missing_metadata() {
        let client = client_with(PackagedCircuit::default());
        let mut pr = proof_result();
        pr.vkey_hash = None;
        assert!(matches!(
            client.try_resolve_verification_key(&pr).await,
            Err(ZkIdError::MissingMetadata("vkeyHash"))
        ));
        pr.vkey_hash = Some("0x1".into());
        pr.version = Some(String::new());
        assert!(matches!(
            client.try_resolve_verification_key(&pr).await,
            Err(ZkIdError::MissingMetadata("version"))
        ));
        // fail-open wrapper still yields the sentinel
        assert_eq!(client.resolve_verification_key(&pr).await, zeroed(VKEY_SIZE));
    }

    #[tokio::test]
    async fn unknown_circuit_falls_back_to_zeros() {
        let client = ProofChainClient::new(StaticCircuitRegistry::new());
        assert!(matches!(
            client.try_resolve_verification_key(&proof_result()).await,
            Err(ZkIdError::Lookup(_))
        ));
        let vkey = client.resolve_verification_key(&proof_result()).await;
        assert_eq!(vkey.len(), VKEY_SIZE);
        assert!(vkey.iter().all(FieldElement::is_zero));
    }

    #[tokio::test]
    async fn malformed_vkey_is_decode_error() {
        let client = client_with(PackagedCircuit {
            vkey: Some("@@not-base64@@".into()),
            ..Default::default()
        });
        assert!(matches!(
            client.try_resolve_verification_key(&proof_result()).await,
            Err(ZkIdError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn circuit_without_vkey() {
        let client = client_with(PackagedCircuit::default());
        assert!(matches!(
            client.try_resolve_verification_key(&proof_result()).await,
            Err(ZkIdError::Lookup(_))
        ));
    }

    #[tokio::test]
    async fn hash_mismatch_only_warns() {
        let client = client_with(PackagedCircuit {
            vkey: Some(B64.encode(vkey_bytes(128))),
            vkey_hash: Some("0xdef".into()),
            ..Default::default()
        });
        assert!(client.try_resolve_verification_key(&proof_result()).await.is_ok());
    }

    struct SlowRegistry;

    impl CircuitRegistry for SlowRegistry {
        async fn packaged_circuit(
            &self,
            _version: &str,
            _name: &str,
        ) -> ZkIdResult<Option<PackagedCircuit>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
    }

    #[tokio::test]
    async fn lookup_times_out() {
        let client = ProofChainClient::new(SlowRegistry).with_lookup_timeout(Duration::from_millis(20));
        let err = client.try_resolve_verification_key(&proof_result()).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert_eq!(client.resolve_verification_key(&proof_result()).await, zeroed(VKEY_SIZE));
    }

    #[test]
    fn hash_comparison() {
        assert!(same_hash("0x0abc", "abc"));
        assert!(same_hash("ABC", "0xabc"));
        assert!(!same_hash("0x1", "0x2"));
        assert!(same_hash("not-hex", "NOT-HEX"));
    }
}
