use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zkid_sdk::chain::{AssemblyOptions, ChainPolicy};
use zkid_sdk::client::ProofChainClient;
use zkid_sdk::config::load_config;
use zkid_sdk::error::ZkIdError;
use zkid_sdk::submission::{RegistryAction, VerifyZkIdCall};
use zkid_sdk::{CircuitRole, ContractProofData, FieldElement, ProofResult, PROOF_COUNT};

use super::{read_input, registry_source, RegistryArgs};
use crate::output;

pub struct FormatOpts {
    pub out: Option<PathBuf>,
    pub strict: bool,
    pub require_four: bool,
    pub action: String,
    pub zk_id: Option<FieldElement>,
    pub registry: RegistryArgs,
}

fn with_hint(e: ZkIdError) -> anyhow::Error {
    let hint = match &e {
        ZkIdError::MissingProof { .. } => {
            Some("every proof name must contain one of dsc, id_data, integrity, disclose")
        }
        ZkIdError::ChainLinkMismatch { links } if links.iter().all(|l| l == "D→zkID") => {
            Some("the disclosure nullifier differs from --zk-id; check which identity is being registered")
        }
        ZkIdError::ChainLinkMismatch { .. } => Some(
            "the proofs likely come from different sessions; rerun without --strict to see every link",
        ),
        ZkIdError::Cardinality { .. } => Some("drop --require-four to assemble anyway"),
        ZkIdError::MissingZkId => Some("the disclosure proof produced a zero nullifier"),
        _ => None,
    };
    match hint {
        Some(hint) => output::fail_with_hint(&e.to_string(), hint),
        None => e.into(),
    }
}

fn count_warning(count: usize) -> Option<String> {
    match count.cmp(&PROOF_COUNT) {
        Ordering::Equal => None,
        Ordering::Greater => Some(format!(
            "expected {PROOF_COUNT} proofs, got {count}; extra proofs were ignored"
        )),
        Ordering::Less => Some(format!(
            "expected {PROOF_COUNT} proofs, got {count}; some proof names matched more than one circuit role"
        )),
    }
}

/// Roles whose vkey came back as the all-zero fallback.
fn unresolved_vkeys(data: &ContractProofData) -> Vec<CircuitRole> {
    CircuitRole::ALL
        .into_iter()
        .filter(|r| data.vkeys.get(*r).iter().all(FieldElement::is_zero))
        .collect()
}

pub async fn run(input: &Path, opts: FormatOpts) -> Result<()> {
    let action: RegistryAction = opts
        .action
        .parse()
        .map_err(|e: ZkIdError| output::fail_with_hint(&e.to_string(), "use --action add or --action remove"))?;

    let proofs: Vec<ProofResult> = serde_json::from_str(&read_input(input)?)
        .context("input must be a JSON array of proof results")?;

    let mut config = opts.registry.apply(load_config()?);
    if opts.strict {
        config.chain_policy = ChainPolicy::Enforce;
    }
    if opts.require_four {
        config.require_exact_count = true;
    }
    let client = ProofChainClient::from_config(&config)?.with_options(AssemblyOptions {
        expected_zk_id: opts.zk_id.clone(),
        ..config.assembly_options()
    });

    let pb = output::spinner(&format!(
        "assembling {} proofs via {}...",
        proofs.len(),
        registry_source(&config)
    ));
    let result = client.assemble_chain(&proofs).await;
    pb.finish_and_clear();
    let assembly = result.map_err(with_hint)?;

    if let Some(warning) = count_warning(assembly.shape.count) {
        output::warn(&warning);
    }
    if !assembly.shape.in_order() {
        output::warn("proofs were not in dsc → id_data → integrity → disclose order");
    }
    let unresolved = unresolved_vkeys(&assembly.data);
    for role in &unresolved {
        output::warn(&format!(
            "vkey for circuit {} ({}) could not be resolved, zeros used",
            role.letter(),
            role.description()
        ));
    }

    let validation = assembly.validation;
    let call = match opts.zk_id {
        Some(zk_id) => VerifyZkIdCall::with_zk_id(assembly.data, zk_id, action),
        None => VerifyZkIdCall::new(assembly.data, action),
    }
    .map_err(with_hint)?;
    let rendered = serde_json::to_string_pretty(&call)?;
    if let Some(out) = &opts.out {
        std::fs::write(out, &rendered).with_context(|| format!("cannot write {}", out.display()))?;
    }

    if output::is_json() {
        let inline_call = match &opts.out {
            Some(_) => serde_json::Value::Null,
            None => serde_json::to_value(&call)?,
        };
        output::json_output(&serde_json::json!({
            "method": VerifyZkIdCall::METHOD,
            "zk_id": call.zk_id,
            "action": action,
            "chain_valid": validation.is_valid(),
            "links": validation.links,
            "unresolved_vkeys": unresolved,
            "out": opts.out,
            "call": inline_call,
        }))?;
        return Ok(());
    }

    output::chain_links(&validation.links);
    output::label("zkID", &call.zk_id.to_string());
    output::label("action", &action.to_string());
    match &opts.out {
        Some(out) => output::success(&format!(
            "{} arguments written to {}",
            VerifyZkIdCall::METHOD,
            out.display()
        )),
        None => println!("{rendered}"),
    }
    if !validation.is_valid() {
        output::error_msg("proof chain does not link; the registry will reject this submission");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use zkid_sdk::{FormattedCircuitProof, VKEY_SIZE};

    use super::*;

    fn message(e: ZkIdError) -> String {
        with_hint(e).to_string()
    }

    #[test]
    fn hints_by_error_kind() {
        let missing = message(ZkIdError::MissingProof {
            roles: vec![CircuitRole::Integrity],
        });
        assert!(missing.contains("dsc, id_data, integrity, disclose"));

        let count = message(ZkIdError::Cardinality { expected: 4, got: 5 });
        assert!(count.contains("--require-four"));

        let zk_id = message(ZkIdError::ChainLinkMismatch {
            links: vec!["D→zkID".into()],
        });
        assert!(zk_id.contains("--zk-id"));

        let links = message(ZkIdError::ChainLinkMismatch {
            links: vec!["B→C".into(), "D→zkID".into()],
        });
        assert!(links.contains("different sessions"));

        assert!(message(ZkIdError::MissingZkId).contains("zero nullifier"));
    }

    #[test]
    fn other_errors_pass_through() {
        let err = with_hint(ZkIdError::Lookup("registry down".into()));
        assert!(!err.to_string().contains("hint:"));
        assert!(matches!(
            err.downcast_ref::<ZkIdError>(),
            Some(ZkIdError::Lookup(_))
        ));
    }

    #[test]
    fn count_warning_follows_direction() {
        assert_eq!(count_warning(PROOF_COUNT), None);
        assert!(count_warning(5).unwrap().contains("extra proofs were ignored"));
        let fewer = count_warning(3).unwrap();
        assert!(fewer.contains("got 3"));
        assert!(!fewer.contains("extra"));
    }

    #[test]
    fn detects_zero_vkeys() {
        let resolved = FormattedCircuitProof {
            vkey: vec![FieldElement::from(9u64); VKEY_SIZE],
            ..FormattedCircuitProof::sentinel()
        };
        let data = ContractProofData::from_formatted(
            resolved.clone(),
            FormattedCircuitProof::sentinel(),
            resolved,
            FormattedCircuitProof::sentinel(),
        );
        assert_eq!(
            unresolved_vkeys(&data),
            vec![CircuitRole::IdData, CircuitRole::Disclose]
        );
    }
}
