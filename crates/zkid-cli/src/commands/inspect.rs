use std::path::Path;

use anyhow::{Context, Result};
use zkid_sdk::chain::{validate_chain, ChainValidation};
use zkid_sdk::submission::extract_zk_id;
use zkid_sdk::{ContractProofData, FieldElement};
use zkid_types::ShapeViolation;

use super::read_input;
use crate::output;

struct Report {
    violations: Vec<ShapeViolation>,
    zk_id: Option<FieldElement>,
    validation: ChainValidation,
}

impl Report {
    fn ok(&self) -> bool {
        self.violations.is_empty() && self.zk_id.is_some() && self.validation.is_valid()
    }
}

/// Accepts either bare proof data or full `verify_zkID` arguments.
fn parse_proof_data(text: &str) -> Result<ContractProofData> {
    let mut value: serde_json::Value = serde_json::from_str(text).context("input is not JSON")?;
    if let Some(inner) = value.get_mut("proof_data") {
        value = inner.take();
    }
    serde_json::from_value(value).context("input is not proof data or verify_zkID arguments")
}

fn inspect(data: &ContractProofData) -> Report {
    let zk_id = extract_zk_id(data);
    let validation = validate_chain(&data.public_inputs, zk_id.as_ref().unwrap_or(&FieldElement::zero()));
    Report {
        violations: data.check_shape(),
        zk_id,
        validation,
    }
}

pub fn run(input: &Path) -> Result<()> {
    let data = parse_proof_data(&read_input(input)?)?;
    let report = inspect(&data);

    if output::is_json() {
        let violations: Vec<_> = report
            .violations
            .iter()
            .map(|v| serde_json::json!({ "field": v.field, "expected": v.expected, "actual": v.actual }))
            .collect();
        output::json_output(&serde_json::json!({
            "ok": report.ok(),
            "zk_id": report.zk_id,
            "shape_violations": violations,
            "chain_valid": report.validation.is_valid(),
            "links": report.validation.links,
        }))?;
    } else {
        for v in &report.violations {
            output::error_msg(&format!(
                "{}: expected {} elements, found {}",
                v.field, v.expected, v.actual
            ));
        }
        output::chain_links(&report.validation.links);
        match &report.zk_id {
            Some(id) => output::label("zkID", &id.to_string()),
            None => output::error_msg("no zkID: disclosure nullifier is zero"),
        }
    }

    if !report.ok() {
        return Err(output::fail_with_hint(
            "proof data would be rejected by the registry",
            "re-run `zkid format` on the original proof results",
        ));
    }
    output::success("proof data is well-formed and the chain links");
    Ok(())
}

#[cfg(test)]
mod tests {
    use zkid_types::FormattedCircuitProof;

    use super::*;

    fn piece(inputs: [u64; 2]) -> FormattedCircuitProof {
        FormattedCircuitProof {
            public_inputs: inputs.map(FieldElement::from),
            ..FormattedCircuitProof::sentinel()
        }
    }

    fn linked() -> ContractProofData {
        ContractProofData::from_formatted(
            piece([10, 1]),
            piece([1, 2]),
            piece([2, 3]),
            piece([3, 77]),
        )
    }

    #[test]
    fn linked_data_passes() {
        let report = inspect(&linked());
        assert!(report.ok());
        assert_eq!(report.zk_id, Some(FieldElement::from(77)));
    }

    #[test]
    fn zero_nullifier_fails() {
        let data = ContractProofData::from_formatted(
            piece([10, 1]),
            piece([1, 2]),
            piece([2, 3]),
            piece([3, 0]),
        );
        let report = inspect(&data);
        assert!(report.validation.is_valid());
        assert!(!report.ok());
    }

    #[test]
    fn short_vector_fails() {
        let mut data = linked();
        data.proofs.proof_c.pop();
        let report = inspect(&data);
        assert_eq!(report.violations.len(), 1);
        assert!(!report.ok());
    }

    #[test]
    fn parses_bare_and_wrapped() {
        let data = linked();
        let bare = serde_json::to_string(&data).unwrap();
        let wrapped = serde_json::json!({ "proof_data": data, "zk_id": "0x4d", "add": true, "remove": false })
            .to_string();
        assert_eq!(parse_proof_data(&bare).unwrap(), linked());
        assert_eq!(parse_proof_data(&wrapped).unwrap(), linked());
        assert!(parse_proof_data("[1, 2]").is_err());
    }
}
