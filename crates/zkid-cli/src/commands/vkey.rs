use anyhow::Result;
use zkid_sdk::client::ProofChainClient;
use zkid_sdk::config::load_config;
use zkid_sdk::ProofResult;

use super::{registry_source, RegistryArgs};
use crate::output;

pub async fn run(name: &str, version: &str, vkey_hash: &str, registry: &RegistryArgs) -> Result<()> {
    let config = registry.apply(load_config()?);
    let source = registry_source(&config);
    let client = ProofChainClient::from_config(&config)?;

    let proof = ProofResult {
        name: Some(name.to_string()),
        vkey_hash: Some(vkey_hash.to_string()),
        version: Some(version.to_string()),
        proof: None,
    };

    let pb = output::spinner(&format!("resolving {name}@{version}..."));
    let result = client.try_resolve_verification_key(&proof).await;
    pb.finish_and_clear();
    let vkey = result.map_err(|e| {
        output::fail_with_hint(
            &e.to_string(),
            &format!("check the circuit name and version against {source}"),
        )
    })?;

    if output::is_json() {
        output::json_output(&serde_json::json!({
            "name": name,
            "version": version,
            "source": source,
            "vkey": vkey,
        }))?;
    } else {
        output::label("circuit", &format!("{name}@{version}"));
        output::label("source", &source);
        output::label("elements", &vkey.len().to_string());
        for field in &vkey {
            println!("{field}");
        }
    }
    Ok(())
}
