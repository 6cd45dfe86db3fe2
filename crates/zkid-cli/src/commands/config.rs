use anyhow::Result;
use zkid_sdk::config::{config_path, load_config, load_config_from, save_config, ALLOWED_KEYS};

use crate::output;

pub fn set(key: &str, value: &str) -> Result<()> {
    // file only, so env overrides don't get persisted
    let mut config = load_config_from(&config_path()?)?;
    config.set(key, value).map_err(|e| {
        output::fail_with_hint(
            &e.to_string(),
            &format!("allowed keys: {}", ALLOWED_KEYS.join(", ")),
        )
    })?;
    save_config(&config)?;

    if output::is_json() {
        output::json_output(&serde_json::json!({ "key": key, "value": value }))?;
    } else {
        output::success(&format!("{key} updated"));
    }
    Ok(())
}

pub fn show() -> Result<()> {
    let path = config_path()?;
    let config = load_config()?;

    if output::is_json() {
        output::json_output(&serde_json::json!({
            "path": path,
            "config": config,
        }))?;
    } else {
        output::label("path", &path.display().to_string());
        output::label("registry_url", &config.registry_url);
        output::label(
            "registry_timeout_secs",
            &config.registry_timeout_secs.to_string(),
        );
        output::label(
            "circuits_dir",
            &config
                .circuits_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "-".into()),
        );
        output::label(
            "chain_policy",
            &serde_json::to_value(config.chain_policy)?
                .as_str()
                .unwrap_or_default()
                .to_string(),
        );
        output::label("require_exact_count", &config.require_exact_count.to_string());
    }
    Ok(())
}
