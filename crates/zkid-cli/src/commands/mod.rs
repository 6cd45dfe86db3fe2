pub mod config;
pub mod format;
pub mod inspect;
pub mod vkey;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use zkid_sdk::config::SdkConfig;

/// Registry flags shared by commands that resolve verification keys.
#[derive(Args, Debug, Default, Clone)]
pub struct RegistryArgs {
    /// Hosted circuit registry base URL
    #[arg(long)]
    pub registry_url: Option<String>,
    /// Read packaged circuits from this directory instead
    #[arg(long, conflicts_with = "registry_url")]
    pub circuits_dir: Option<PathBuf>,
    /// Registry lookup timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

impl RegistryArgs {
    /// Flags win over the config file and environment.
    pub fn apply(&self, mut config: SdkConfig) -> SdkConfig {
        if let Some(url) = &self.registry_url {
            config.registry_url = url.clone();
            config.circuits_dir = None;
        }
        if let Some(dir) = &self.circuits_dir {
            config.circuits_dir = Some(dir.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.registry_timeout_secs = secs;
        }
        config
    }
}

/// Where verification keys will come from, for display.
pub fn registry_source(config: &SdkConfig) -> String {
    match &config.circuits_dir {
        Some(dir) => format!("local {}", dir.display()),
        None => config.registry_url.clone(),
    }
}

/// Whole file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("cannot read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let base = SdkConfig {
            circuits_dir: Some("/srv/circuits".into()),
            ..SdkConfig::default()
        };

        let args = RegistryArgs {
            registry_url: Some("http://localhost:4000".into()),
            ..Default::default()
        };
        let config = args.apply(base.clone());
        assert_eq!(config.circuits_dir, None);
        assert_eq!(registry_source(&config), "http://localhost:4000");

        let config = RegistryArgs {
            timeout_secs: Some(2),
            ..Default::default()
        }
        .apply(base);
        assert_eq!(config.registry_timeout_secs, 2);
        assert_eq!(registry_source(&config), "local /srv/circuits");
    }

    #[test]
    fn reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("proofs.json");
        std::fs::write(&path, "[]").unwrap();
        assert_eq!(read_input(&path).unwrap(), "[]");
        assert!(read_input(&tmp.path().join("missing.json")).is_err());
    }
}
