mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zkid_types::FieldElement;

#[derive(Parser)]
#[command(name = "zkid", about = "Format and check zkID proof chains for the identity registry")]
struct Cli {
    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Assemble four proof results into `verify_zkID` arguments
    Format {
        /// JSON array of proof results (`-` for stdin)
        input: PathBuf,
        /// Write the call arguments here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fail when the commitments don't link
        #[arg(long)]
        strict: bool,
        /// Fail unless exactly four proofs are given
        #[arg(long)]
        require_four: bool,
        /// Registry action: add or remove
        #[arg(long, default_value = "add")]
        action: String,
        /// zkID being registered; the disclosure nullifier must equal it
        #[arg(long)]
        zk_id: Option<FieldElement>,
        #[command(flatten)]
        registry: commands::RegistryArgs,
    },
    /// Resolve one circuit's verification key
    Vkey {
        /// Circuit name, e.g. sig_check_dsc_tbs_700_rsa_pkcs_4096_sha512
        name: String,
        /// Circuit package version
        #[arg(long)]
        version: String,
        /// vkeyHash reported by the prover
        #[arg(long)]
        vkey_hash: String,
        #[command(flatten)]
        registry: commands::RegistryArgs,
    },
    /// Check a proof-data or call-arguments file
    Inspect {
        /// Output of `zkid format` (`-` for stdin)
        input: PathBuf,
    },
    /// Show or change ~/.zkid/config.json
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Set a config value
    Set { key: String, value: String },
    /// Show the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    output::set_json_mode(cli.json);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Cmd::Format {
            input,
            out,
            strict,
            require_four,
            action,
            zk_id,
            registry,
        } => {
            let opts = commands::format::FormatOpts {
                out,
                strict,
                require_four,
                action,
                zk_id,
                registry,
            };
            commands::format::run(&input, opts).await?
        }
        Cmd::Vkey {
            name,
            version,
            vkey_hash,
            registry,
        } => commands::vkey::run(&name, &version, &vkey_hash, &registry).await?,
        Cmd::Inspect { input } => commands::inspect::run(&input)?,
        Cmd::Config { action } => match action {
            ConfigCmd::Set { key, value } => commands::config::set(&key, &value)?,
            ConfigCmd::Show => commands::config::show()?,
        },
    }
    Ok(())
}
