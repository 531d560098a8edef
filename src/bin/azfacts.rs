//! azfacts command-line interface.
//!
//! Converts JSON key styles and looks up Key Vault secrets from the shell.

use anyhow::{Context, Result};
use azfacts::keys::{camel_dict_to_snake_dict, snake_dict_to_camel_dict};
use azfacts::lookup::KeyVaultLookup;
use azfacts::{factory, BackendType, Config};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "azfacts")]
#[command(version, about = "Azure facts and Key Vault lookups with normalized keys", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the keys of a JSON document between CamelCase and snake_case
    #[command(after_help = "EXAMPLES:\n  \
        echo '{\"HTTPEndpoint\": 1}' | azfacts convert --to snake\n  \
        echo '{\"target_group_arns\": 1}' | azfacts convert --to camel --capitalize-first")]
    Convert {
        /// Target key style
        #[arg(long, value_enum)]
        to: KeyStyle,

        /// Use the reversible per-letter encoding (snake only)
        #[arg(long)]
        reversible: bool,

        /// Capitalize the first word (camel only)
        #[arg(long)]
        capitalize_first: bool,

        /// Keys whose values are copied unchanged (snake only)
        #[arg(long = "ignore", value_name = "KEY")]
        ignore: Vec<String>,

        /// Input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the values of Key Vault secrets as a JSON array
    Lookup {
        /// Key Vault URL
        #[arg(long, env = "AZURE_KEYVAULT_URL")]
        vault_url: String,

        /// Secret version applied to every term
        #[arg(long)]
        version: Option<String>,

        /// Secret names
        #[arg(required = true)]
        terms: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KeyStyle {
    Snake,
    Camel,
}

/// Converts the keys of `tree` to the `to` style.
///
/// `reversible` and `ignore` only apply to snake output, `capitalize_first`
/// only to camel output.
fn convert(
    tree: &Value,
    to: KeyStyle,
    reversible: bool,
    capitalize_first: bool,
    ignore: &[String],
) -> Value {
    match to {
        KeyStyle::Snake => {
            let ignore: Vec<&str> = ignore.iter().map(String::as_str).collect();
            camel_dict_to_snake_dict(tree, reversible, &ignore)
        }
        KeyStyle::Camel => snake_dict_to_camel_dict(tree, capitalize_first),
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("input is not valid JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            to,
            reversible,
            capitalize_first,
            ignore,
            input,
        } => {
            let tree = read_input(input.as_ref())?;
            let converted = convert(&tree, to, reversible, capitalize_first, &ignore);
            println!("{}", serde_json::to_string_pretty(&converted)?);
        }
        Commands::Lookup {
            vault_url,
            version,
            terms,
        } => {
            azfacts::init();
            let config = Config::new(BackendType::AzureKeyVault).with_vault_url(vault_url);
            let mut backend = factory::new_backend(config)?;
            backend.init().await?;

            let mut lookup = KeyVaultLookup::new(&*backend);
            if let Some(version) = version {
                lookup = lookup.with_version(version);
            }
            let values = lookup.run(&terms).await?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
    }

    Ok(())
}
