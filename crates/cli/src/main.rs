use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use datascope_api::DataServiceClient;
use datascope_engine::{ParameterForm, encode_query};

#[derive(Parser)]
#[command(name = "datascope", version, about = "Terminal explorer for parameterized dataset services")]
struct Cli {
    /// Base URL of the dataset service (https required off localhost)
    #[arg(long, env = "DATASCOPE_BASE_URL")]
    base_url: String,

    /// Path of the project catalog endpoint
    #[arg(long, default_value = "/catalog")]
    catalog_path: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a dataset's filter schema, apply overrides, and print the
    /// result rows as JSON (headless; useful for scripting and smoke tests)
    Query {
        /// Parameters endpoint of the dataset
        #[arg(long)]
        parameters_path: String,

        /// Result endpoint of the dataset
        #[arg(long)]
        result_path: String,

        /// Override a filter before submission (repeatable).
        /// Selects take an option id, multi-selects a comma-separated list,
        /// ranges a start..end pair.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let client = DataServiceClient::new(&cli.base_url)?;

    match cli.command {
        None => datascope_tui::run(client, cli.catalog_path).await,
        Some(Command::Query { parameters_path, result_path, set }) => {
            run_query(&client, &parameters_path, &result_path, &set).await
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Headless query: mount the form from the served schema, apply `--set`
/// overrides through the same reducers the TUI uses, submit, print rows.
async fn run_query(client: &DataServiceClient, parameters_path: &str, result_path: &str, overrides: &[String]) -> Result<()> {
    let defs = client.fetch_parameters(parameters_path, None).await?;
    let mut form = ParameterForm::new(defs);

    for entry in overrides {
        let (name, value) = entry
            .split_once('=')
            .with_context(|| format!("--set expects NAME=VALUE, got '{}'", entry))?;
        let change = form
            .apply_override(name, value)
            .with_context(|| format!("cannot apply --set {}", entry))?;
        if change.is_none() {
            tracing::debug!(%name, "override matched the default value");
        }
    }

    let pairs = form.query_pairs();
    eprintln!("query: {}", encode_query(&pairs));

    let table = client.fetch_table(result_path, &pairs).await?;
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
