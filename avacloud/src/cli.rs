///
/// This module implements the CLI interface for the AVACloud client: command
/// parsing, session setup and user-visible output.
///
/// Token acquisition, the data model and the workflows live in `avacloud-core`.
/// This module only wires configuration, the reqwest clients and printing together.
///
/// ## Subcommands
/// - `gaeb`: GAEB → Excel, project totals, new GAEB file, GAEB roundtrip.
/// - `xrechnung`: invoice/AVA → XRechnung and back.
/// - `count-positions`: offline totals for a saved project JSON file.
///
/// Any failure to obtain an access token aborts the run before the first conversion call.
use crate::conversion::AvaCloudClient;
use crate::load_config::{load_config, CliConfig};
use anyhow::{Context, Result};
use avacloud_core::model::ProjectDto;
use avacloud_core::positions::{project_position_count, project_total_price};
use avacloud_core::session::Session;
use avacloud_core::token::ReqwestTokenTransport;
use avacloud_core::workflow::{
    run_gaeb_example, run_xrechnung_example, ExampleFiles, DEFAULT_GAEB_INPUT,
    DEFAULT_XRECHNUNG_INPUT,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// CLI for the AVACloud GAEB and XRechnung conversion API.
#[derive(Parser)]
#[clap(
    name = "avacloud",
    version,
    about = "Convert GAEB and XRechnung documents with AVACloud"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the GAEB examples: Excel export, project totals, new GAEB file, roundtrip
    Gaeb {
        /// Path to an optional YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// GAEB input file
        #[clap(long, default_value = DEFAULT_GAEB_INPUT)]
        input: PathBuf,
        /// Directory for converted files
        #[clap(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Run the XRechnung examples: create XRechnung documents and read them back
    Xrechnung {
        /// Path to an optional YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// XRechnung input file
        #[clap(long, default_value = DEFAULT_XRECHNUNG_INPUT)]
        input: PathBuf,
        /// Directory for converted files
        #[clap(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Print total price and position count of a saved AVA project JSON file
    CountPositions {
        /// Path to the project JSON file
        #[clap(long)]
        project: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Gaeb {
            config,
            input,
            output_dir,
        } => {
            let client = connect(config.as_deref()).await?;
            let files = ExampleFiles::new(input, output_dir);
            let report = run_gaeb_example(&client, &files).await?;
            tracing::info!(command = "gaeb", ?report, "GAEB example complete");
            println!("Saved Excel conversion result to: {}", report.excel_file.display());
            println!("Project total price (net): {}", report.summary.total_price);
            println!("Count of positions: {}", report.summary.position_count);
            println!("Saved new GAEB file to: {}", report.created_gaeb_file.display());
            println!("Saved GAEB roundtrip result to: {}", report.roundtrip_file.display());
            Ok(())
        }
        Commands::Xrechnung {
            config,
            input,
            output_dir,
        } => {
            let client = connect(config.as_deref()).await?;
            let files = ExampleFiles::new(input, output_dir);
            let report = run_xrechnung_example(&client, &files).await?;
            tracing::info!(command = "xrechnung", ?report, "XRechnung example complete");
            println!("Saved XRechnung creation result to: {}", report.from_invoice_file.display());
            println!("Saved XRechnung creation result to: {}", report.from_ava_file.display());
            match report.invoice_total_net {
                Some(total) => println!("Total price from invoice: {total}"),
                None => println!("Total price from invoice: n/a"),
            }
            println!("Total price from wrapper: {}", report.wrapper_total_price);
            Ok(())
        }
        Commands::CountPositions { project } => {
            let project = read_project(&project)?;
            println!("Project total price (net): {}", project_total_price(&project));
            println!("Count of positions: {}", project_position_count(&project));
            Ok(())
        }
    }
}

/// Loads configuration, acquires the access token and builds the conversion client.
async fn connect(config: Option<&Path>) -> Result<AvaCloudClient> {
    let CliConfig {
        avacloud,
        credentials,
    } = load_config(config)?;

    let transport = ReqwestTokenTransport::new();
    let session = Session::connect(&transport, &avacloud, &credentials)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to obtain an access token");
            eprintln!(
                "Failed to obtain an access token. Have you read the documentation and set up your OAuth2 client?"
            );
            e
        })
        .context("No access token, exiting")?;

    Ok(AvaCloudClient::new(session))
}

fn read_project(path: &Path) -> Result<ProjectDto> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse project JSON in {}", path.display()))
}
