//! genie-migrate: move Genie spaces between Databricks workspaces.
//!
//! Subcommands:
//! - `export`: fetch a space from the source workspace into a JSON file
//! - `import`: publish a space file to the target workspace (create or update)
//! - `migrate`: full fetch → transform → publish in one run
//!
//! The Genie endpoints are beta and not yet in the official SDKs, so all
//! workspace access goes through the direct REST client in `genie-api`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod export;
mod files;
mod import;
mod migrate;
mod render;

#[derive(Parser)]
#[command(name = "genie-migrate")]
#[command(about = "Migrate Genie spaces between Databricks workspaces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a Genie space from the source workspace to a JSON file
    Export {
        /// Source workspace URL (e.g. https://workspace.cloud.databricks.com)
        #[arg(long, env = "DATABRICKS_SOURCE_HOST")]
        source_host: String,

        /// Source workspace access token
        #[arg(long, env = "DATABRICKS_SOURCE_TOKEN", hide_env_values = true)]
        source_token: String,

        /// Genie space id to export
        #[arg(long)]
        space_id: String,

        /// Output file path
        #[arg(long, default_value = "genie_space.json")]
        output: PathBuf,
    },

    /// Import a space file into the target workspace
    Import {
        /// Target workspace URL
        #[arg(long, env = "DATABRICKS_TARGET_HOST")]
        target_host: String,

        /// Target workspace access token
        #[arg(long, env = "DATABRICKS_TARGET_TOKEN", hide_env_values = true)]
        target_token: String,

        /// Input file path
        #[arg(long, default_value = "genie_space.json")]
        input: PathBuf,

        /// Path to a transformations JSON file (ordered search -> replace)
        #[arg(long)]
        transformations: Option<PathBuf>,

        /// Update an existing space instead of creating a new one
        #[arg(long)]
        update: bool,

        /// Space id to update (required with --update)
        #[arg(long)]
        space_id: Option<String>,

        /// Warehouse id for the new space (required without --update)
        #[arg(long)]
        warehouse_id: Option<String>,
    },

    /// Full migration from source to target workspace
    Migrate {
        /// Source workspace URL
        #[arg(long, env = "DATABRICKS_SOURCE_HOST")]
        source_host: String,

        /// Source workspace access token
        #[arg(long, env = "DATABRICKS_SOURCE_TOKEN", hide_env_values = true)]
        source_token: String,

        /// Genie space id to migrate
        #[arg(long)]
        space_id: String,

        /// Target workspace URL
        #[arg(long, env = "DATABRICKS_TARGET_HOST")]
        target_host: String,

        /// Target workspace access token
        #[arg(long, env = "DATABRICKS_TARGET_TOKEN", hide_env_values = true)]
        target_token: String,

        /// Path to a transformations JSON file (ordered search -> replace)
        #[arg(long)]
        transformations: Option<PathBuf>,

        /// Update an existing space instead of creating a new one
        #[arg(long)]
        update: bool,

        /// Space id to update in the target (required with --update)
        #[arg(long)]
        update_space_id: Option<String>,

        /// Warehouse id for the new space (required without --update)
        #[arg(long)]
        warehouse_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "genie_migrate=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            source_host,
            source_token,
            space_id,
            output,
        } => export::run(&source_host, &source_token, &space_id, &output).await,

        Commands::Import {
            target_host,
            target_token,
            input,
            transformations,
            update,
            space_id,
            warehouse_id,
        } => {
            import::run(
                &target_host,
                &target_token,
                &input,
                transformations.as_deref(),
                update,
                space_id,
                warehouse_id,
            )
            .await
        }

        Commands::Migrate {
            source_host,
            source_token,
            space_id,
            target_host,
            target_token,
            transformations,
            update,
            update_space_id,
            warehouse_id,
        } => {
            migrate::run(
                &source_host,
                &source_token,
                &space_id,
                &target_host,
                &target_token,
                transformations.as_deref(),
                update,
                update_space_id,
                warehouse_id,
            )
            .await
        }
    }
}
