//! Resource loader CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   load / preload
//!   ──────────────▶ ┌──────────────┐  hit   ┌────────────────────┐
//!                   │ DynamicLoader│───────▶│ LoaderStore        │
//!                   │              │◀───────│  cache + tracker   │
//!                   └──────┬───────┘        └────────────────────┘
//!                          │ miss
//!                          ▼
//!                   ┌──────────────┐        ┌────────────────────┐
//!                   │  in-flight   │───────▶│ attempt loop       │
//!                   │  coalescing  │        │ timeout / backoff  │
//!                   └──────────────┘        └─────────┬──────────┘
//!                                                     ▼
//!                                           ┌────────────────────┐
//!                                           │ Registry loader    │
//!                                           │ (<Name>.toml)      │
//!                                           └────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use resource_loader::catalog::{catalog_registry, Component};
use resource_loader::config::load_or_default;
use resource_loader::observability::{logging, metrics};
use resource_loader::{DynamicLoader, LoaderStore, ResourceName};

#[derive(Parser)]
#[command(name = "resource-loader")]
#[command(about = "Load and warm module manifests with caching and retries", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "loader.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load one module and print its manifest
    Load { name: String },
    /// Warm several modules (defaults to the configured preload list)
    Preload { names: Vec<String> },
    /// List the known modules
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(&cli.config)?;

    logging::init_logging(&config.observability);
    tracing::info!("resource-loader v0.1.0 starting");

    tracing::info!(
        module_dir = %config.catalog.module_dir,
        timeout_ms = config.loader.timeout_ms,
        max_retries = config.loader.max_retries,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let registry = catalog_registry(&config.catalog.module_dir);
    let loader = DynamicLoader::from_config(registry, Arc::new(LoaderStore::new()), &config);

    let output = match cli.command {
        Commands::Load { name } => {
            let manifest = loader.load_by_name(&name).await?;
            json!({
                "module": &*manifest,
                "metrics": loader.all_metrics(),
            })
        }
        Commands::Preload { names } => {
            let names = if names.is_empty() {
                config.catalog.preload.clone()
            } else {
                names
            };
            let report = loader.preload_by_name(names.as_slice()).await;
            json!({
                "report": report,
                "cache": loader.cache_stats(),
                "metrics": loader.all_metrics(),
            })
        }
        Commands::List => {
            let names: Vec<&str> = Component::ALL.iter().map(|c| c.as_str()).collect();
            json!({ "modules": names })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
