//! # tessera: Variant Identifier & Barcode Generator
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tessera <command>                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  init_tracing()          RUST_LOG or info (debug with --debug)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TesseraConfig::load()   defaults → tessera.toml → TESSERA_* → --db    │
//! │       │                                                                 │
//! │       ├── name / check-digit / validate-barcode   (pure, no database)  │
//! │       │                                                                 │
//! │       └── create-variants / presets / abbreviate / init                │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │           tessera_db::Database (VariantCatalog)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};
use config::TesseraConfig;
use tessera_core::VariantBatchRequest;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = TesseraConfig::load(cli.config.clone())?;
    if let Some(db) = cli.db {
        config.database.path = Some(db);
    }

    match cli.command {
        Command::CreateVariants {
            base_code,
            group,
            brand,
            color,
            sizes,
        } => {
            let request = VariantBatchRequest {
                base_code,
                item_group: group,
                brand,
                color,
                sizes,
            };
            commands::create_variants_cmd(&config, request).await?;
        }
        Command::Name {
            group,
            brand,
            mpn,
            variant_of,
            attributes,
            name,
        } => {
            commands::name(commands::draft(group, brand, mpn, variant_of, attributes, name))?;
        }
        Command::CheckDigit { digits } => commands::check_digit(&digits)?,
        Command::ValidateBarcode { barcode } => {
            if !commands::validate_barcode(&barcode)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Presets { brand } => commands::presets(&config, brand).await?,
        Command::Abbreviate {
            attribute,
            value,
            save,
        } => commands::abbreviate(&config, &attribute, &value, save).await?,
        Command::Init { force } => commands::init(&config, cli.config, force).await?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tessera_core=trace` - Trace the core crate only
/// - Default: INFO level (DEBUG with `--debug`)
fn init_tracing(debug: bool) {
    let default = if debug {
        "debug,sqlx=warn"
    } else {
        "info,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the JSON results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
