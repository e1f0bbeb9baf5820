//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! - `--config <path>`: Config file instead of the platform default
//! - `--db <path>`: Database file, overrides config and environment
//! - `--debug`: Enable debug logging

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tessera_core::VariantAttribute;

/// Tessera - variant identifiers and barcodes for retail items
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create one item per size for an article and color
    #[command(
        name = "create-variants",
        after_help = "\
EXAMPLES:
    tessera create-variants AB-12 --group Shoes --brand Nike --color Red --sizes \"36, 38, 40\"

    # Running the same command again reports the items as existing"
    )]
    CreateVariants {
        /// Article / manufacturer part number
        base_code: String,

        /// Item group of the new items
        #[arg(long)]
        group: String,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        color: String,

        /// Comma-separated sizes
        #[arg(long)]
        sizes: String,
    },

    /// Print the code and display name an unsaved item would get
    Name {
        #[arg(long)]
        group: String,

        #[arg(long)]
        brand: Option<String>,

        /// Manufacturer part number
        #[arg(long)]
        mpn: Option<String>,

        /// Template item this is a variant of
        #[arg(long)]
        variant_of: Option<String>,

        /// Variant attribute as NAME=VALUE (repeatable)
        #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = parse_attribute)]
        attributes: Vec<VariantAttribute>,

        /// Current record name, if the item already has one
        #[arg(long)]
        name: Option<String>,
    },

    /// Compute the EAN-13 check digit of 12 digits
    CheckDigit {
        /// Twelve data digits
        digits: String,
    },

    /// Check a 13-digit EAN-13 barcode
    ValidateBarcode { barcode: String },

    /// List the size presets offered for a brand
    Presets {
        #[arg(long)]
        brand: Option<String>,
    },

    /// Show (or register) the abbreviation of an attribute value
    Abbreviate {
        /// Attribute name, e.g. Color
        attribute: String,

        value: String,

        /// Register the value if it is new
        #[arg(long)]
        save: bool,
    },

    /// Create the database, seed defaults and write a config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Parses `NAME=VALUE` into a variant attribute.
pub fn parse_attribute(text: &str) -> Result<VariantAttribute, String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", text))?;

    if name.trim().is_empty() {
        return Err(format!("attribute name missing in '{}'", text));
    }

    Ok(VariantAttribute::new(name.trim(), value.trim()))
}
