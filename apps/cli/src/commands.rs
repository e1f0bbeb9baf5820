//! Command handlers. Each prints JSON on stdout; logs go to stderr.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

use tessera_core::abbreviation::assign_abbreviation;
use tessera_core::batch::{create_variants, register_attribute_value};
use tessera_core::checksum::{compute_check_digit, is_valid_ean13};
use tessera_core::identifier::autoname;
use tessera_core::presets::get_size_presets;
use tessera_core::{AttributeSet, ItemDraft, Naming, VariantAttribute, VariantBatchRequest};
use tessera_db::{seed_defaults, Database, DbConfig};

use crate::config::TesseraConfig;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn open_database(config: &TesseraConfig) -> Result<Database> {
    let path = config.database_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let db_config = DbConfig::new(&path).max_connections(config.database.max_connections);
    Database::new(db_config)
        .await
        .with_context(|| format!("opening database {}", path.display()))
}

// =============================================================================
// Database-backed commands
// =============================================================================

pub async fn create_variants_cmd(
    config: &TesseraConfig,
    request: VariantBatchRequest,
) -> Result<()> {
    let db = open_database(config).await?;
    let result = create_variants(&db, &request, &config.batch_options()).await?;

    if !result.errors.is_empty() {
        warn!(errors = result.errors.len(), "Some variants could not be created");
    }

    print_json(&result)
}

pub async fn presets(config: &TesseraConfig, brand: Option<String>) -> Result<()> {
    let db = open_database(config).await?;
    let list = get_size_presets(&db, brand.as_deref()).await?;
    print_json(&list)
}

pub async fn abbreviate(
    config: &TesseraConfig,
    attribute: &str,
    value: &str,
    save: bool,
) -> Result<()> {
    let db = open_database(config).await?;
    let value = value.trim();

    let Some(values) = db.attributes().values(attribute).await? else {
        bail!("attribute '{}' is not defined", attribute);
    };
    let set = AttributeSet::with_values(attribute, values);

    if let Some(existing) = set.get(value) {
        return print_json(&json!({ "value": existing, "registered": false }));
    }

    if save {
        let added = register_attribute_value(&db, attribute, value)
            .await
            .with_context(|| format!("registering {}={}", attribute, value))?;
        return print_json(&json!({ "value": added, "registered": true }));
    }

    let abbreviation = assign_abbreviation(set.abbreviations(), value);
    print_json(&json!({
        "value": { "attribute_name": attribute, "value": value, "abbreviation": abbreviation },
        "registered": false,
    }))
}

pub async fn init(
    config: &TesseraConfig,
    config_path: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let db = open_database(config).await?;
    let report = seed_defaults(&db, &config.stock.uom_candidates).await?;

    let target = config_path.or_else(TesseraConfig::default_config_path);
    let written = match target {
        Some(path) if force || !path.exists() => Some(config.save(Some(path))?),
        _ => None,
    };

    info!(database = %config.database_path().display(), "Initialized");
    print_json(&json!({
        "database": config.database_path(),
        "config_written": written,
        "seeded": report,
    }))
}

// =============================================================================
// Pure commands
// =============================================================================

pub fn name(draft: ItemDraft) -> Result<()> {
    match autoname(&draft) {
        Naming::Assigned(identity) => print_json(&identity),
        Naming::NotApplicable(reason) => print_json(&json!({
            "skipped": reason,
            "reason": reason.to_string(),
        })),
    }
}

pub fn check_digit(digits: &str) -> Result<()> {
    let digit = compute_check_digit(digits)?;
    print_json(&json!({
        "check_digit": digit,
        "barcode": format!("{}{}", digits, digit),
    }))
}

pub fn validate_barcode(barcode: &str) -> Result<bool> {
    let valid = is_valid_ean13(barcode);
    print_json(&json!({ "barcode": barcode, "valid": valid }))?;
    Ok(valid)
}

pub fn draft(
    group: String,
    brand: Option<String>,
    mpn: Option<String>,
    variant_of: Option<String>,
    attributes: Vec<VariantAttribute>,
    name: Option<String>,
) -> ItemDraft {
    ItemDraft {
        name,
        item_group: group,
        brand,
        manufacturer_part_no: mpn,
        variant_of,
        attributes,
    }
}
