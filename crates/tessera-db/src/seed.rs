//! # Default Data
//!
//! What `tessera init` puts into a fresh database:
//! - the Color and Size variant attributes
//! - the configured stock units (e.g. `шт`, `Nos`)
//! - the three legacy size presets, only when no preset is stored yet
//!
//! Everything is idempotent, so running init twice changes nothing.

use serde::Serialize;
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use tessera_core::attributes::{COLOR_ATTRIBUTE, SIZE_ATTRIBUTE};
use tessera_core::presets::legacy_presets;

/// What a seeding run added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub attributes: usize,
    pub uoms: usize,
    pub presets: usize,
}

/// Seeds attributes, units and presets.
pub async fn seed_defaults(db: &Database, uoms: &[String]) -> DbResult<SeedReport> {
    let mut report = SeedReport::default();

    for attribute in [COLOR_ATTRIBUTE, SIZE_ATTRIBUTE] {
        if !db.attributes().exists(attribute).await? {
            db.attributes().create(attribute).await?;
            report.attributes += 1;
        }
    }

    for uom in uoms.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        if !db.uoms().exists(uom).await? {
            db.uoms().create(uom).await?;
            report.uoms += 1;
        }
    }

    if db.presets().count().await? == 0 {
        for preset in legacy_presets() {
            db.presets().save(&preset).await?;
            report.presets += 1;
        }
    }

    info!(
        attributes = report.attributes,
        uoms = report.uoms,
        presets = report.presets,
        "Default data seeded"
    );

    Ok(report)
}
