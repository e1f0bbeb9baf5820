//! # Size Preset Repository
//!
//! Stored size presets for the quick-entry form.
//!
//! ## One Default Per Brand
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save("Nike US", brand=Nike, default=true)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │    UPDATE size_presets SET is_default_for_brand = 0                    │
//! │     WHERE brand = 'Nike' AND name <> 'Nike US'                         │
//! │    UPSERT "Nike US"                                                    │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tessera_core::SizePreset;

/// Repository for size preset operations.
#[derive(Debug, Clone)]
pub struct PresetRepository {
    pool: SqlitePool,
}

impl PresetRepository {
    /// Creates a new PresetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PresetRepository { pool }
    }

    /// All presets, enabled or not, in name order.
    pub async fn list(&self) -> DbResult<Vec<SizePreset>> {
        let records = sqlx::query_as::<_, PresetRecord>(
            r#"
            SELECT name, preset_name, brand, sizes, is_default_for_brand, disabled
            FROM size_presets
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(SizePreset::from).collect())
    }

    /// Gets a preset by name.
    pub async fn get(&self, name: &str) -> DbResult<Option<SizePreset>> {
        let record = sqlx::query_as::<_, PresetRecord>(
            r#"
            SELECT name, preset_name, brand, sizes, is_default_for_brand, disabled
            FROM size_presets
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(SizePreset::from))
    }

    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM size_presets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    /// Inserts or replaces a preset.
    ///
    /// A brand default clears the default flag on the brand's other presets
    /// in the same transaction.
    pub async fn save(&self, preset: &SizePreset) -> DbResult<SizePreset> {
        let preset = preset.clone().normalize();
        debug!(name = %preset.name, brand = ?preset.brand, "Saving size preset");

        let mut tx = self.pool.begin().await?;

        if preset.is_default_for_brand {
            if let Some(brand) = preset.brand.as_deref() {
                sqlx::query(
                    r#"
                    UPDATE size_presets SET is_default_for_brand = 0
                    WHERE brand = ?1 AND name <> ?2
                    "#,
                )
                .bind(brand)
                .bind(&preset.name)
                .execute(&mut *tx)
                .await?;
            }
        }

        sqlx::query(
            r#"
            INSERT INTO size_presets (
                name, preset_name, brand, sizes,
                is_default_for_brand, disabled, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(name) DO UPDATE SET
                preset_name = excluded.preset_name,
                brand = excluded.brand,
                sizes = excluded.sizes,
                is_default_for_brand = excluded.is_default_for_brand,
                disabled = excluded.disabled,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&preset.name)
        .bind(&preset.preset_name)
        .bind(&preset.brand)
        .bind(&preset.sizes)
        .bind(preset.is_default_for_brand)
        .bind(preset.disabled)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(preset)
    }

    /// Deletes a preset. Returns false when it did not exist.
    pub async fn delete(&self, name: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM size_presets WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PresetRecord {
    name: String,
    preset_name: String,
    brand: Option<String>,
    sizes: String,
    is_default_for_brand: bool,
    disabled: bool,
}

impl From<PresetRecord> for SizePreset {
    fn from(record: PresetRecord) -> Self {
        SizePreset {
            name: record.name,
            preset_name: record.preset_name,
            brand: record.brand,
            sizes: record.sizes,
            is_default_for_brand: record.is_default_for_brand,
            disabled: record.disabled,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
