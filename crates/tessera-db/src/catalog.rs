//! # VariantCatalog over SQLite
//!
//! Connects tessera-core's collaborator trait to the repositories.
//!
//! ```text
//! VariantCatalog method        Repository call
//! ─────────────────────        ─────────────────────────────
//! total_items                  items().count()
//! barcode_exists               items().barcode_exists()
//! find_item                    items().get_by_code()
//! insert_item                  items().insert()
//! attribute_values             attributes().values()
//! insert_attribute_value       attributes().insert_value()
//! uom_exists                   uoms().exists()
//! size_presets                 presets().list()  (empty → None)
//! ```
//!
//! An empty preset table counts as "no preset store", so a fresh database
//! offers the legacy presets until `seed_defaults` or the user stores some.

use async_trait::async_trait;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use tessera_core::{AttributeValue, NewVariantItem, SizePreset, VariantCatalog, VariantItem};

#[async_trait]
impl VariantCatalog for Database {
    type Error = DbError;

    async fn total_items(&self) -> DbResult<u64> {
        self.items().count().await
    }

    async fn barcode_exists(&self, barcode: &str) -> DbResult<bool> {
        self.items().barcode_exists(barcode).await
    }

    async fn find_item(&self, item_code: &str) -> DbResult<Option<VariantItem>> {
        self.items().get_by_code(item_code).await
    }

    async fn attribute_values(&self, attribute_name: &str) -> DbResult<Option<Vec<AttributeValue>>> {
        self.attributes().values(attribute_name).await
    }

    async fn insert_attribute_value(&self, value: &AttributeValue) -> DbResult<()> {
        self.attributes().insert_value(value).await
    }

    async fn uom_exists(&self, uom: &str) -> DbResult<bool> {
        self.uoms().exists(uom).await
    }

    async fn insert_item(&self, item: &NewVariantItem) -> DbResult<VariantItem> {
        self.items().insert(item).await
    }

    async fn size_presets(&self) -> DbResult<Option<Vec<SizePreset>>> {
        let presets = self.presets().list().await?;
        Ok(if presets.is_empty() { None } else { Some(presets) })
    }
}
