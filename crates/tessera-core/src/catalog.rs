//! # Variant Catalog
//!
//! The storage collaborator the core talks to. tessera-core never touches a
//! database itself; callers hand in something that implements
//! [`VariantCatalog`] (tessera-db's `Database` in production, in-memory
//! fakes in tests).
//!
//! ## What The Core Needs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Counter        total_items()              → barcode sequence          │
//! │  Lookups        barcode_exists(), find_item(), uom_exists()            │
//! │                 attribute_values(), size_presets()                     │
//! │  Persistence    insert_item(), insert_attribute_value()                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No locking is implied. Two concurrent batches can race on the same
//! counter value or item code; implementations should enforce uniqueness
//! (e.g. UNIQUE constraints) and report the loser as an insert error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::attributes::AttributeValue;
use crate::barcode::{Barcode, ItemBarcode};
use crate::presets::SizePreset;

/// A stored item as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantItem {
    /// Record name (equal to the item code for generated items).
    pub name: String,
    pub item_code: String,
    pub item_name: String,
    pub item_group: String,
    pub brand: Option<String>,
    pub stock_uom: String,
    /// First barcode attached to the item, if any.
    pub barcode: Option<ItemBarcode>,
}

/// An item the batch workflow asks the catalog to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVariantItem {
    pub item_code: String,
    pub item_name: String,
    pub item_group: String,
    pub brand: Option<String>,
    pub stock_uom: String,
    pub is_stock_item: bool,
    pub barcode: Barcode,
}

/// Storage collaborator for variant creation.
///
/// ## Error Policy
/// The core decides what a failure means per call:
/// - `barcode_exists`, `find_item`, `uom_exists`: fail-open (treated as "absent")
/// - `attribute_values`, `insert_attribute_value`: logged, never abort
/// - `total_items`: aborts minting for the affected item
/// - `insert_item`: recorded as a per-item batch error
/// - `size_presets`: propagated to the caller
#[async_trait]
pub trait VariantCatalog: Send + Sync {
    /// Error type of the underlying store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Current total number of items.
    async fn total_items(&self) -> Result<u64, Self::Error>;

    /// Whether any item already carries this barcode.
    async fn barcode_exists(&self, barcode: &str) -> Result<bool, Self::Error>;

    /// Looks up an item by code.
    async fn find_item(&self, item_code: &str) -> Result<Option<VariantItem>, Self::Error>;

    /// Registered values of an attribute; `None` when the attribute itself
    /// is not defined.
    async fn attribute_values(
        &self,
        attribute_name: &str,
    ) -> Result<Option<Vec<AttributeValue>>, Self::Error>;

    /// Appends a value to its attribute.
    async fn insert_attribute_value(&self, value: &AttributeValue) -> Result<(), Self::Error>;

    /// Whether a unit of measure is defined.
    async fn uom_exists(&self, uom: &str) -> Result<bool, Self::Error>;

    /// Persists a new item with its barcode.
    async fn insert_item(&self, item: &NewVariantItem) -> Result<VariantItem, Self::Error>;

    /// All stored size presets; `None` when no preset store is configured.
    async fn size_presets(&self) -> Result<Option<Vec<SizePreset>>, Self::Error>;
}
