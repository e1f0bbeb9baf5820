//! # Batch Variant Creation
//!
//! Creates one item per size for a single article and color, the workflow
//! behind the quick-entry "sizes" field.
//!
//! ## Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "AB-12", Red, "S, M, L"                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_sizes ──► [] ? ──► ValidationError (whole request fails)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  register Color=Red, Size=S/M/L (new values get abbreviations)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for each size:                                                        │
//! │     AB-12-RED-S exists? ──► yes: report Existing                       │
//! │            │                                                            │
//! │            no                                                           │
//! │            ▼                                                            │
//! │     mint barcode ──► insert ──► ok: report Created                     │
//! │                               └─ err: "AB-12-RED-S: <error>" in errors │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sizes are independent: one failing insert never stops the others, and
//! re-running the same request only reports the existing items.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use ts_rs::TS;

use crate::attributes::{AttributeSet, AttributeValue, COLOR_ATTRIBUTE, SIZE_ATTRIBUTE};
use crate::barcode::{AllocationAttempts, Barcode, ExistenceCheck};
use crate::catalog::{NewVariantItem, VariantCatalog, VariantItem};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::identifier::{batch_item_code, batch_item_name, parse_sizes};
use crate::{DEFAULT_MAX_BARCODE_TRIES, FALLBACK_STOCK_UOM};

// =============================================================================
// Request / Options / Result
// =============================================================================

/// One article in one color, in several sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantBatchRequest {
    /// Article / MPN text (not yet an item code).
    pub base_code: String,
    pub item_group: String,
    pub brand: Option<String>,
    pub color: String,
    /// Comma-separated sizes, e.g. `"36, 38, 40"`.
    pub sizes: String,
}

/// Tunables for batch creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Attempts per barcode before accepting a possible duplicate.
    pub max_barcode_tries: u32,
    /// Preferred stock units, first known one wins.
    pub stock_uom_candidates: Vec<String>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            max_barcode_tries: DEFAULT_MAX_BARCODE_TRIES,
            // Localized setups use "шт", standard ones "Nos"
            stock_uom_candidates: vec!["шт".to_string(), "Nos".to_string()],
        }
    }
}

/// Whether a result item was created by this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VariantOutcome {
    Created,
    Existing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantResultItem {
    pub item: VariantItem,
    pub outcome: VariantOutcome,
}

/// Items produced by a batch plus per-size errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantBatchResult {
    /// Created and pre-existing items, in size order.
    pub items: Vec<VariantResultItem>,
    /// Always `items.len()`.
    pub count: usize,
    /// `"{item_code}: {error}"` for every size that could not be created.
    pub errors: Vec<String>,
}

impl VariantBatchResult {
    fn push(&mut self, item: VariantItem, outcome: VariantOutcome) {
        self.items.push(VariantResultItem { item, outcome });
        self.count = self.items.len();
    }

    /// Number of items created by this run.
    pub fn created_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.outcome == VariantOutcome::Created)
            .count()
    }

    /// Number of items that already existed.
    pub fn existing_count(&self) -> usize {
        self.count - self.created_count()
    }

    /// Item codes in result order.
    pub fn item_codes(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.item.item_code.as_str()).collect()
    }
}

// =============================================================================
// Batch Creation
// =============================================================================

/// Creates the variants of one article and color across several sizes.
///
/// ## Returns
/// * `Ok(VariantBatchResult)` - Even when some (or all) sizes failed
/// * `Err(CoreError::Validation)` - No sizes, or a blank base code / color
pub async fn create_variants<C>(
    catalog: &C,
    request: &VariantBatchRequest,
    options: &BatchOptions,
) -> CoreResult<VariantBatchResult>
where
    C: VariantCatalog + ?Sized,
{
    let sizes = parse_sizes(&request.sizes)?;
    if request.base_code.trim().is_empty() {
        return Err(ValidationError::required("base_code").into());
    }
    if request.color.trim().is_empty() {
        return Err(ValidationError::required("color").into());
    }

    info!(
        base_code = %request.base_code,
        color = %request.color,
        sizes = sizes.len(),
        "Creating variants"
    );

    register_attribute_value(catalog, COLOR_ATTRIBUTE, request.color.trim()).await;
    for size in &sizes {
        register_attribute_value(catalog, SIZE_ATTRIBUTE, size).await;
    }

    let stock_uom = default_stock_uom(catalog, &options.stock_uom_candidates).await;
    let brand = request
        .brand
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty());

    let mut result = VariantBatchResult::default();

    for size in &sizes {
        let item_code = batch_item_code(&request.base_code, &request.color, size);

        match catalog.find_item(&item_code).await {
            Ok(Some(existing)) => {
                debug!(item_code = %item_code, "Variant already exists");
                result.push(existing, VariantOutcome::Existing);
                continue;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(item_code = %item_code, error = %err, "Item lookup failed, treating as new");
            }
        }

        let new_item = NewVariantItem {
            item_name: batch_item_name(
                &request.item_group,
                brand,
                &request.base_code,
                &request.color,
                size,
            ),
            item_code: item_code.clone(),
            item_group: request.item_group.clone(),
            brand: brand.map(str::to_string),
            stock_uom: stock_uom.clone(),
            is_stock_item: true,
            barcode: match mint_barcode(catalog, options.max_barcode_tries).await {
                Ok(barcode) => barcode,
                Err(err) => {
                    error!(item_code = %item_code, error = %err, "Failed to mint barcode");
                    result.errors.push(format!("{}: {}", item_code, err));
                    continue;
                }
            },
        };

        match catalog.insert_item(&new_item).await {
            Ok(item) => {
                debug!(item_code = %item_code, barcode = %new_item.barcode, "Variant created");
                result.push(item, VariantOutcome::Created);
            }
            Err(err) => {
                let err = CoreError::Persistence(err.to_string());
                error!(item_code = %item_code, error = %err, "Failed to create variant");
                result.errors.push(format!("{}: {}", item_code, err));
            }
        }
    }

    info!(
        created = result.created_count(),
        existing = result.existing_count(),
        errors = result.errors.len(),
        "Variant batch complete"
    );

    Ok(result)
}

/// Mints a barcode against the catalog's counter and duplicate check.
///
/// Same policy as [`crate::barcode::allocate_unique_barcode`]: the counter
/// is read on every attempt, lookup failures count as "not found", and the
/// last candidate is returned when every attempt collides.
pub async fn mint_barcode<C>(catalog: &C, max_tries: u32) -> CoreResult<Barcode>
where
    C: VariantCatalog + ?Sized,
{
    let mut attempts = AllocationAttempts::new(max_tries);

    loop {
        let count = catalog
            .total_items()
            .await
            .map_err(|e| CoreError::Catalog(e.to_string()))?;
        let candidate = attempts.candidate(count)?;
        let check = ExistenceCheck::from_lookup(catalog.barcode_exists(candidate.digits()).await);

        if let Some(barcode) = attempts.settle(candidate, check) {
            return Ok(barcode);
        }
    }
}

/// Makes sure `value` is registered on `attribute_name`.
///
/// ## Returns
/// The newly registered value, or `None` when it already existed, the
/// attribute is not defined, or the catalog failed (logged).
pub async fn register_attribute_value<C>(
    catalog: &C,
    attribute_name: &str,
    value: &str,
) -> Option<AttributeValue>
where
    C: VariantCatalog + ?Sized,
{
    let values = match catalog.attribute_values(attribute_name).await {
        Ok(Some(values)) => values,
        Ok(None) => {
            debug!(attribute = %attribute_name, "Attribute not defined, skipping value registration");
            return None;
        }
        Err(err) => {
            warn!(attribute = %attribute_name, error = %err, "Failed to load attribute values");
            return None;
        }
    };

    let mut set = AttributeSet::with_values(attribute_name, values);
    let added = set.insert_if_missing(value)?.clone();

    match catalog.insert_attribute_value(&added).await {
        Ok(()) => {
            debug!(
                attribute = %attribute_name,
                value = %added.value,
                abbr = %added.abbreviation,
                "Attribute value registered"
            );
            Some(added)
        }
        Err(err) => {
            warn!(attribute = %attribute_name, value = %value, error = %err, "Failed to register attribute value");
            None
        }
    }
}

/// Picks the first candidate unit the catalog knows, else `"Nos"`.
pub async fn default_stock_uom<C>(catalog: &C, candidates: &[String]) -> String
where
    C: VariantCatalog + ?Sized,
{
    for candidate in candidates {
        match catalog.uom_exists(candidate).await {
            Ok(true) => return candidate.clone(),
            Ok(false) => {}
            Err(err) => warn!(uom = %candidate, error = %err, "UOM lookup failed"),
        }
    }
    FALLBACK_STOCK_UOM.to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::{allocate_barcode, ItemBarcode};
    use crate::presets::SizePreset;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct FakeError(String);

    #[derive(Default)]
    struct State {
        items: Vec<VariantItem>,
        extra_barcodes: HashSet<String>,
        attributes: HashMap<String, Vec<AttributeValue>>,
        uoms: HashSet<String>,
        reject_codes: HashSet<String>,
        broken_lookups: bool,
        inserts: usize,
        count_reads: usize,
    }

    #[derive(Default)]
    struct FakeCatalog {
        state: Mutex<State>,
    }

    impl FakeCatalog {
        fn with_attributes() -> Self {
            let catalog = FakeCatalog::default();
            {
                let mut state = catalog.state.lock().unwrap();
                state.attributes.insert("Color".into(), Vec::new());
                state.attributes.insert("Size".into(), Vec::new());
                state.uoms.insert("Nos".into());
            }
            catalog
        }

        fn reject(&self, code: &str) {
            self.state.lock().unwrap().reject_codes.insert(code.into());
        }
    }

    #[async_trait]
    impl VariantCatalog for FakeCatalog {
        type Error = FakeError;

        async fn total_items(&self) -> Result<u64, FakeError> {
            let mut state = self.state.lock().unwrap();
            state.count_reads += 1;
            Ok(state.items.len() as u64)
        }

        async fn barcode_exists(&self, barcode: &str) -> Result<bool, FakeError> {
            let state = self.state.lock().unwrap();
            if state.broken_lookups {
                return Err(FakeError("barcode table missing".into()));
            }
            Ok(state.extra_barcodes.contains(barcode)
                || state
                    .items
                    .iter()
                    .any(|i| i.barcode.as_ref().is_some_and(|b| b.barcode == barcode)))
        }

        async fn find_item(&self, item_code: &str) -> Result<Option<VariantItem>, FakeError> {
            let state = self.state.lock().unwrap();
            if state.broken_lookups {
                return Err(FakeError("item table missing".into()));
            }
            Ok(state.items.iter().find(|i| i.item_code == item_code).cloned())
        }

        async fn attribute_values(
            &self,
            attribute_name: &str,
        ) -> Result<Option<Vec<AttributeValue>>, FakeError> {
            Ok(self.state.lock().unwrap().attributes.get(attribute_name).cloned())
        }

        async fn insert_attribute_value(&self, value: &AttributeValue) -> Result<(), FakeError> {
            let mut state = self.state.lock().unwrap();
            state
                .attributes
                .entry(value.attribute_name.clone())
                .or_default()
                .push(value.clone());
            Ok(())
        }

        async fn uom_exists(&self, uom: &str) -> Result<bool, FakeError> {
            Ok(self.state.lock().unwrap().uoms.contains(uom))
        }

        async fn insert_item(&self, item: &NewVariantItem) -> Result<VariantItem, FakeError> {
            let mut state = self.state.lock().unwrap();
            if state.reject_codes.contains(&item.item_code) {
                return Err(FakeError("disk full".into()));
            }
            let stored = VariantItem {
                name: item.item_code.clone(),
                item_code: item.item_code.clone(),
                item_name: item.item_name.clone(),
                item_group: item.item_group.clone(),
                brand: item.brand.clone(),
                stock_uom: item.stock_uom.clone(),
                barcode: Some(ItemBarcode::from(item.barcode.clone())),
            };
            state.items.push(stored.clone());
            state.inserts += 1;
            Ok(stored)
        }

        async fn size_presets(&self) -> Result<Option<Vec<SizePreset>>, FakeError> {
            Ok(None)
        }
    }

    fn request(sizes: &str) -> VariantBatchRequest {
        VariantBatchRequest {
            base_code: "AB-12".into(),
            item_group: "Shoes".into(),
            brand: Some("Nike".into()),
            color: "Red".into(),
            sizes: sizes.into(),
        }
    }

    #[tokio::test]
    async fn test_creates_one_item_per_size() {
        let catalog = FakeCatalog::with_attributes();
        let result = create_variants(&catalog, &request("S, M, L"), &BatchOptions::default())
            .await
            .unwrap();

        assert_eq!(result.count, 3);
        assert_eq!(result.created_count(), 3);
        assert!(result.errors.is_empty());
        assert_eq!(result.item_codes(), vec!["AB-12-RED-S", "AB-12-RED-M", "AB-12-RED-L"]);

        let first = &result.items[0].item;
        assert_eq!(first.item_name, "Shoes Nike, AB-12, Red, S");
        assert_eq!(first.stock_uom, "Nos");
        assert_eq!(first.brand.as_deref(), Some("Nike"));

        // Counter grows with every insert, so barcodes follow the sequence
        let barcodes: Vec<_> = result
            .items
            .iter()
            .map(|i| i.item.barcode.as_ref().unwrap().barcode.clone())
            .collect();
        assert_eq!(
            barcodes,
            vec![
                allocate_barcode(1).unwrap().digits().to_string(),
                allocate_barcode(2).unwrap().digits().to_string(),
                allocate_barcode(3).unwrap().digits().to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let catalog = FakeCatalog::with_attributes();
        let first = create_variants(&catalog, &request("36, 38"), &BatchOptions::default())
            .await
            .unwrap();
        let second = create_variants(&catalog, &request("36, 38"), &BatchOptions::default())
            .await
            .unwrap();

        assert_eq!(first.item_codes(), second.item_codes());
        assert_eq!(second.created_count(), 0);
        assert_eq!(second.existing_count(), 2);
        assert!(second
            .items
            .iter()
            .all(|i| i.outcome == VariantOutcome::Existing));
        assert_eq!(catalog.state.lock().unwrap().inserts, 2);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_going() {
        let catalog = FakeCatalog::with_attributes();
        catalog.reject("AB-12-RED-M");

        let result = create_variants(&catalog, &request("S, M, L"), &BatchOptions::default())
            .await
            .unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(result.item_codes(), vec!["AB-12-RED-S", "AB-12-RED-L"]);
        assert_eq!(result.errors, vec!["AB-12-RED-M: disk full".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_sizes_is_validation_error() {
        let catalog = FakeCatalog::with_attributes();
        let err = create_variants(&catalog, &request(" , ,"), &BatchOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: at least one size required");
        assert_eq!(catalog.state.lock().unwrap().inserts, 0);
    }

    #[tokio::test]
    async fn test_registers_new_attribute_values() {
        let catalog = FakeCatalog::with_attributes();
        catalog
            .state
            .lock()
            .unwrap()
            .attributes
            .get_mut("Color")
            .unwrap()
            .push(AttributeValue {
                attribute_name: "Color".into(),
                value: "Red".into(),
                abbreviation: "RED".into(),
            });

        let mut req = request("M, M");
        req.color = "Reddish".into();
        create_variants(&catalog, &req, &BatchOptions::default())
            .await
            .unwrap();

        let state = catalog.state.lock().unwrap();
        let colors: Vec<_> = state.attributes["Color"]
            .iter()
            .map(|v| (v.value.as_str(), v.abbreviation.as_str()))
            .collect();
        assert_eq!(colors, vec![("Red", "RED"), ("Reddish", "RED1")]);
        assert_eq!(state.attributes["Size"].len(), 1);
    }

    #[tokio::test]
    async fn test_undefined_attribute_is_skipped() {
        let catalog = FakeCatalog::default();
        assert!(register_attribute_value(&catalog, "Color", "Red").await.is_none());
        assert!(catalog.state.lock().unwrap().attributes.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_size_reports_existing() {
        let catalog = FakeCatalog::with_attributes();
        let result = create_variants(&catalog, &request("M, M"), &BatchOptions::default())
            .await
            .unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.created_count(), 1);
        assert_eq!(result.items[1].outcome, VariantOutcome::Existing);
    }

    #[tokio::test]
    async fn test_brandless_and_localized_uom() {
        let catalog = FakeCatalog::with_attributes();
        catalog.state.lock().unwrap().uoms.insert("шт".into());

        let mut req = request("XL");
        req.brand = Some("   ".into());
        let result = create_variants(&catalog, &req, &BatchOptions::default())
            .await
            .unwrap();

        let item = &result.items[0].item;
        assert_eq!(item.item_name, "Shoes, AB-12, Red, XL");
        assert_eq!(item.brand, None);
        assert_eq!(item.stock_uom, "шт");
    }

    #[tokio::test]
    async fn test_fallback_uom_when_none_known() {
        let catalog = FakeCatalog::default();
        let uom = default_stock_uom(&catalog, &BatchOptions::default().stock_uom_candidates).await;
        assert_eq!(uom, "Nos");
    }

    #[tokio::test]
    async fn test_mint_skips_taken_barcodes() {
        let catalog = FakeCatalog::default();
        {
            let mut state = catalog.state.lock().unwrap();
            for seq in 1..=3 {
                state
                    .extra_barcodes
                    .insert(allocate_barcode(seq).unwrap().digits().to_string());
            }
        }
        let barcode = mint_barcode(&catalog, 20).await.unwrap();
        assert_eq!(barcode, allocate_barcode(4).unwrap());

        let barcode = mint_barcode(&catalog, 2).await.unwrap();
        assert_eq!(barcode, allocate_barcode(2).unwrap());
    }

    #[tokio::test]
    async fn test_mint_reads_counter_per_attempt() {
        let catalog = FakeCatalog::default();
        {
            let mut state = catalog.state.lock().unwrap();
            for seq in 1..=2 {
                state
                    .extra_barcodes
                    .insert(allocate_barcode(seq).unwrap().digits().to_string());
            }
        }

        let barcode = mint_barcode(&catalog, 20).await.unwrap();
        assert_eq!(barcode, allocate_barcode(3).unwrap());
        assert_eq!(catalog.state.lock().unwrap().count_reads, 3);
    }

    #[tokio::test]
    async fn test_broken_lookups_fail_open() {
        let catalog = FakeCatalog::with_attributes();
        catalog.state.lock().unwrap().broken_lookups = true;

        let result = create_variants(&catalog, &request("S"), &BatchOptions::default())
            .await
            .unwrap();
        assert_eq!(result.created_count(), 1);
        assert!(result.errors.is_empty());
    }
}
