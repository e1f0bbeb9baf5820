//! # Size Presets
//!
//! Named size lists offered by the quick-entry form ("Standard (S-XL)" →
//! `S, M, L, XL`).
//!
//! ## Selection Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  No preset store       → 3 legacy presets, default = first legacy      │
//! │  Store, no brand       → all enabled presets, no default               │
//! │  Store, brand "Nike"   → Nike presets, then global presets             │
//! │                          default = Nike preset flagged default,        │
//! │                                    else first Nike preset              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::VariantCatalog;
use crate::error::{CoreError, CoreResult};
use crate::identifier::parse_sizes;

/// A named list of sizes, global or tied to one brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizePreset {
    /// Unique preset key.
    pub name: String,
    /// Title shown in lists; defaults to `name`.
    #[serde(default)]
    pub preset_name: String,
    /// Owning brand; `None` or blank for global presets.
    pub brand: Option<String>,
    /// Comma-separated sizes, e.g. `"S, M, L, XL"`.
    pub sizes: String,
    #[serde(default)]
    pub is_default_for_brand: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl SizePreset {
    /// Creates an enabled global preset.
    pub fn new(name: impl Into<String>, sizes: impl Into<String>) -> Self {
        let name = name.into();
        SizePreset {
            preset_name: name.clone(),
            name,
            sizes: sizes.into(),
            ..Default::default()
        }
    }

    /// Ties the preset to a brand.
    pub fn for_brand(mut self, brand: impl Into<String>, is_default: bool) -> Self {
        self.brand = Some(brand.into());
        self.is_default_for_brand = is_default;
        self
    }

    /// Fills in derived fields before saving.
    pub fn normalize(mut self) -> Self {
        if self.preset_name.trim().is_empty() {
            self.preset_name = self.name.clone();
        }
        if self.brand.as_deref().is_some_and(|b| b.trim().is_empty()) {
            self.brand = None;
        }
        self
    }

    /// True for presets not tied to a brand.
    pub fn is_global(&self) -> bool {
        self.brand.as_deref().map_or(true, |b| b.trim().is_empty())
    }

    pub fn belongs_to(&self, brand: &str) -> bool {
        self.brand.as_deref().map(str::trim) == Some(brand)
    }

    /// Parsed size list; empty when the preset holds no sizes.
    pub fn size_list(&self) -> Vec<String> {
        parse_sizes(&self.sizes).unwrap_or_default()
    }
}

/// Presets offered to the user plus the one to preselect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizePresetList {
    pub presets: Vec<SizePreset>,
    pub default: Option<String>,
}

/// The presets used when no preset store is configured.
pub fn legacy_presets() -> Vec<SizePreset> {
    vec![
        SizePreset::new("Turkey (36-42)", "36, 38, 40, 42"),
        SizePreset::new("Standard (S-XL)", "S, M, L, XL"),
        SizePreset::new("Jeans (28-36)", "28, 29, 30, 31, 32, 33, 34, 36"),
    ]
}

/// Applies the selection rules to the stored presets.
///
/// ## Arguments
/// * `stored` - Presets from the store, `None` when there is no store
/// * `brand` - Brand chosen on the form, if any
pub fn select_presets(stored: Option<Vec<SizePreset>>, brand: Option<&str>) -> SizePresetList {
    let Some(stored) = stored else {
        let presets = legacy_presets();
        let default = presets.first().map(|p| p.name.clone());
        return SizePresetList { presets, default };
    };

    let enabled: Vec<SizePreset> = stored.into_iter().filter(|p| !p.disabled).collect();

    let brand = brand.map(str::trim).unwrap_or_default();
    if brand.is_empty() {
        return SizePresetList {
            presets: enabled,
            default: None,
        };
    }

    let (brand_presets, others): (Vec<_>, Vec<_>) =
        enabled.into_iter().partition(|p| p.belongs_to(brand));
    let global_presets = others.into_iter().filter(SizePreset::is_global);

    let default = brand_presets
        .iter()
        .find(|p| p.is_default_for_brand)
        .or_else(|| brand_presets.first())
        .map(|p| p.name.clone());

    let mut presets = brand_presets;
    presets.extend(global_presets);

    SizePresetList { presets, default }
}

/// Loads presets through the catalog and applies the selection rules.
pub async fn get_size_presets<C>(catalog: &C, brand: Option<&str>) -> CoreResult<SizePresetList>
where
    C: VariantCatalog + ?Sized,
{
    let stored = catalog
        .size_presets()
        .await
        .map_err(|e| CoreError::Catalog(e.to_string()))?;

    if stored.is_none() {
        debug!("No preset store configured, using legacy presets");
    }

    Ok(select_presets(stored, brand))
}

// =============================================================================
// Unit Tests
// =============================================================================
