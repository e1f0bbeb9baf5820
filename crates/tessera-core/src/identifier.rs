//! # Identifier Builder
//!
//! Composes item codes and display names for templates (base articles) and
//! their color/size variants.
//!
//! ## Naming Patterns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Template        code: {BRAND}-{MPN}                                   │
//! │                  name: {item_group} {brand}, {mpn}                     │
//! │                                                                         │
//! │                  NIKE-AB-12     "Shoes Nike, AB-12"                    │
//! │                                                                         │
//! │  Variant         code: {BRAND}-{MPN}-{COLOR}-{SIZE}                    │
//! │                  name: {item_group} {brand}, {mpn}, {color}, {size}    │
//! │                                                                         │
//! │                  NIKE-AB-12-RED-M     "Shoes Nike, AB-12, Red, M"      │
//! │                                                                         │
//! │  Batch variant   code: SANITIZE({base}-{color}-{size})                 │
//! │                  name: {item_group}[ {brand}], {base}, {color}, {size} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Codes are sanitized (see [`sanitize`]); names keep the raw input.
//! When a naming precondition is unmet the builder returns
//! [`Naming::NotApplicable`] and the caller keeps its default naming.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::attributes::{resolve, VariantAttribute, COLOR_ATTRIBUTE, SIZE_ATTRIBUTE};
use crate::error::{ValidationError, ValidationResult};

/// Prefix of the placeholder name an unsaved item carries.
pub const PLACEHOLDER_NAME_PREFIX: &str = "New Item";

// =============================================================================
// Sanitize
// =============================================================================

/// Turns free text into a code token.
///
/// ## Rules
/// - Trim surrounding whitespace
/// - Each space and forward slash becomes a hyphen
/// - Uppercase (non-ASCII letters are kept, only their case changes)
///
/// ## Example
/// ```rust
/// use tessera_core::identifier::sanitize;
///
/// assert_eq!(sanitize("  navy blue "), "NAVY-BLUE");
/// assert_eq!(sanitize("s/m"), "S-M");
/// assert_eq!(sanitize("чорний"), "ЧОРНИЙ");
/// assert_eq!(sanitize(&sanitize("a b/c")), sanitize("a b/c"));
/// ```
pub fn sanitize(token: &str) -> String {
    token
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '-' } else { c })
        .collect::<String>()
        .to_uppercase()
}

// =============================================================================
// Identity Types
// =============================================================================

/// Code and display name assigned to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemIdentity {
    /// Sanitized unique key (e.g. `NIKE-AB-12-RED-M`).
    pub code: String,
    /// Human-readable name (e.g. `Shoes Nike, AB-12, Red, M`).
    pub display_name: String,
}

/// Why the builder declined to name an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The item already carries a real name.
    AlreadyNamed,
    MissingBrand,
    MissingMpn,
    MissingColor,
    MissingSize,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::AlreadyNamed => "item is already named",
            SkipReason::MissingBrand => "brand is missing",
            SkipReason::MissingMpn => "manufacturer part number is missing",
            SkipReason::MissingColor => "color attribute is missing",
            SkipReason::MissingSize => "size attribute is missing",
        };
        f.write_str(text)
    }
}

/// Outcome of a naming request.
///
/// `NotApplicable` is not an error: the caller falls back to its own
/// default naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    Assigned(ItemIdentity),
    NotApplicable(SkipReason),
}

impl Naming {
    /// Returns the identity when one was assigned.
    pub fn into_identity(self) -> Option<ItemIdentity> {
        match self {
            Naming::Assigned(identity) => Some(identity),
            Naming::NotApplicable(_) => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Naming::Assigned(_))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Template & Variant Naming
// =============================================================================

/// Names a template (base article).
///
/// ## Example
/// ```rust
/// use tessera_core::identifier::{base_identity, Naming, SkipReason};
///
/// let identity = base_identity(Some("Nike"), Some("AB 12"), "Shoes").into_identity().unwrap();
/// assert_eq!(identity.code, "NIKE-AB-12");
/// assert_eq!(identity.display_name, "Shoes Nike, AB 12");
///
/// assert_eq!(
///     base_identity(None, Some("AB-12"), "Shoes"),
///     Naming::NotApplicable(SkipReason::MissingBrand)
/// );
/// ```
pub fn base_identity(brand: Option<&str>, mpn: Option<&str>, item_group: &str) -> Naming {
    let Some(brand) = present(brand) else {
        return Naming::NotApplicable(SkipReason::MissingBrand);
    };
    let Some(mpn) = present(mpn) else {
        return Naming::NotApplicable(SkipReason::MissingMpn);
    };

    Naming::Assigned(ItemIdentity {
        code: format!("{}-{}", sanitize(brand), sanitize(mpn)),
        display_name: format!("{} {}, {}", item_group, brand, mpn),
    })
}

/// Names a variant from its template's brand/MPN and its own attributes.
///
/// Both a `color` and a `size` attribute must resolve (case-insensitive)
/// to a non-blank value.
pub fn variant_identity(
    brand: Option<&str>,
    mpn: Option<&str>,
    item_group: &str,
    attributes: &[VariantAttribute],
) -> Naming {
    let Some(brand) = present(brand) else {
        return Naming::NotApplicable(SkipReason::MissingBrand);
    };
    let Some(mpn) = present(mpn) else {
        return Naming::NotApplicable(SkipReason::MissingMpn);
    };
    let Some(color) = present(resolve(attributes, COLOR_ATTRIBUTE)) else {
        return Naming::NotApplicable(SkipReason::MissingColor);
    };
    let Some(size) = present(resolve(attributes, SIZE_ATTRIBUTE)) else {
        return Naming::NotApplicable(SkipReason::MissingSize);
    };

    Naming::Assigned(ItemIdentity {
        code: format!(
            "{}-{}-{}-{}",
            sanitize(brand),
            sanitize(mpn),
            sanitize(color),
            sanitize(size)
        ),
        display_name: format!("{} {}, {}, {}, {}", item_group, brand, mpn, color, size),
    })
}

/// Transient description of a variant to be named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantSpec {
    /// Article / MPN shared by every variant of the template.
    pub base_code: String,
    pub brand: Option<String>,
    pub item_group: String,
    /// Attributes in the order they were supplied.
    pub attributes: Vec<VariantAttribute>,
}

impl VariantSpec {
    /// Names this variant.
    pub fn identity(&self) -> Naming {
        variant_identity(
            self.brand.as_deref(),
            Some(&self.base_code),
            &self.item_group,
            &self.attributes,
        )
    }
}

// =============================================================================
// Autoname
// =============================================================================

/// An item record about to be saved, as far as naming cares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDraft {
    /// Current record name; `None` or a "New Item..." placeholder means unnamed.
    pub name: Option<String>,
    pub item_group: String,
    pub brand: Option<String>,
    pub manufacturer_part_no: Option<String>,
    /// Template this item is a variant of.
    pub variant_of: Option<String>,
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,
}

impl ItemDraft {
    /// True while the draft still carries no real name.
    pub fn is_unnamed(&self) -> bool {
        match self.name.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(name) => name.starts_with(PLACEHOLDER_NAME_PREFIX),
        }
    }
}

/// Names an unsaved item: templates by brand and MPN, variants by brand,
/// MPN, color and size.
///
/// ## Example
/// ```rust
/// use tessera_core::identifier::{autoname, ItemDraft};
/// use tessera_core::attributes::VariantAttribute;
///
/// let draft = ItemDraft {
///     item_group: "Shoes".into(),
///     brand: Some("Nike".into()),
///     manufacturer_part_no: Some("AB-12".into()),
///     variant_of: Some("NIKE-AB-12".into()),
///     attributes: vec![
///         VariantAttribute::new("Color", "Red"),
///         VariantAttribute::new("Size", "M"),
///     ],
///     ..Default::default()
/// };
/// let identity = autoname(&draft).into_identity().unwrap();
/// assert_eq!(identity.code, "NIKE-AB-12-RED-M");
/// ```
pub fn autoname(draft: &ItemDraft) -> Naming {
    if !draft.is_unnamed() {
        return Naming::NotApplicable(SkipReason::AlreadyNamed);
    }

    let brand = draft.brand.as_deref();
    let mpn = draft.manufacturer_part_no.as_deref();

    match present(draft.variant_of.as_deref()) {
        None => base_identity(brand, mpn, &draft.item_group),
        Some(_) => variant_identity(brand, mpn, &draft.item_group, &draft.attributes),
    }
}

// =============================================================================
// Batch Helpers
// =============================================================================

/// Parses a comma-separated size list.
///
/// ## Rules
/// - Split on commas, trim each entry, drop empty entries
/// - Order is preserved; duplicates are kept
/// - An empty result is a validation error
///
/// ## Example
/// ```rust
/// use tessera_core::identifier::parse_sizes;
///
/// assert_eq!(parse_sizes(" S, M ,,L ").unwrap(), vec!["S", "M", "L"]);
/// assert!(parse_sizes(" , ").is_err());
/// ```
pub fn parse_sizes(sizes: &str) -> ValidationResult<Vec<String>> {
    let parsed: Vec<String> = sizes
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if parsed.is_empty() {
        return Err(ValidationError::AtLeastOne {
            field: "size".to_string(),
        });
    }

    Ok(parsed)
}

/// Item code of one size in a multi-size batch.
pub fn batch_item_code(base_code: &str, color: &str, size: &str) -> String {
    sanitize(&format!("{}-{}-{}", base_code, color, size))
}

/// Display name of one size in a multi-size batch.
///
/// The brand segment is present only for a non-blank brand.
pub fn batch_item_name(
    item_group: &str,
    brand: Option<&str>,
    base_code: &str,
    color: &str,
    size: &str,
) -> String {
    let mut name = item_group.to_string();
    if let Some(brand) = present(brand) {
        name.push(' ');
        name.push_str(brand);
    }
    name.push_str(&format!(", {}, {}, {}", base_code, color, size));
    name
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn red_m() -> Vec<VariantAttribute> {
        vec![
            VariantAttribute::new("Color", "Red"),
            VariantAttribute::new("Size", "M"),
        ]
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Nike"), "NIKE");
        assert_eq!(sanitize(" Tommy Hilfiger "), "TOMMY-HILFIGER");
        assert_eq!(sanitize("36/38"), "36-38");
        assert_eq!(sanitize("Ö"), "Ö");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_variant_identity() {
        let identity = variant_identity(Some("Nike"), Some("AB-12"), "Shoes", &red_m())
            .into_identity()
            .unwrap();
        assert_eq!(identity.code, "NIKE-AB-12-RED-M");
        assert_eq!(identity.display_name, "Shoes Nike, AB-12, Red, M");
    }

    #[test]
    fn test_variant_identity_keeps_raw_display_values() {
        let attrs = vec![
            VariantAttribute::new("size", "36/38"),
            VariantAttribute::new("COLOR", "navy blue"),
        ];
        let identity = variant_identity(Some("Levi's"), Some("501 XX"), "Jeans", &attrs)
            .into_identity()
            .unwrap();
        assert_eq!(identity.code, "LEVI'S-501-XX-NAVY-BLUE-36-38");
        assert_eq!(identity.display_name, "Jeans Levi's, 501 XX, navy blue, 36/38");
    }

    #[test]
    fn test_variant_identity_not_applicable() {
        let only_color = vec![VariantAttribute::new("Color", "Red")];
        assert_eq!(
            variant_identity(Some("Nike"), Some("AB-12"), "Shoes", &only_color),
            Naming::NotApplicable(SkipReason::MissingSize)
        );

        let blank_color = vec![
            VariantAttribute::new("Color", "  "),
            VariantAttribute::new("Size", "M"),
        ];
        assert_eq!(
            variant_identity(Some("Nike"), Some("AB-12"), "Shoes", &blank_color),
            Naming::NotApplicable(SkipReason::MissingColor)
        );

        assert_eq!(
            variant_identity(Some("Nike"), Some(""), "Shoes", &red_m()),
            Naming::NotApplicable(SkipReason::MissingMpn)
        );
    }

    #[test]
    fn test_variant_spec_identity() {
        let spec = VariantSpec {
            base_code: "AB-12".into(),
            brand: Some("Nike".into()),
            item_group: "Shoes".into(),
            attributes: red_m(),
        };
        assert_eq!(spec.identity().into_identity().unwrap().code, "NIKE-AB-12-RED-M");

        let unbranded = VariantSpec { brand: None, ..spec };
        assert!(!unbranded.identity().is_assigned());
    }

    #[test]
    fn test_autoname_template_and_variant() {
        let template = ItemDraft {
            name: Some("New Item 3".into()),
            item_group: "Shoes".into(),
            brand: Some("Nike".into()),
            manufacturer_part_no: Some("AB-12".into()),
            ..Default::default()
        };
        let identity = autoname(&template).into_identity().unwrap();
        assert_eq!(identity.code, "NIKE-AB-12");
        assert_eq!(identity.display_name, "Shoes Nike, AB-12");

        let variant = ItemDraft {
            variant_of: Some("NIKE-AB-12".into()),
            attributes: red_m(),
            ..template.clone()
        };
        assert_eq!(
            autoname(&variant).into_identity().unwrap().display_name,
            "Shoes Nike, AB-12, Red, M"
        );
    }

    #[test]
    fn test_autoname_skips_named_items() {
        let draft = ItemDraft {
            name: Some("LEGACY-001".into()),
            item_group: "Shoes".into(),
            brand: Some("Nike".into()),
            manufacturer_part_no: Some("AB-12".into()),
            ..Default::default()
        };
        assert_eq!(autoname(&draft), Naming::NotApplicable(SkipReason::AlreadyNamed));
    }

    #[test]
    fn test_parse_sizes() {
        assert_eq!(parse_sizes("36, 38, 40").unwrap(), vec!["36", "38", "40"]);
        assert_eq!(parse_sizes("M").unwrap(), vec!["M"]);
        assert_eq!(parse_sizes("M, M").unwrap(), vec!["M", "M"]);

        let err = parse_sizes("").unwrap_err();
        assert_eq!(err.to_string(), "at least one size required");
    }

    #[test]
    fn test_batch_code_and_name() {
        assert_eq!(batch_item_code("AB 12", "Navy Blue", "S/M"), "AB-12-NAVY-BLUE-S-M");
        assert_eq!(batch_item_code("ab12", "чорний", "xl"), "AB12-ЧОРНИЙ-XL");

        assert_eq!(
            batch_item_name("Shoes", Some("Nike"), "AB-12", "Red", "M"),
            "Shoes Nike, AB-12, Red, M"
        );
        assert_eq!(
            batch_item_name("Shoes", None, "AB-12", "Red", "M"),
            "Shoes, AB-12, Red, M"
        );
        assert_eq!(
            batch_item_name("Shoes", Some(" "), "AB-12", "Red", "M"),
            "Shoes, AB-12, Red, M"
        );
    }
}
