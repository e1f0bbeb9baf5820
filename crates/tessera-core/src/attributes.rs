//! # Attribute Resolver
//!
//! Typed attribute values and the case-insensitive lookup used by naming.
//!
//! ## Two Shapes
//! ```text
//! VariantAttribute  (name, value)              attached to one variant
//!                   ("color", "Red")
//!
//! AttributeValue    (attribute, value, abbr)   registered on an attribute
//!                   ("Color", "Red", "RED")
//! ```
//!
//! An [`AttributeSet`] holds every registered value of one attribute and
//! only ever grows.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::abbreviation::assign_abbreviation;

/// Attribute carrying a variant's color.
pub const COLOR_ATTRIBUTE: &str = "Color";

/// Attribute carrying a variant's size.
pub const SIZE_ATTRIBUTE: &str = "Size";

/// A (name, value) pair attached to a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

impl VariantAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        VariantAttribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A registered value of an attribute, with its abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttributeValue {
    pub attribute_name: String,
    pub value: String,
    pub abbreviation: String,
}

/// Returns the value of the first attribute whose name matches
/// `target_name`, ignoring case.
///
/// ## Example
/// ```rust
/// use tessera_core::attributes::{resolve, VariantAttribute};
///
/// let attrs = vec![VariantAttribute::new("COLOR", "Red")];
/// assert_eq!(resolve(&attrs, "color"), Some("Red"));
/// assert_eq!(resolve(&attrs, "size"), None);
/// ```
pub fn resolve<'a>(attributes: &'a [VariantAttribute], target_name: &str) -> Option<&'a str> {
    let target = target_name.to_lowercase();
    attributes
        .iter()
        .find(|attr| attr.name.to_lowercase() == target)
        .map(|attr| attr.value.as_str())
}

// =============================================================================
// Attribute Set
// =============================================================================

/// All registered values of one attribute.
///
/// ## Invariants
/// - Abbreviations are unique within the set
/// - Entries are appended, never replaced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    attribute_name: String,
    values: Vec<AttributeValue>,
}

impl AttributeSet {
    /// Creates an empty set for the named attribute.
    pub fn new(attribute_name: impl Into<String>) -> Self {
        AttributeSet {
            attribute_name: attribute_name.into(),
            values: Vec::new(),
        }
    }

    /// Creates a set from already-registered values.
    pub fn with_values(attribute_name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        AttributeSet {
            attribute_name: attribute_name.into(),
            values,
        }
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    /// Looks up a registered value (exact match).
    pub fn get(&self, value: &str) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.value == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.get(value).is_some()
    }

    /// Iterates the abbreviations in use, skipping blank ones.
    pub fn abbreviations(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .map(|v| v.abbreviation.as_str())
            .filter(|abbr| !abbr.is_empty())
    }

    /// Registers `value` if it is new.
    ///
    /// ## Returns
    /// * `Some(&AttributeValue)` - The newly appended entry
    /// * `None` - The value was already registered
    pub fn insert_if_missing(&mut self, value: &str) -> Option<&AttributeValue> {
        if self.contains(value) {
            return None;
        }

        let abbreviation = assign_abbreviation(self.abbreviations(), value);
        self.values.push(AttributeValue {
            attribute_name: self.attribute_name.clone(),
            value: value.to_string(),
            abbreviation,
        });
        self.values.last()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
