//! # tessera-core: Pure Identifier Logic for Tessera
//!
//! This crate is the **heart** of Tessera. It turns structured product
//! attributes into item codes, display names, attribute abbreviations and
//! EAN-13 barcodes, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tessera Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tessera CLI (apps/cli)                       │   │
//! │  │    create-variants, name, presets, check-digit, ...             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tessera-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌──────────────┐   │   │
//! │  │   │ checksum │ │ barcode  │ │ identifier │ │ abbreviation │   │   │
//! │  │   │  EAN-13  │ │ allocator│ │ codes/names│ │  RED, RED1   │   │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └──────────────┘   │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐                    │   │
//! │  │   │attributes│ │ presets  │ │   batch    │──► VariantCatalog  │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘      (trait)       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tessera-db (Database Layer)                     │   │
//! │  │          SQLite implementation of VariantCatalog                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checksum`] - EAN-13 check digit
//! - [`barcode`] - Barcode allocation with duplicate checks
//! - [`attributes`] - Attribute values and case-insensitive lookup
//! - [`abbreviation`] - Collision-free attribute abbreviations
//! - [`identifier`] - Item codes and display names
//! - [`presets`] - Size presets for quick entry
//! - [`catalog`] - The storage collaborator trait
//! - [`batch`] - Multi-size variant creation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tessera_core::barcode::allocate_barcode;
//! use tessera_core::identifier::{sanitize, variant_identity};
//! use tessera_core::attributes::VariantAttribute;
//!
//! let barcode = allocate_barcode(1).unwrap();
//! assert_eq!(barcode.digits(), "2000000000015");
//!
//! let attributes = vec![
//!     VariantAttribute::new("Color", "Red"),
//!     VariantAttribute::new("Size", "M"),
//! ];
//! let identity = variant_identity(Some("Nike"), Some("AB-12"), "Shoes", &attributes)
//!     .into_identity()
//!     .unwrap();
//! assert_eq!(identity.code, "NIKE-AB-12-RED-M");
//! assert_eq!(sanitize(" t/shirt "), "T-SHIRT");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod abbreviation;
pub mod attributes;
pub mod barcode;
pub mod batch;
pub mod catalog;
pub mod checksum;
pub mod error;
pub mod identifier;
pub mod presets;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use attributes::{AttributeSet, AttributeValue, VariantAttribute};
pub use barcode::{Barcode, BarcodeType, ExistenceCheck, ItemBarcode};
pub use batch::{BatchOptions, VariantBatchRequest, VariantBatchResult, VariantOutcome};
pub use catalog::{NewVariantItem, VariantCatalog, VariantItem};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use identifier::{ItemDraft, ItemIdentity, Naming, SkipReason, VariantSpec};
pub use presets::{SizePreset, SizePresetList};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Internal-use GS1 prefix every minted barcode starts with.
///
/// ## Business Reason
/// The 200-299 range is reserved for in-store numbering, so minted codes
/// never clash with manufacturer-assigned EANs.
pub const BARCODE_PREFIX: &str = "200";

/// Default number of attempts when looking for an unused barcode.
pub const DEFAULT_MAX_BARCODE_TRIES: u32 = 20;

/// Stock unit assigned when none of the preferred units are known.
pub const FALLBACK_STOCK_UOM: &str = "Nos";
