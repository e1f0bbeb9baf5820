//! # Repository Module
//!
//! Database repository implementations for Tessera.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tessera-core batch workflow                                           │
//! │       │                                                                 │
//! │       │  catalog.find_item("AB-12-RED-M")                              │
//! │       ▼                                                                 │
//! │  Database (VariantCatalog impl, catalog.rs)                            │
//! │       │                                                                 │
//! │       │  db.items().get_by_code("AB-12-RED-M")                         │
//! │       ▼                                                                 │
//! │  ItemRepository ──► SQL ──► SQLite                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Items and their barcodes
//! - [`attribute::AttributeRepository`] - Variant attributes and values
//! - [`preset::PresetRepository`] - Size presets
//! - [`uom::UomRepository`] - Units of measure

pub mod attribute;
pub mod item;
pub mod preset;
pub mod uom;
