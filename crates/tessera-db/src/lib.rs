//! # tessera-db: Database Layer for Tessera
//!
//! SQLite storage for items, barcodes, variant attributes, units and size
//! presets, and the production implementation of
//! [`tessera_core::VariantCatalog`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tessera Data Flow                                │
//! │                                                                         │
//! │  tessera create-variants AB-12 --color Red --sizes "S, M, L"           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tessera_core::batch::create_variants(&db, ...)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tessera-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ItemRepo      │    │ 001_initial_ │  │   │
//! │  │   │ SqlitePool    │◄───│ AttributeRepo │    │  schema.sql  │  │   │
//! │  │   │ VariantCatalog│    │ PresetRepo    │    │              │  │   │
//! │  │   │               │    │ UomRepo       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (tessera.db)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`catalog`] - `VariantCatalog` for [`Database`]
//! - [`seed`] - Default attributes, units and presets
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tessera_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("tessera.db")).await?;
//! let item = db.items().get_by_code("AB-12-RED-M").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use seed::{seed_defaults, SeedReport};

// Repository re-exports for convenience
pub use repository::attribute::AttributeRepository;
pub use repository::item::ItemRepository;
pub use repository::preset::PresetRepository;
pub use repository::uom::UomRepository;
