//! # Item Repository
//!
//! Database operations for items and their barcodes.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items                                                                  │
//! │  name | item_code (UNIQUE) | item_name | item_group | brand | stock_uom │
//! │   │                                                                     │
//! │   └── item_barcodes (1..n)                                              │
//! │       id | item_code | barcode (UNIQUE) | barcode_type                  │
//! │                                                                         │
//! │  An item and its minted barcode are written in one transaction, so a   │
//! │  duplicate barcode leaves no barcode-less item behind.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use tessera_core::{BarcodeType, ItemBarcode, NewVariantItem, VariantItem};

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Total number of items, the barcode sequence base.
    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    /// Whether any item carries this barcode.
    pub async fn barcode_exists(&self, barcode: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM item_barcodes WHERE barcode = ?1)")
                .bind(barcode)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Gets an item by its code, with its first barcode.
    ///
    /// ## Returns
    /// * `Ok(Some(VariantItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_code(&self, item_code: &str) -> DbResult<Option<VariantItem>> {
        let record = sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT
                i.name,
                i.item_code,
                i.item_name,
                i.item_group,
                i.brand,
                i.stock_uom,
                b.barcode,
                b.barcode_type
            FROM items i
            LEFT JOIN item_barcodes b ON b.rowid = (
                SELECT rowid FROM item_barcodes
                WHERE item_code = i.item_code
                ORDER BY rowid
                LIMIT 1
            )
            WHERE i.item_code = ?1
            "#,
        )
        .bind(item_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(VariantItem::from))
    }

    /// All barcodes attached to an item, oldest first.
    pub async fn barcodes(&self, item_code: &str) -> DbResult<Vec<ItemBarcode>> {
        let rows = sqlx::query_as::<_, (String, BarcodeType)>(
            "SELECT barcode, barcode_type FROM item_barcodes WHERE item_code = ?1 ORDER BY rowid",
        )
        .bind(item_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(barcode, barcode_type)| ItemBarcode {
                barcode,
                barcode_type,
            })
            .collect())
    }

    /// Inserts a new item together with its barcode.
    ///
    /// ## Returns
    /// * `Ok(VariantItem)` - The stored item
    /// * `Err(DbError::UniqueViolation)` - Item code or barcode already exists
    pub async fn insert(&self, item: &NewVariantItem) -> DbResult<VariantItem> {
        debug!(item_code = %item.item_code, barcode = %item.barcode, "Inserting item");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO items (
                name, item_code, item_name, item_group,
                brand, stock_uom, is_stock_item, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.item_code)
        .bind(&item.item_code)
        .bind(&item.item_name)
        .bind(&item.item_group)
        .bind(&item.brand)
        .bind(&item.stock_uom)
        .bind(item.is_stock_item)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO item_barcodes (id, item_code, barcode, barcode_type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&item.item_code)
        .bind(item.barcode.digits())
        .bind(item.barcode.barcode_type())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(VariantItem {
            name: item.item_code.clone(),
            item_code: item.item_code.clone(),
            item_name: item.item_name.clone(),
            item_group: item.item_group.clone(),
            brand: item.brand.clone(),
            stock_uom: item.stock_uom.clone(),
            barcode: Some(ItemBarcode::from(item.barcode.clone())),
        })
    }

    /// Attaches another barcode (e.g. a supplier's UPC-A) to an item.
    pub async fn add_barcode(&self, item_code: &str, barcode: &ItemBarcode) -> DbResult<()> {
        debug!(item_code = %item_code, barcode = %barcode.barcode, "Adding barcode");

        sqlx::query(
            r#"
            INSERT INTO item_barcodes (id, item_code, barcode, barcode_type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(item_code)
        .bind(&barcode.barcode)
        .bind(barcode.barcode_type)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Record Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
struct ItemRecord {
    name: String,
    item_code: String,
    item_name: String,
    item_group: String,
    brand: Option<String>,
    stock_uom: String,
    barcode: Option<String>,
    barcode_type: Option<BarcodeType>,
}

impl From<ItemRecord> for VariantItem {
    fn from(record: ItemRecord) -> Self {
        let barcode = record.barcode.map(|barcode| ItemBarcode {
            barcode,
            barcode_type: record.barcode_type.unwrap_or_default(),
        });

        VariantItem {
            name: record.name,
            item_code: record.item_code,
            item_name: record.item_name,
            item_group: record.item_group,
            brand: record.brand,
            stock_uom: record.stock_uom,
            barcode,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use tessera_core::barcode::allocate_barcode;
    use tessera_core::{BarcodeType, ItemBarcode, NewVariantItem};

    fn new_item(code: &str, sequence: u64) -> NewVariantItem {
        NewVariantItem {
            item_code: code.to_string(),
            item_name: format!("Shoes Nike, {}", code),
            item_group: "Shoes".to_string(),
            brand: Some("Nike".to_string()),
            stock_uom: "Nos".to_string(),
            is_stock_item: true,
            barcode: allocate_barcode(sequence).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let items = db.items();

        assert_eq!(items.count().await.unwrap(), 0);

        let stored = items.insert(&new_item("AB-12-RED-M", 1)).await.unwrap();
        assert_eq!(stored.name, "AB-12-RED-M");

        let fetched = items.get_by_code("AB-12-RED-M").await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(
            fetched.barcode,
            Some(ItemBarcode {
                barcode: "2000000000015".into(),
                barcode_type: BarcodeType::Ean,
            })
        );

        assert_eq!(items.count().await.unwrap(), 1);
        assert!(items.barcode_exists("2000000000015").await.unwrap());
        assert!(!items.barcode_exists("2000000000022").await.unwrap());
        assert!(items.get_by_code("AB-12-RED-L").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let items = db.items();

        items.insert(&new_item("AB-12-RED-M", 1)).await.unwrap();
        let err = items.insert(&new_item("AB-12-RED-M", 2)).await.unwrap_err();

        assert!(err.is_unique_violation(), "got {err:?}");
        assert_eq!(items.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_barcode_rolls_back_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let items = db.items();

        items.insert(&new_item("AB-12-RED-M", 1)).await.unwrap();
        let err = items.insert(&new_item("AB-12-RED-L", 1)).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert!(items.get_by_code("AB-12-RED-L").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_additional_barcodes_keep_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let items = db.items();

        items.insert(&new_item("AB-12-RED-M", 1)).await.unwrap();
        items
            .add_barcode(
                "AB-12-RED-M",
                &ItemBarcode {
                    barcode: "036000291452".into(),
                    barcode_type: BarcodeType::UpcA,
                },
            )
            .await
            .unwrap();

        let barcodes = items.barcodes("AB-12-RED-M").await.unwrap();
        assert_eq!(barcodes.len(), 2);
        assert_eq!(barcodes[1].barcode_type, BarcodeType::UpcA);

        let fetched = items.get_by_code("AB-12-RED-M").await.unwrap().unwrap();
        assert_eq!(fetched.barcode.unwrap().barcode, "2000000000015");
    }
}
