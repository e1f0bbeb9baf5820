//! # UOM Repository
//!
//! Units of measure an item can be stocked in.

use sqlx::SqlitePool;

use crate::error::DbResult;

/// Repository for units of measure.
#[derive(Debug, Clone)]
pub struct UomRepository {
    pool: SqlitePool,
}

impl UomRepository {
    /// Creates a new UomRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UomRepository { pool }
    }

    pub async fn exists(&self, uom: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM uoms WHERE uom_name = ?1)")
                .bind(uom)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Defines a unit. No-op when it already exists.
    pub async fn create(&self, uom: &str) -> DbResult<()> {
        sqlx::query("INSERT OR IGNORE INTO uoms (uom_name) VALUES (?1)")
            .bind(uom)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_uoms() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let uoms = db.uoms();

        assert!(uoms.exists("Nos").await.unwrap());
        assert!(!uoms.exists("шт").await.unwrap());

        uoms.create("шт").await.unwrap();
        uoms.create("шт").await.unwrap();
        assert!(uoms.exists("шт").await.unwrap());
    }
}
