//! # Attribute Repository
//!
//! Variant attributes (Color, Size) and their registered values.
//!
//! Values keep their registration order (`idx`), which is the order the
//! abbreviation assigner saw them in.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tessera_core::AttributeValue;

/// Repository for variant attribute operations.
#[derive(Debug, Clone)]
pub struct AttributeRepository {
    pool: SqlitePool,
}

impl AttributeRepository {
    /// Creates a new AttributeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AttributeRepository { pool }
    }

    /// Whether the attribute is defined.
    pub async fn exists(&self, attribute_name: &str) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM item_attributes WHERE attribute_name = ?1)",
        )
        .bind(attribute_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Defines an attribute. No-op when it already exists.
    pub async fn create(&self, attribute_name: &str) -> DbResult<()> {
        sqlx::query("INSERT OR IGNORE INTO item_attributes (attribute_name) VALUES (?1)")
            .bind(attribute_name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Registered values of an attribute in registration order.
    ///
    /// ## Returns
    /// * `Ok(None)` - The attribute is not defined
    pub async fn values(&self, attribute_name: &str) -> DbResult<Option<Vec<AttributeValue>>> {
        if !self.exists(attribute_name).await? {
            return Ok(None);
        }

        let values = sqlx::query_as::<_, AttributeValueRecord>(
            r#"
            SELECT attribute_name, value, abbr
            FROM item_attribute_values
            WHERE attribute_name = ?1
            ORDER BY idx
            "#,
        )
        .bind(attribute_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(values.into_iter().map(AttributeValue::from).collect()))
    }

    /// Appends a value to its attribute.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Value or abbreviation already taken
    /// * `Err(DbError::ForeignKeyViolation)` - Attribute not defined
    pub async fn insert_value(&self, value: &AttributeValue) -> DbResult<()> {
        debug!(
            attribute = %value.attribute_name,
            value = %value.value,
            abbr = %value.abbreviation,
            "Inserting attribute value"
        );

        sqlx::query(
            r#"
            INSERT INTO item_attribute_values (attribute_name, value, abbr, idx)
            VALUES (
                ?1, ?2, ?3,
                (SELECT COALESCE(MAX(idx), 0) + 1 FROM item_attribute_values WHERE attribute_name = ?1)
            )
            "#,
        )
        .bind(&value.attribute_name)
        .bind(&value.value)
        .bind(&value.abbreviation)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct AttributeValueRecord {
    attribute_name: String,
    value: String,
    abbr: String,
}

impl From<AttributeValueRecord> for AttributeValue {
    fn from(record: AttributeValueRecord) -> Self {
        AttributeValue {
            attribute_name: record.attribute_name,
            value: record.value,
            abbreviation: record.abbr,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
