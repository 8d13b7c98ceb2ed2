//! # Record Repository
//!
//! CRUD access to the `records` table. Reads join in the category name.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{RecordRepository, create_pool, models::RecordForCreate};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! let input = RecordForCreate {
//!     artist: "Miles Davis".to_string(),
//!     album: "Kind of Blue".to_string(),
//!     image_url: String::new(),
//!     condition: "Mint".to_string(),
//!     category_id: 1,
//!     price: 30.0,
//! };
//! let record = RecordRepository::create(&pool, &input, 1).await?;
//! println!("{} - {} ({:?})", record.artist, record.album, record.category);
//! # Ok(())
//! # }
//! ```

use super::models::{Record, RecordForCreate};
use super::DbPool;
use sqlx::{query_as, query_scalar, SqliteExecutor};

const SELECT_RECORD: &str = r#"
    SELECT r.id, r.artist, r.album, r.image_url, r.condition, r.category_id,
           c.name AS category, r.price, r.owner_id
    FROM records r
    LEFT JOIN categories c ON c.id = r.category_id
"#;

/// Record repository for database operations.
pub struct RecordRepository;

impl RecordRepository {
    /// List all records ordered by id.
    pub async fn list(pool: &DbPool) -> Result<Vec<Record>, sqlx::Error> {
        query_as::<_, Record>(&format!("{SELECT_RECORD} ORDER BY r.id"))
            .fetch_all(pool)
            .await
    }

    /// Find a record by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Record>, sqlx::Error> {
        query_as::<_, Record>(&format!("{SELECT_RECORD} WHERE r.id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a record owned by `owner_id` and return its id.
    ///
    /// Accepts any SQLite executor so it can run inside a transaction.
    /// An unknown `category_id` fails with a foreign-key violation.
    pub async fn insert<'e, E>(
        executor: E,
        record: &RecordForCreate,
        owner_id: i64,
    ) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        query_scalar::<_, i64>(
            r#"
            INSERT INTO records (artist, album, image_url, condition, category_id, price, owner_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id
            "#,
        )
        .bind(&record.artist)
        .bind(&record.album)
        .bind(&record.image_url)
        .bind(&record.condition)
        .bind(record.category_id)
        .bind(record.price)
        .bind(owner_id)
        .fetch_one(executor)
        .await
    }

    /// Create a record and return it with its category name.
    pub async fn create(
        pool: &DbPool,
        record: &RecordForCreate,
        owner_id: i64,
    ) -> Result<Record, sqlx::Error> {
        let id = Self::insert(pool, record, owner_id).await?;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Replace every editable field of a record. The owner is kept.
    ///
    /// Returns `None` if no record has this id.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        record: &RecordForCreate,
    ) -> Result<Option<Record>, sqlx::Error> {
        let updated = query_scalar::<_, i64>(
            r#"
            UPDATE records
            SET artist = ?1, album = ?2, image_url = ?3, condition = ?4, category_id = ?5, price = ?6
            WHERE id = ?7
            RETURNING id
            "#,
        )
        .bind(&record.artist)
        .bind(&record.album)
        .bind(&record.image_url)
        .bind(&record.condition)
        .bind(record.category_id)
        .bind(record.price)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a record and return the row as it was.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<Option<Record>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing = query_as::<_, Record>(&format!("{SELECT_RECORD} WHERE r.id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            sqlx::query("DELETE FROM records WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(existing)
    }
}
