//! # Category Repository
//!
//! CRUD access to the `categories` table.

use super::models::Category;
use super::DbPool;
use sqlx::{query_as, SqliteExecutor};

/// Category repository for database operations.
pub struct CategoryRepository;

impl CategoryRepository {
    /// List all categories ordered by id.
    pub async fn list(pool: &DbPool) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Find a category by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Category>, sqlx::Error> {
        query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a category. Fails with a unique violation if the name exists.
    pub async fn create<'e, E>(executor: E, name: &str) -> Result<Category, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        query_as::<_, Category>("INSERT INTO categories (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(executor)
            .await
    }

    /// Rename a category. Returns `None` if no category has this id.
    pub async fn update(pool: &DbPool, id: i64, name: &str) -> Result<Option<Category>, sqlx::Error> {
        query_as::<_, Category>("UPDATE categories SET name = ? WHERE id = ? RETURNING id, name")
            .bind(name)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category and return it.
    ///
    /// Fails with a foreign-key violation while records still reference it.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<Option<Category>, sqlx::Error> {
        query_as::<_, Category>("DELETE FROM categories WHERE id = ? RETURNING id, name")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
