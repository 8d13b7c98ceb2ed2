//! # User Repository
//!
//! Provides database access layer for user credentials.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{UserRepository, create_pool};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! let user = UserRepository::create(&pool, "alice@example.com", "$argon2id$...").await?;
//!
//! let found = UserRepository::find_by_email(&pool, "alice@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::User;
use super::DbPool;
use sqlx::{query_as, SqliteExecutor};

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user and return the stored row.
    ///
    /// Accepts any SQLite executor so it can run inside a transaction.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Email already exists (UNIQUE constraint violation, see
    ///   [`crate::error::is_unique_violation`])
    /// - Database connection fails
    pub async fn create<'e, E>(executor: E, email: &str, hash: &str) -> Result<User, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        query_as::<_, User>("INSERT INTO users (email, hash) VALUES (?, ?) RETURNING *")
            .bind(email)
            .bind(hash)
            .fetch_one(executor)
            .await
    }

    /// Count all users.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_unique_violation;
    use crate::model::store::test_db::setup_test_db;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = setup_test_db().await;

        let user = UserRepository::create(&pool, "a@x.com", "hash-a").await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.hash, "hash-a");

        let by_email = UserRepository::find_by_email(&pool, "a@x.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));

        let by_id = UserRepository::find_by_id(&pool, user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.email), Some("a@x.com".to_string()));
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let pool = setup_test_db().await;
        UserRepository::create(&pool, "a@x.com", "hash").await.unwrap();

        let found = UserRepository::find_by_email(&pool, "A@X.COM").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let pool = setup_test_db().await;
        UserRepository::create(&pool, "a@x.com", "first").await.unwrap();

        let err = UserRepository::create(&pool, "a@x.com", "second")
            .await
            .expect_err("Second insert with same email must fail");

        assert!(is_unique_violation(&err));
        assert_eq!(UserRepository::count(&pool).await.unwrap(), 1);
    }
}
