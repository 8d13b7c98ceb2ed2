//! Seed file format and loader.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context};
use lib_auth::hash_password;
use lib_core::model::store::models::RecordForCreate;
use lib_core::model::store::{CategoryRepository, RecordRepository, UserRepository};
use lib_core::config::DEFAULT_DATABASE_URL;
use lib_core::DbPool;
use lib_utils::get_env_or;
use serde::Deserialize;

/// Seed data compiled into the binary.
pub const EMBEDDED_SEED: &str = include_str!("../data/seed.json");

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub users: Vec<SeedUser>,
    pub categories: Vec<SeedCategory>,
    pub records: Vec<SeedRecord>,
}

/// Plaintext password; hashed before it is stored.
#[derive(Debug, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
}

/// A record referencing its category by name.
#[derive(Debug, Deserialize)]
pub struct SeedRecord {
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub condition: String,
    pub category: String,
    pub price: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub categories: usize,
    pub records: usize,
}

impl SeedFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let seed: SeedFile = serde_json::from_str(raw).context("Malformed seed file")?;
        if seed.users.is_empty() && !seed.records.is_empty() {
            bail!("Seed records need at least one user to own them");
        }
        Ok(seed)
    }
}

/// Store to seed: `DATABASE_URL`, or the server's default. Nothing else is read.
pub fn database_url() -> String {
    get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL)
}

/// Insert every user, category, and record in one transaction.
///
/// All records are owned by the first seeded user. Nothing is written if
/// any insert fails.
pub async fn load(pool: &DbPool, seed: &SeedFile) -> anyhow::Result<SeedSummary> {
    let mut hashes = Vec::with_capacity(seed.users.len());
    for user in &seed.users {
        let hash = hash_password(&user.password)
            .with_context(|| format!("Failed to hash password for {}", user.email))?;
        hashes.push(hash);
    }

    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    let mut owner_id = None;
    for (user, hash) in seed.users.iter().zip(&hashes) {
        let created = UserRepository::create(&mut *tx, &user.email, hash)
            .await
            .with_context(|| format!("Failed to insert user {}", user.email))?;
        owner_id.get_or_insert(created.id);
        summary.users += 1;
    }

    let mut category_ids = HashMap::new();
    for category in &seed.categories {
        let created = CategoryRepository::create(&mut *tx, &category.name)
            .await
            .with_context(|| format!("Failed to insert category {}", category.name))?;
        category_ids.insert(created.name, created.id);
        summary.categories += 1;
    }

    for record in &seed.records {
        let owner_id = owner_id.ok_or_else(|| anyhow!("No user to own seeded records"))?;
        let category_id = *category_ids
            .get(&record.category)
            .ok_or_else(|| anyhow!("Record '{}' names unknown category '{}'", record.album, record.category))?;

        let input = RecordForCreate {
            artist: record.artist.clone(),
            album: record.album.clone(),
            image_url: record.image_url.clone(),
            condition: record.condition.clone(),
            category_id,
            price: record.price,
        };
        RecordRepository::insert(&mut *tx, &input, owner_id)
            .await
            .with_context(|| format!("Failed to insert record {}", record.album))?;
        summary.records += 1;
    }

    tx.commit().await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_auth::verify_password;
    use lib_core::{create_pool, run_migrations};

    async fn setup_test_db() -> DbPool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[test]
    fn test_database_url_needs_no_jwt_secret() {
        std::env::remove_var("JWT_SECRET");

        let expected = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        assert_eq!(database_url(), expected);
    }

    #[tokio::test]
    async fn test_embedded_seed_loads() {
        let pool = setup_test_db().await;
        let seed = SeedFile::parse(EMBEDDED_SEED).unwrap();

        let summary = load(&pool, &seed).await.unwrap();

        assert_eq!(summary.users, seed.users.len());
        assert_eq!(summary.categories, seed.categories.len());
        assert_eq!(summary.records, seed.records.len());

        let owner = UserRepository::find_by_email(&pool, &seed.users[0].email)
            .await
            .unwrap()
            .unwrap();
        assert!(verify_password(&seed.users[0].password, &owner.hash));

        let records = RecordRepository::list(&pool).await.unwrap();
        assert!(records.iter().all(|r| r.owner_id == owner.id));
        assert!(records.iter().all(|r| r.category.is_some()));
    }

    #[tokio::test]
    async fn test_failed_seed_writes_nothing() {
        let pool = setup_test_db().await;
        let seed = SeedFile::parse(
            r#"{
                "users": [{ "email": "a@x.com", "password": "pw123" }],
                "categories": [{ "name": "Jazz" }],
                "records": [{ "artist": "X", "album": "Y", "category": "Polka", "price": 1.0 }]
            }"#,
        )
        .unwrap();

        assert!(load(&pool, &seed).await.is_err());
        assert_eq!(UserRepository::count(&pool).await.unwrap(), 0);
        assert!(CategoryRepository::list(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_run_fails_on_duplicates() {
        let pool = setup_test_db().await;
        let seed = SeedFile::parse(EMBEDDED_SEED).unwrap();

        load(&pool, &seed).await.unwrap();
        assert!(load(&pool, &seed).await.is_err());
        assert_eq!(RecordRepository::list(&pool).await.unwrap().len(), seed.records.len());
    }

    #[test]
    fn test_records_without_users_rejected() {
        let raw = r#"{
            "users": [],
            "categories": [{ "name": "Jazz" }],
            "records": [{ "artist": "X", "album": "Y", "category": "Jazz", "price": 1.0 }]
        }"#;
        assert!(SeedFile::parse(raw).is_err());
    }
}
