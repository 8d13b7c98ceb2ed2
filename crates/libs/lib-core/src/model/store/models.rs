use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
///
/// Not `Serialize`: the hash never leaves the backend.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub hash: String,
}

/// Category entity.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Record entity with its category name joined in.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub artist: String,
    pub album: String,
    pub image_url: String,
    pub condition: String,
    pub category_id: i64,
    pub category: Option<String>,
    pub price: f64,
    pub owner_id: i64,
}

/// Data structure for creating or replacing a record.
///
/// The owner is supplied separately on creation and never changes on update.
#[derive(Debug, Clone)]
pub struct RecordForCreate {
    pub artist: String,
    pub album: String,
    pub image_url: String,
    pub condition: String,
    pub category_id: i64,
    pub price: f64,
}
