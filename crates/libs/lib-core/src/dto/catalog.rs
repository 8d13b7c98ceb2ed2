//! # Catalog Data Transfer Objects
//!
//! Request bodies for record and category endpoints. Responses serialize the
//! models in [`crate::model::store::models`] directly.

use lib_utils::{validate_non_negative, validate_not_empty};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::model::store::models::RecordForCreate;

/// Body of `POST /api/records` and `PUT /api/records/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub condition: String,
    pub category_id: i64,
    pub price: f64,
}

impl RecordRequest {
    /// Validate and convert into the repository input.
    pub fn into_record(self) -> Result<RecordForCreate> {
        validate_not_empty(&self.artist, "artist").map_err(AppError::InvalidInput)?;
        validate_not_empty(&self.album, "album").map_err(AppError::InvalidInput)?;
        validate_non_negative(self.price, "price").map_err(AppError::InvalidInput)?;

        Ok(RecordForCreate {
            artist: self.artist.trim().to_string(),
            album: self.album.trim().to_string(),
            image_url: self.image_url,
            condition: self.condition,
            category_id: self.category_id,
            price: self.price,
        })
    }
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
}

impl CategoryRequest {
    /// Validate and return the trimmed category name.
    pub fn into_name(self) -> Result<String> {
        validate_not_empty(&self.name, "name").map_err(AppError::InvalidInput)?;
        Ok(self.name.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RecordRequest {
        RecordRequest {
            artist: "  Nina Simone ".to_string(),
            album: "Pastel Blues".to_string(),
            image_url: String::new(),
            condition: "VG+".to_string(),
            category_id: 1,
            price: 24.5,
        }
    }

    #[test]
    fn test_record_request_trims() {
        let input = record().into_record().unwrap();
        assert_eq!(input.artist, "Nina Simone");
        assert_eq!(input.price, 24.5);
    }

    #[test]
    fn test_record_request_rejects_missing_album() {
        let req = RecordRequest { album: String::new(), ..record() };
        let err = req.into_record().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg == "album cannot be empty"));
    }

    #[test]
    fn test_record_request_rejects_negative_price() {
        let req = RecordRequest { price: -3.0, ..record() };
        assert!(matches!(req.into_record(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_category_request() {
        let name = CategoryRequest { name: " Jazz ".to_string() }.into_name().unwrap();
        assert_eq!(name, "Jazz");
        assert!(CategoryRequest::default().into_name().is_err());
    }
}
