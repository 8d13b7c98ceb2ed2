//! # Record Handlers
//!
//! Catalog of records for sale.
//!
//! - `GET /records`, `GET /records/{id}` are public
//! - `POST /api/records`, `PUT /api/records/{id}`, `DELETE /api/records/{id}`
//!   require a token; new records are owned by the caller
//!
//! A `category_id` that names no category is a `400 InvalidInput`.

use axum::{extract::State, http::StatusCode, Json};
use lib_core::dto::RecordRequest;
use lib_core::error::is_foreign_key_violation;
use lib_core::model::store::{models::Record, RecordRepository};
use lib_core::{AppError, DbPool, Result};
use tracing::{info, instrument, warn};

use super::{ApiJson, ApiPath};
use crate::middleware::CurrentUser;

/// `GET /records`
#[instrument(skip(db))]
pub async fn list_records(State(db): State<DbPool>) -> Result<Json<Vec<Record>>> {
    Ok(Json(RecordRepository::list(&db).await?))
}

/// `GET /records/{id}`
#[instrument(skip(db))]
pub async fn get_record(State(db): State<DbPool>, ApiPath(id): ApiPath<i64>) -> Result<Json<Record>> {
    RecordRepository::find_by_id(&db, id)
        .await?
        .map(Json)
        .ok_or_else(|| record_not_found(id))
}

/// `POST /api/records`
#[instrument(skip(db, req), fields(user_id = user.user_id))]
pub async fn create_record(
    State(db): State<DbPool>,
    user: CurrentUser,
    ApiJson(req): ApiJson<RecordRequest>,
) -> Result<(StatusCode, Json<Record>)> {
    let input = req.into_record()?;
    let category_id = input.category_id;

    let record = RecordRepository::create(&db, &input, user.user_id)
        .await
        .map_err(|e| map_write_error(e, category_id))?;

    info!(record_id = record.id, "[RECORDS] Record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /api/records/{id}`
#[instrument(skip(db, req), fields(user_id = user.user_id))]
pub async fn update_record(
    State(db): State<DbPool>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<RecordRequest>,
) -> Result<Json<Record>> {
    let input = req.into_record()?;
    let category_id = input.category_id;

    let record = RecordRepository::update(&db, id, &input)
        .await
        .map_err(|e| map_write_error(e, category_id))?
        .ok_or_else(|| record_not_found(id))?;

    info!(record_id = id, "[RECORDS] Record updated");
    Ok(Json(record))
}

/// `DELETE /api/records/{id}`: returns the deleted record.
#[instrument(skip(db), fields(user_id = user.user_id))]
pub async fn delete_record(
    State(db): State<DbPool>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Record>> {
    let record = RecordRepository::delete(&db, id)
        .await?
        .ok_or_else(|| record_not_found(id))?;

    info!(record_id = id, "[RECORDS] Record deleted");
    Ok(Json(record))
}

fn record_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Record {} not found", id))
}

fn map_write_error(err: sqlx::Error, category_id: i64) -> AppError {
    if is_foreign_key_violation(&err) {
        warn!(category_id, "[RECORDS] Unknown category");
        AppError::InvalidInput(format!("Unknown category_id {}", category_id))
    } else {
        err.into()
    }
}
