//! # Category Handlers
//!
//! Reads are public; writes sit under `/api`. Names are unique, and a
//! category still referenced by records cannot be deleted (`409 Conflict`).

use axum::{extract::State, http::StatusCode, Json};
use lib_core::dto::CategoryRequest;
use lib_core::error::{is_foreign_key_violation, is_unique_violation};
use lib_core::model::store::{models::Category, CategoryRepository};
use lib_core::{AppError, DbPool, Result};
use tracing::{info, instrument, warn};

use super::{ApiJson, ApiPath};
use crate::middleware::CurrentUser;

/// `GET /categories`
#[instrument(skip(db))]
pub async fn list_categories(State(db): State<DbPool>) -> Result<Json<Vec<Category>>> {
    Ok(Json(CategoryRepository::list(&db).await?))
}

/// `GET /categories/{id}`
#[instrument(skip(db))]
pub async fn get_category(
    State(db): State<DbPool>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Category>> {
    CategoryRepository::find_by_id(&db, id)
        .await?
        .map(Json)
        .ok_or_else(|| category_not_found(id))
}

/// `POST /api/categories`
#[instrument(skip(db, req), fields(user_id = user.user_id))]
pub async fn create_category(
    State(db): State<DbPool>,
    user: CurrentUser,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let name = req.into_name()?;

    let category = CategoryRepository::create(&db, &name)
        .await
        .map_err(|e| map_name_error(e, &name))?;

    info!(category_id = category.id, "[CATEGORIES] Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /api/categories/{id}`
#[instrument(skip(db, req), fields(user_id = user.user_id))]
pub async fn update_category(
    State(db): State<DbPool>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> Result<Json<Category>> {
    let name = req.into_name()?;

    CategoryRepository::update(&db, id, &name)
        .await
        .map_err(|e| map_name_error(e, &name))?
        .map(Json)
        .ok_or_else(|| category_not_found(id))
}

/// `DELETE /api/categories/{id}`: returns the deleted category.
#[instrument(skip(db), fields(user_id = user.user_id))]
pub async fn delete_category(
    State(db): State<DbPool>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::delete(&db, id)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                warn!(category_id = id, "[CATEGORIES] Category still in use");
                AppError::Conflict(format!("Category {} is still used by records", id))
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| category_not_found(id))?;

    info!(category_id = id, "[CATEGORIES] Category deleted");
    Ok(Json(category))
}

fn category_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Category {} not found", id))
}

fn map_name_error(err: sqlx::Error, name: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(format!("Category '{}' already exists", name))
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{body_json, delete, get, json_request, signup_token, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_category_crud_round_trip() {
        let app = test_app().await;
        let token = signup_token(&app, "a@x.com", "pw123").await;

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/categories", Some(&token), json!({ "name": "Rock" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/categories/{id}"),
                Some(&token),
                json!({ "name": "Classic Rock" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let fetched = body_json(app.clone().oneshot(get(&format!("/categories/{id}"), None)).await.unwrap()).await;
        assert_eq!(fetched, json!({ "id": id, "name": "Classic Rock" }));

        let listed = body_json(app.clone().oneshot(get("/categories", None)).await.unwrap()).await;
        assert_eq!(listed, json!([fetched.clone()]));

        let response = app.clone().oneshot(delete(&format!("/api/categories/{id}"), Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, fetched);

        let response = app.oneshot(get(&format!("/categories/{id}"), None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let app = test_app().await;
        let token = signup_token(&app, "a@x.com", "pw123").await;
        let request = || json_request(Method::POST, "/api/categories", Some(&token), json!({ "name": "Jazz" }));

        app.clone().oneshot(request()).await.unwrap();
        let response = app.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["code"], "Conflict");
    }

    #[tokio::test]
    async fn test_referenced_category_cannot_be_deleted() {
        let app = test_app().await;
        let token = signup_token(&app, "a@x.com", "pw123").await;

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/categories", Some(&token), json!({ "name": "Jazz" })))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_i64().unwrap();

        let record = json!({
            "artist": "Nina Simone",
            "album": "Pastel Blues",
            "category_id": id,
            "price": 24.5
        });
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/records", Some(&token), record))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.clone().oneshot(delete(&format!("/api/categories/{id}"), Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app.oneshot(get(&format!("/categories/{id}"), None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_name_and_missing_category() {
        let app = test_app().await;
        let token = signup_token(&app, "a@x.com", "pw123").await;

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/categories", Some(&token), json!({ "name": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(Method::PUT, "/api/categories/9", Some(&token), json!({ "name": "Blues" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(delete("/api/categories/9", Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
