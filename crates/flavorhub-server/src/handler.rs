//! Request handlers for the recipe API.
//!
//! Bodies are taken as `Result<Json<T>, JsonRejection>` so that every decode
//! failure (missing body, wrong content type, malformed JSON, missing or
//! mistyped field) is answered with 400 before the service is invoked.
//!
//! The service and its stores are synchronous, and the JSON file store
//! fsyncs while holding its table lock. Every service call therefore runs on
//! tokio's blocking pool via [`run_blocking`], never on a runtime worker.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use flavorhub_service::{RecipeService, ServiceResult};
use flavorhub_types::{Recipe, RecipeDraft, RecipeId};

use crate::error::{ServerError, ServerResult};

/// Application state shared across all handlers.
pub type AppState = Arc<RecipeService>;

/// Body of `PUT /api/recipes/{id}/rate`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RatingRequest {
    pub rating: i64,
}

/// Query string of `GET /api/recipes`.
///
/// When several filters are present the first of `search`, `difficulty`,
/// `cuisine` wins.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub search: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}

/// Run `op` against the service on the blocking thread pool.
///
/// A panic inside `op` surfaces as [`ServerError::Internal`].
pub async fn run_blocking<T, F>(service: AppState, op: F) -> ServerResult<T>
where
    F: FnOnce(&RecipeService) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|e| ServerError::Internal(format!("service task failed: {e}")))?;
    Ok(outcome?)
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `GET /api/recipes` with optional `difficulty`, `cuisine`, or `search` filter.
pub async fn list_recipes(
    State(service): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> ServerResult<Json<Vec<Recipe>>> {
    let recipes = run_blocking(service, move |service| {
        if let Some(needle) = query.search.as_deref() {
            service.search_by_name(needle)
        } else if let Some(level) = query.difficulty.as_deref() {
            service.list_by_difficulty(level)
        } else if let Some(cuisine) = query.cuisine.as_deref() {
            service.list_by_cuisine(cuisine)
        } else {
            service.list_all()
        }
    })
    .await?;
    Ok(Json(recipes))
}

/// `GET /api/recipes/{id}`.
pub async fn get_recipe(
    State(service): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<Recipe>> {
    let id = RecipeId::new(id);
    run_blocking(service, move |service| service.get(id))
        .await?
        .map(Json)
        .ok_or(ServerError::RecipeNotFound(id))
}

/// `POST /api/recipes`.
pub async fn create_recipe(
    State(service): State<AppState>,
    payload: Result<Json<RecipeDraft>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Recipe>)> {
    let draft = body(payload)?;
    let recipe = run_blocking(service, move |service| service.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// `PUT /api/recipes/{id}`.
pub async fn update_recipe(
    State(service): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<RecipeDraft>, JsonRejection>,
) -> ServerResult<Json<Recipe>> {
    let draft = body(payload)?;
    let id = RecipeId::new(id);
    let recipe = run_blocking(service, move |service| service.update(id, draft)).await?;
    Ok(Json(recipe))
}

/// `DELETE /api/recipes/{id}`.
pub async fn delete_recipe(
    State(service): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<StatusCode> {
    let id = RecipeId::new(id);
    run_blocking(service, move |service| service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/recipes/{id}/rate`.
pub async fn rate_recipe(
    State(service): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<RatingRequest>, JsonRejection>,
) -> ServerResult<Json<Recipe>> {
    let request = body(payload)?;
    let id = RecipeId::new(id);
    let recipe = run_blocking(service, move |service| service.rate(id, request.rating)).await?;
    Ok(Json(recipe))
}
