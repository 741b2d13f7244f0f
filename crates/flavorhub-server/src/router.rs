use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all FlavorHub endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route(
            "/api/recipes",
            get(handler::list_recipes).post(handler::create_recipe),
        )
        .route(
            "/api/recipes/:id",
            get(handler::get_recipe)
                .put(handler::update_recipe)
                .delete(handler::delete_recipe),
        )
        .route("/api/recipes/:id/rate", put(handler::rate_recipe))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// [`build_router`] plus a permissive CORS layer for browser frontends.
pub fn build_router_with_cors(state: AppState) -> Router {
    build_router(state).layer(CorsLayer::permissive())
}
