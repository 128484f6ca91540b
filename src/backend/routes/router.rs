/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. `GET /health` - liveness
 * 2. `GET /` - landing page, counted by the visitor tracker
 * 3. `/api/...` - JSON API (see `api_routes`)
 * 4. `/uploads/...` - uploaded handbooks
 * 5. Fallback - files under the public directory, otherwise the
 *    `Route not found` envelope
 *
 * # Layers (outermost last)
 *
 * Body size limit, CORS, request tracing, panic recovery.
 */

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::error::{panic_response, ApiError};
use crate::backend::middleware::visitors::track_visit;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

pub const ROUTE_NOT_FOUND: &str = "Route not found";

async fn health() -> Json<Value> {
    Json(json!({ "success": true, "status": "ok" }))
}

async fn route_not_found() -> ApiError {
    ApiError::not_found(ROUTE_NOT_FOUND)
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by every handler
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let landing = Router::new()
        .route_service("/", ServeFile::new(config.public_dir.join("index.html")))
        .route_layer(from_fn_with_state(app_state.clone(), track_visit));

    let router = Router::new()
        .route("/health", get(health))
        .merge(landing);

    let router = configure_api_routes(router, &app_state);

    let uploads = ServeDir::new(&config.upload_dir).not_found_service(route_not_found.into_service());
    let router = router.nest_service("/uploads", uploads);

    let public = ServeDir::new(&config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(route_not_found.into_service());
    let router = router.fallback_service(public);

    router
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(app_state)
}
