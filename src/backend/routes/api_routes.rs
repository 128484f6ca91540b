/**
 * API Route Handlers
 *
 * This module mounts every `/api` endpoint, grouped by audience:
 *
 * ## Authentication (`/api/auth`)
 * - `POST /register` - Student registration
 * - `POST /login` - Student login
 * - `GET /me` - Current student (student guard)
 *
 * ## Admin (`/api/admin`)
 * - `POST /login` - Admin login
 * - `GET /students`, `GET|PUT|DELETE /students/{id}` (admin guard)
 * - `GET|POST /handbooks`, `PUT|DELETE /handbooks/{id}` (admin guard)
 * - `GET /analytics` (admin guard)
 *
 * ## Student (`/api/student`, student guard)
 * - `GET /dashboard`, `GET /handbooks`, `GET /handbook/{id}`
 * - `POST /progress`, `GET /progress/{handbookId}`
 *
 * The whole `/api` tree sits behind the per-IP rate limiter.
 */

use axum::{
    extract::FromRef,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::admin::{delete_student, get_analytics, get_student, get_students, update_student};
use crate::backend::auth::{admin_login, get_me, login, register};
use crate::backend::handbooks::{delete_handbook, get_handbooks, update_handbook, upload_handbook};
use crate::backend::middleware::auth::{require_role, GuardState};
use crate::backend::middleware::rate_limit::{rate_limit, RateLimitState};
use crate::backend::progress::{get_progress, update_progress};
use crate::backend::server::state::AppState;
use crate::backend::student::{get_dashboard, get_handbook, get_track_handbooks};
use crate::shared::types::Role;

fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/me",
            get(get_me).route_layer(from_fn_with_state(
                GuardState::new(state.clone(), Role::Student),
                require_role,
            )),
        )
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/students", get(get_students))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/handbooks", get(get_handbooks).post(upload_handbook))
        .route("/handbooks/{id}", put(update_handbook).delete(delete_handbook))
        .route("/analytics", get(get_analytics))
        .route_layer(from_fn_with_state(
            GuardState::new(state.clone(), Role::Admin),
            require_role,
        ));

    Router::new().route("/login", post(admin_login)).merge(protected)
}

fn student_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/handbooks", get(get_track_handbooks))
        .route("/handbook/{id}", get(get_handbook))
        .route("/progress", post(update_progress))
        .route("/progress/{handbook_id}", get(get_progress))
        .route_layer(from_fn_with_state(
            GuardState::new(state.clone(), Role::Student),
            require_role,
        ))
}

/// Configure API routes
///
/// Nests the three groups under `/api` and puts the rate limiter in front
/// of all of them.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let api = Router::new()
        .nest("/auth", auth_routes(state))
        .nest("/admin", admin_routes(state))
        .nest("/student", student_routes(state))
        .layer(from_fn_with_state(RateLimitState::from_ref(state), rate_limit));

    router.nest("/api", api)
}
