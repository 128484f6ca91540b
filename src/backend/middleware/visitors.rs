//! Visit tracking for the landing page.
//!
//! Recording is best-effort; a failed write never blocks the page.

use axum::{
    extract::{Request, State},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};

use crate::backend::server::state::AppState;
use crate::backend::visitors::record_visit;

pub async fn track_visit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ip = state.proxies.client_ip(&request).to_string();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    if let Err(e) = record_visit(&state.db, &ip, user_agent.as_deref()).await {
        tracing::warn!("Visitor tracking failed for {}: {:?}", ip, e);
    }

    next.run(request).await
}
