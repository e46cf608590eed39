//! Router assembly shared by the server binary and the integration tests.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Largest accepted request body. The signup form is three short fields.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Read-only pages plus the health check.
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/descuento", get(handlers::discount))
        .route("/cupon", get(handlers::coupon))
        .route("/health", get(handlers::health))
}

/// The signup form: idle GET and the intake POST.
pub fn signup_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/obtener/descuento",
        get(handlers::discount_form).post(handlers::claim_discount),
    )
}

/// Attaches state, static assets and the layers every route shares.
pub fn finish(routes: Router<Arc<AppState>>, state: Arc<AppState>, static_dir: &str) -> Router {
    routes
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}

/// Full application without rate limiting.
pub fn build_router(state: Arc<AppState>, static_dir: &str) -> Router {
    finish(page_routes().merge(signup_routes()), state, static_dir)
}
