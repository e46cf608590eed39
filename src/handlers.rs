use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Html,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::db_storage::LeadStore;
use crate::errors::AppError;
use crate::intake;
use crate::models::{IntakeOutcome, LeadSubmission};
use crate::pages;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead storage backing the signup form.
    pub store: Arc<dyn LeadStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }
}

/// Health check endpoint.
///
/// Does not touch the lead store.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
pub async fn landing() -> Html<String> {
    pages::landing()
}

/// GET /descuento
pub async fn discount() -> Html<String> {
    pages::discount_offer()
}

/// GET /cupon
pub async fn coupon() -> Html<String> {
    pages::coupon(None)
}

/// GET /obtener/descuento
///
/// Shows the idle signup form.
pub async fn discount_form() -> Html<String> {
    pages::discount_offer()
}

/// POST /obtener/descuento
///
/// Runs the submitted form through lead intake and renders either the
/// personalised coupon or the "already registered" notice.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `headers` - Request headers; only `Content-Type` is inspected.
/// * `body` - Urlencoded form with `nombre`, `correo` and `telefono`.
///
/// The body is never rejected: a request that is not an urlencoded form is
/// treated as a form with every field missing.
///
/// # Returns
///
/// * `Result<Html<String>, AppError>` - The rendered page, or a store failure.
pub async fn claim_discount(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    let submission = if is_urlencoded_form(&headers) {
        LeadSubmission::from_urlencoded(&body)
    } else {
        tracing::warn!("POST /obtener/descuento without an urlencoded body, fields left empty");
        LeadSubmission::default()
    };

    tracing::info!("POST /obtener/descuento - correo: {:?}", submission.email);

    match intake::submit(state.store.as_ref(), submission).await? {
        IntakeOutcome::Created { lead } => Ok(pages::coupon(lead.name.as_deref())),
        IntakeOutcome::DuplicateDetected { email } => {
            Ok(pages::coupon_already_claimed(email.as_deref()))
        }
    }
}

fn is_urlencoded_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}
