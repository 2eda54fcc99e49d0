//! HTTP routes.
//!
//! - `GET  /`                 comparison page, no results
//! - `POST /`                 submitted comparison or walk-through form
//! - `POST /api/compare`      JSON request, JSON `ComparisonView`
//! - `GET  /api/catalog`      the three tables as JSON
//! - `GET  /api/coverage-map` coverage lookup for dropdown annotations
//! - `GET  /health`           liveness probe

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use medcompare_common::{
    ComparisonRequest, ComparisonView, CoverageMap, SortKey, SortOrder, TrialAnswer, compare,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::render;
use crate::state::AppState;

type SharedState = Arc<AppState>;

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/compare", post(compare_json))
        .route("/api/catalog", get(catalog))
        .route("/api/coverage-map", get(coverage_map))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw fields of the page's two forms. Everything is optional text, as
/// browsers send it.
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    medicine: Option<String>,
    insurance: Option<String>,
    tried: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
    trial_action: Option<String>,
    trial_answer: Option<String>,
    trial_index: Option<String>,
}

impl From<PageForm> for ComparisonRequest {
    fn from(form: PageForm) -> Self {
        let trial = match (form.trial_action.as_deref(), form.trial_answer) {
            (Some("trial"), Some(answer)) => Some(TrialAnswer {
                index: form
                    .trial_index
                    .as_deref()
                    .and_then(|i| i.trim().parse().ok())
                    .unwrap_or(0),
                answer,
            }),
            _ => None,
        };
        Self {
            medicine: form.medicine,
            insurance: form.insurance,
            tried: form.tried.as_deref() == Some("on"),
            sort_by: SortKey::parse_lenient(form.sort_by.as_deref()),
            order: SortOrder::parse_lenient(form.order.as_deref()),
            trial,
        }
    }
}

async fn index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let view = compare(&state.catalog, &state.rules, None)?;
    Ok(render::page(&view, None, None)?)
}

/// Form submissions always get a page back; a bad selection re-renders the
/// empty page with the message and a 400.
async fn submit(
    State(state): State<SharedState>,
    Form(form): Form<PageForm>,
) -> Result<(StatusCode, Html<String>), ApiError> {
    let request = ComparisonRequest::from(form);
    match compare(&state.catalog, &state.rules, Some(&request)) {
        Ok(view) => {
            tracing::debug!(
                medicine = ?view.selected_medicine,
                insurance = ?view.selected_insurance,
                pairings = view.pairings.len(),
                "comparison rendered"
            );
            Ok((StatusCode::OK, render::page(&view, Some(&request), None)?))
        }
        Err(err) => {
            tracing::debug!(error = %err, "rejected comparison form");
            let message = err.to_string();
            let view = compare(&state.catalog, &state.rules, None)?;
            let page = render::page(&view, Some(&request), Some(&message))?;
            Ok((StatusCode::BAD_REQUEST, page))
        }
    }
}

async fn compare_json(
    State(state): State<SharedState>,
    Json(request): Json<ComparisonRequest>,
) -> Result<Json<ComparisonView>, ApiError> {
    Ok(Json(compare(&state.catalog, &state.rules, Some(&request))?))
}

async fn catalog(State(state): State<SharedState>) -> Json<Value> {
    let catalog = &state.catalog;
    Json(json!({
        "medicines": catalog.medicines(),
        "insurances": catalog.plans(),
        "coverage": catalog.coverage_rows(),
    }))
}

async fn coverage_map(State(state): State<SharedState>) -> Json<CoverageMap> {
    Json(state.catalog.coverage_map())
}

/// Minimal health-check handler for load-balancer probes.
async fn health() -> StatusCode {
    StatusCode::OK
}
