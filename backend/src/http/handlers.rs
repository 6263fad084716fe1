//! HTTP handlers.
//!
//! Each handler corresponds to an endpoint and delegates to the lookup
//! service and the renderers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, Redirect},
    Json,
};

use super::dto::{DatabaseStatus, HealthResponse, TceQuery};
use super::error::AppError;
use super::state::AppState;
use crate::models::TicId;
use crate::render::{render_home_page, render_result_page};
use crate::services::{lookup_tces, Pipeline};

/// Result type for handlers.
pub type HandlerResult<T> = Result<T, AppError>;

/// GET /
pub async fn root() -> Redirect {
    Redirect::permanent("/tces")
}

/// GET /tces
///
/// Without a `tic` parameter this is the search form. Otherwise the TIC is
/// validated before any database access and the selected pipelines are
/// queried. The page is rendered as long as at least one requested source
/// answered; if none did, the first failure becomes a 500. A query string
/// that cannot be decoded is a 400 error page.
pub async fn tces(
    State(state): State<AppState>,
    query: Result<Query<TceQuery>, QueryRejection>,
) -> HandlerResult<Html<String>> {
    let Query(query) =
        query.map_err(|e| AppError::BadRequest(format!("Invalid query: {}", e.body_text())))?;
    let Some(raw_tic) = query.tic.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(Html(render_home_page(&state.watermarks, &state.build)));
    };

    let tic = TicId::parse(raw_tic)?;
    let pipeline = Pipeline::from_query(query.pipeline.as_deref());

    let lookup = lookup_tces(state.repository.as_ref(), tic, pipeline)
        .await
        .into_result()?;

    Ok(Html(render_result_page(&lookup)))
}

/// GET /health
///
/// Reports whether each database file can be opened read-only.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<Json<HealthResponse>> {
    let (spoc, tess_spoc) = state.repository.health_check().await?;
    let status = if spoc && tess_spoc { "ok" } else { "degraded" };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        databases: DatabaseStatus { spoc, tess_spoc },
    }))
}
