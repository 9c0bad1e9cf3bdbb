use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::{
    dto::filter::{CheckDomainQuery, CheckDomainResponse, ListResponse, LoadListRequest},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lists", post(load_list))
        .route("/lists/default", get(get_default_list))
        .route("/lists/{name}/check", get(check_domain))
}

async fn load_list(
    State(state): State<AppState>,
    Json(req): Json<LoadListRequest>,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let descriptor = state.filter.load_list.execute(&req.uri, &req.name).await?;
    info!(list = %descriptor.name, uri = %descriptor.uri, "Filter list loaded via API");
    Ok((
        StatusCode::CREATED,
        Json(ListResponse::from_descriptor(descriptor)),
    ))
}

async fn get_default_list(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse::from_descriptor(
        state.filter.default_list.execute(),
    ))
}

async fn check_domain(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<CheckDomainQuery>,
) -> Result<Json<CheckDomainResponse>, ApiError> {
    let action = state
        .filter
        .check_domain
        .execute(&params.domain, Some(&name))
        .await?;
    Ok(Json(CheckDomainResponse {
        list: name,
        domain: params.domain,
        action,
    }))
}
