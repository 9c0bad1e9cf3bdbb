//! DNS-over-HTTPS endpoints (RFC 8484).
//!
//! `/` and `/dns-query` answer unfiltered. `/l/{list_id}` runs the same
//! pipeline with a filter list applied; `/u/{user_id}` only tags the request
//! for logging. Both prefixes also accept a trailing `/dns-query` or
//! `/resolve`.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use ndns_domain::{is_valid_list_name, DomainError, RecordType};
use ndns_application::use_cases::Resolution;
use tracing::debug;

use crate::{
    dto::doh::{DohQuery, ResolveQuery},
    errors::ApiError,
    state::AppState,
};

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dns_query).post(post_dns_query))
        .route("/dns-query", get(get_dns_query).post(post_dns_query))
        .route("/resolve", get(resolve))
        .route(
            "/l/{list_id}",
            get(get_list_dns_query).post(post_list_dns_query),
        )
        .route(
            "/l/{list_id}/dns-query",
            get(get_list_dns_query).post(post_list_dns_query),
        )
        .route("/l/{list_id}/resolve", get(resolve_with_list))
        .route(
            "/u/{user_id}",
            get(get_user_dns_query).post(post_user_dns_query),
        )
        .route(
            "/u/{user_id}/dns-query",
            get(get_user_dns_query).post(post_user_dns_query),
        )
        .route("/u/{user_id}/resolve", get(resolve_for_user))
}

async fn get_dns_query(
    State(state): State<AppState>,
    Query(params): Query<DohQuery>,
) -> Result<Response, ApiError> {
    answer_get(&state, params, None).await
}

async fn post_dns_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    answer_post(&state, &headers, &body, None).await
}

async fn get_list_dns_query(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Query(params): Query<DohQuery>,
) -> Result<Response, ApiError> {
    let list = checked_list(&list_id)?;
    answer_get(&state, params, Some(list)).await
}

async fn post_list_dns_query(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let list = checked_list(&list_id)?;
    answer_post(&state, &headers, &body, Some(list)).await
}

async fn get_user_dns_query(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<DohQuery>,
) -> Result<Response, ApiError> {
    debug!(user = %user_id, "DoH GET");
    answer_get(&state, params, None).await
}

async fn post_user_dns_query(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    debug!(user = %user_id, "DoH POST");
    answer_post(&state, &headers, &body, None).await
}

async fn resolve(
    State(state): State<AppState>,
    Query(params): Query<ResolveQuery>,
) -> Result<Response, ApiError> {
    resolve_by_name(&state, params, None).await
}

async fn resolve_with_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Query(params): Query<ResolveQuery>,
) -> Result<Response, ApiError> {
    let list = checked_list(&list_id)?;
    resolve_by_name(&state, params, Some(list)).await
}

async fn resolve_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<ResolveQuery>,
) -> Result<Response, ApiError> {
    debug!(user = %user_id, name = %params.name, "DoH resolve");
    resolve_by_name(&state, params, None).await
}

async fn answer_get(
    state: &AppState,
    params: DohQuery,
    list: Option<&str>,
) -> Result<Response, ApiError> {
    let encoded = params
        .dns
        .filter(|dns| !dns.is_empty())
        .ok_or_else(|| DomainError::MalformedPacket("Missing dns query parameter".to_string()))?;
    let resolution = state.dns.resolve.execute_base64(&encoded, list).await?;
    dns_message(state, &resolution)
}

async fn answer_post(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
    list: Option<&str>,
) -> Result<Response, ApiError> {
    require_dns_message(headers)?;
    let resolution = state.dns.resolve.execute(body, list).await?;
    dns_message(state, &resolution)
}

async fn resolve_by_name(
    state: &AppState,
    params: ResolveQuery,
    list: Option<&str>,
) -> Result<Response, ApiError> {
    let record_type: RecordType = params
        .record_type
        .parse()
        .map_err(DomainError::InvalidRecordType)?;
    let resolution = state
        .dns
        .resolve
        .resolve_name(&params.name, record_type, list)
        .await?;
    dns_message(state, &resolution)
}

fn dns_message(state: &AppState, resolution: &Resolution) -> Result<Response, ApiError> {
    let body = state.dns.resolve.encode(resolution)?;
    let cache_control = format!("public, max-age={}", resolution.ttl);
    Ok((
        [
            (header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, cache_control),
        ],
        body,
    )
        .into_response())
}

fn require_dns_message(headers: &HeaderMap) -> Result<(), DomainError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    if media_type.eq_ignore_ascii_case(DNS_MESSAGE_CONTENT_TYPE) {
        Ok(())
    } else {
        Err(DomainError::ContentTypeError(content_type.to_string()))
    }
}

fn checked_list(list_id: &str) -> Result<&str, DomainError> {
    if is_valid_list_name(list_id) {
        Ok(list_id)
    } else {
        Err(DomainError::InvalidFilterList(format!(
            "Invalid list name '{}'",
            list_id
        )))
    }
}
