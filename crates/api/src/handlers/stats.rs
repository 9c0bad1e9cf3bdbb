use axum::{extract::State, Json};

use crate::{dto::stats::StatsResponse, errors::ApiError, state::AppState};

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let queries_total = state.dns.query_count.execute().await?;
    Ok(Json(StatsResponse { queries_total }))
}
