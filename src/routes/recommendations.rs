use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
    services::recommender,
};

/// Number of recommendations returned when the caller does not ask for
/// a specific count.
const DEFAULT_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    limit: Option<i64>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit < 0 {
        return Err(AppError::InvalidInput(
            "limit must be non-negative".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        limit,
        "Processing recommendations request"
    );

    let recommendations = recommender::recommend(
        state.store.as_ref(),
        state.reference_size,
        state.candidate_size,
        limit as usize,
    )
    .await?;

    Ok(Json(recommendations))
}
