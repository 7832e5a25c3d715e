use axum::{
    extract::{Query, State},
    Extension, Json,
};
use marquee_core::SearchCount;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{normalize_limit, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct TrendingQuery {
    pub limit: Option<i64>,
}

/// Most searched terms. Store failures degrade to an empty list.
pub(super) async fn list_trending(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<TrendingQuery>,
) -> Json<ApiResponse<Vec<SearchCount>>> {
    let limit = normalize_limit(params.limit, state.trending_limit);
    let data = state.catalogue.trending(limit).await;

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
