use axum::{
    extract::{Query, State},
    Extension, Json,
};
use marquee_core::{poster_url, Movie};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_fetch_failure, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct MovieItem {
    id: i64,
    title: String,
    poster_path: Option<String>,
    poster_url: Option<String>,
    popularity: f64,
    vote_average: Option<f64>,
    release_date: Option<String>,
    release_year: Option<String>,
    original_language: Option<String>,
    overview: Option<String>,
}

impl MovieItem {
    fn from_movie(movie: Movie, image_base_url: &str) -> Self {
        let poster_url = poster_url(image_base_url, movie.poster_path.as_deref());
        let release_year = movie.release_year().map(str::to_owned);
        Self {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            poster_url,
            popularity: movie.popularity,
            vote_average: movie.vote_average,
            release_date: movie.release_date,
            release_year,
            original_language: movie.original_language,
            overview: movie.overview,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MoviesQuery {
    pub query: Option<String>,
}

/// Lists popular movies, or search results when `query` is non-blank.
pub(super) async fn list_movies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<MoviesQuery>,
) -> Result<Json<ApiResponse<Vec<MovieItem>>>, ApiError> {
    let query = params.query.unwrap_or_default();

    let movies = state
        .catalogue
        .search(&query)
        .await
        .map_err(|e| map_fetch_failure(req_id.0.clone(), &e))?;

    let data = movies
        .into_iter()
        .map(|m| MovieItem::from_movie(m, &state.image_base_url))
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
