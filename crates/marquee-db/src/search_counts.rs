//! Database operations for the `search_counts` table.
//!
//! One row per normalized search term. The increment is a single
//! `INSERT .. ON CONFLICT DO UPDATE`, so concurrent searches for the same
//! term never lose a count and the movie snapshot written by the first
//! search is never replaced.

use chrono::{DateTime, Utc};
use marquee_core::{normalize_search_term, MovieSnapshot, SearchCount};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `search_counts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchCountRow {
    pub id: i64,
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SearchCountRow> for SearchCount {
    fn from(row: SearchCountRow) -> Self {
        SearchCount {
            search_term: row.search_term,
            count: row.count,
            movie_id: row.movie_id,
            title: row.title,
            poster_url: row.poster_url,
            updated_at: Some(row.updated_at),
        }
    }
}

/// Increments the counter for `term`, creating it with `count = 1` and the
/// given snapshot when absent.
///
/// `term` is normalized before use. Returns the row as it stands after the
/// increment.
///
/// # Errors
///
/// Returns [`DbError::EmptySearchTerm`] if `term` normalizes to nothing, or
/// [`DbError::Sqlx`] if the upsert fails.
pub async fn record_search(
    pool: &PgPool,
    term: &str,
    snapshot: MovieSnapshot<'_>,
) -> Result<SearchCountRow, DbError> {
    let search_term = normalize_search_term(term).ok_or(DbError::EmptySearchTerm)?;

    let row = sqlx::query_as::<_, SearchCountRow>(
        "INSERT INTO search_counts (search_term, count, movie_id, title, poster_url) \
         VALUES ($1, 1, $2, $3, $4) \
         ON CONFLICT (search_term) DO UPDATE \
         SET count = search_counts.count + 1, updated_at = NOW() \
         RETURNING id, search_term, count, movie_id, title, poster_url, created_at, updated_at",
    )
    .bind(&search_term)
    .bind(snapshot.movie_id)
    .bind(snapshot.title)
    .bind(snapshot.poster_url)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fetches the counter for `term`, if one exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_search_count(
    pool: &PgPool,
    term: &str,
) -> Result<Option<SearchCountRow>, DbError> {
    let Some(search_term) = normalize_search_term(term) else {
        return Ok(None);
    };

    let row = sqlx::query_as::<_, SearchCountRow>(
        "SELECT id, search_term, count, movie_id, title, poster_url, created_at, updated_at \
         FROM search_counts \
         WHERE search_term = $1",
    )
    .bind(search_term)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Lists up to `limit` counters, highest count first.
///
/// Ties are ordered by most recent activity, then alphabetically by term.
/// A non-positive `limit` returns an empty list without querying.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_trending(pool: &PgPool, limit: i64) -> Result<Vec<SearchCountRow>, DbError> {
    if limit <= 0 {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, SearchCountRow>(
        "SELECT id, search_term, count, movie_id, title, poster_url, created_at, updated_at \
         FROM search_counts \
         ORDER BY count DESC, updated_at DESC, search_term ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
