//! Trait implementations over the concrete clients.

use async_trait::async_trait;
use marquee_appwrite::AppwriteClient;
use marquee_core::{poster_url, Movie, MovieSnapshot, SearchCount};
use marquee_tmdb::TmdbClient;
use sqlx::PgPool;

use crate::error::{FetchFailure, StoreError};
use crate::store::{MovieSource, PopularityStore};

#[async_trait]
impl MovieSource for TmdbClient {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchFailure> {
        TmdbClient::fetch_movies(self, Some(query))
            .await
            .map_err(FetchFailure::from)
    }
}

/// Counters in the `search_counts` table. Increments are atomic.
pub struct PgPopularityStore {
    pool: PgPool,
    image_base_url: String,
}

impl PgPopularityStore {
    #[must_use]
    pub fn new(pool: PgPool, image_base_url: impl Into<String>) -> Self {
        Self {
            pool,
            image_base_url: image_base_url.into(),
        }
    }
}

#[async_trait]
impl PopularityStore for PgPopularityStore {
    async fn record_search(&self, term: &str, movie: &Movie) -> Result<SearchCount, StoreError> {
        let poster = poster_url(&self.image_base_url, movie.poster_path.as_deref());
        let snapshot = MovieSnapshot {
            movie_id: movie.id,
            title: &movie.title,
            poster_url: poster.as_deref(),
        };
        let row = marquee_db::record_search(&self.pool, term, snapshot).await?;
        Ok(row.into())
    }

    async fn list_trending(&self, limit: usize) -> Result<Vec<SearchCount>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = marquee_db::list_trending(&self.pool, limit).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable("connection pool is closed".to_string()));
        }
        marquee_db::health_check(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Counters in an Appwrite collection.
///
/// The increment is read-then-write with no transaction; concurrent first
/// searches for one term can create duplicate documents and concurrent
/// increments can be lost.
pub struct AppwritePopularityStore {
    client: AppwriteClient,
    image_base_url: String,
}

impl AppwritePopularityStore {
    #[must_use]
    pub fn new(client: AppwriteClient, image_base_url: impl Into<String>) -> Self {
        Self {
            client,
            image_base_url: image_base_url.into(),
        }
    }
}

#[async_trait]
impl PopularityStore for AppwritePopularityStore {
    async fn record_search(&self, term: &str, movie: &Movie) -> Result<SearchCount, StoreError> {
        let poster = poster_url(&self.image_base_url, movie.poster_path.as_deref());
        let snapshot = MovieSnapshot {
            movie_id: movie.id,
            title: &movie.title,
            poster_url: poster.as_deref(),
        };
        Ok(self.client.record_search(term, snapshot).await?)
    }

    async fn list_trending(&self, limit: usize) -> Result<Vec<SearchCount>, StoreError> {
        Ok(self.client.list_trending(limit).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client.list_trending(1).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "appwrite"
    }
}

#[cfg(test)]
mod tests {
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    #[tokio::test]
    async fn closed_pool_reports_unavailable() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://marquee@localhost/marquee")
            .expect("lazy pool needs no server");
        pool.close().await;

        let store = PgPopularityStore::new(pool, "https://image.tmdb.org/t/p/w500");
        let err = store.health_check().await.expect_err("closed pool must fail");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
