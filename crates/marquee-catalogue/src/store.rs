//! The two network collaborators of the catalogue, as traits, plus an
//! in-process popularity store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use marquee_core::{normalize_search_term, poster_url, Movie, SearchCount};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::{FetchFailure, StoreError};

/// Source of movie listings for a committed query.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Lists movies for `query`. A blank query lists popular movies.
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchFailure>;
}

/// Counter collection keyed by normalized search term.
#[async_trait]
pub trait PopularityStore: Send + Sync {
    /// Increments the counter for `term`, creating it with a snapshot of
    /// `movie` when absent.
    async fn record_search(&self, term: &str, movie: &Movie) -> Result<SearchCount, StoreError>;

    /// Returns at most `limit` counters, highest count first.
    async fn list_trending(&self, limit: usize) -> Result<Vec<SearchCount>, StoreError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Records a search on a background task.
///
/// Failures are logged and go no further. Callers may drop the handle to
/// detach or await it to make sure the write finished.
pub fn spawn_record_search(
    store: Arc<dyn PopularityStore>,
    term: String,
    movie: Movie,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match store.record_search(&term, &movie).await {
            Ok(counter) => {
                tracing::debug!(
                    search_term = %counter.search_term,
                    count = counter.count,
                    "search recorded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    backend = store.backend_name(),
                    search_term = %term,
                    error = %e,
                    "failed to record search"
                );
            }
        }
    })
}

/// Popularity counters held in process memory.
///
/// Counts are lost on restart. Suitable for local runs and tests.
pub struct MemoryPopularityStore {
    image_base_url: String,
    counters: Mutex<HashMap<String, SearchCount>>,
}

impl MemoryPopularityStore {
    #[must_use]
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Current counter for `term`, if any.
    pub async fn get(&self, term: &str) -> Option<SearchCount> {
        let key = normalize_search_term(term)?;
        self.counters.lock().await.get(&key).cloned()
    }
}

#[async_trait]
impl PopularityStore for MemoryPopularityStore {
    async fn record_search(&self, term: &str, movie: &Movie) -> Result<SearchCount, StoreError> {
        let key = normalize_search_term(term).ok_or(StoreError::EmptyTerm)?;
        let now = Utc::now();

        let mut counters = self.counters.lock().await;
        let entry = counters
            .entry(key.clone())
            .and_modify(|c| {
                c.count += 1;
                c.updated_at = Some(now);
            })
            .or_insert_with(|| SearchCount {
                search_term: key,
                count: 1,
                movie_id: movie.id,
                title: movie.title.clone(),
                poster_url: poster_url(&self.image_base_url, movie.poster_path.as_deref()),
                updated_at: Some(now),
            });
        Ok(entry.clone())
    }

    async fn list_trending(&self, limit: usize) -> Result<Vec<SearchCount>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let counters = self.counters.lock().await;
        let mut entries: Vec<SearchCount> = counters.values().cloned().collect();
        drop(counters);

        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
                .then_with(|| a.search_term.cmp(&b.search_term))
        });
        entries.truncate(limit);
        Ok(entries)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/{id}.jpg")),
            popularity: 1.0,
            vote_average: None,
            release_date: None,
            original_language: None,
            overview: None,
        }
    }

    fn store() -> MemoryPopularityStore {
        MemoryPopularityStore::new("https://image.tmdb.org/t/p/w500")
    }

    #[tokio::test]
    async fn first_search_creates_counter_with_snapshot() {
        let store = store();
        let count = store
            .record_search("Batman", &movie(268, "Batman"))
            .await
            .unwrap();

        assert_eq!(count.search_term, "batman");
        assert_eq!(count.count, 1);
        assert_eq!(count.movie_id, 268);
        assert_eq!(
            count.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/268.jpg")
        );
    }

    #[tokio::test]
    async fn later_searches_increment_and_keep_snapshot() {
        let store = store();
        store.record_search("batman", &movie(268, "Batman")).await.unwrap();
        let count = store
            .record_search("  BATMAN ", &movie(414_906, "The Batman"))
            .await
            .unwrap();

        assert_eq!(count.count, 2);
        assert_eq!(count.title, "Batman");
        assert_eq!(count.movie_id, 268);
    }

    #[tokio::test]
    async fn blank_term_is_rejected() {
        let store = store();
        let err = store.record_search("   ", &movie(1, "x")).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyTerm));
        assert!(store.list_trending(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = Arc::new(store());
        let mut tasks = Vec::new();
        for _ in 0..25 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store.record_search("dune", &movie(438_631, "Dune")).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.get("dune").await.unwrap().count, 25);
    }

    #[tokio::test]
    async fn trending_is_ordered_and_truncated() {
        let store = store();
        for (term, times) in [("alien", 1), ("dune", 3), ("batman", 2), ("heat", 3)] {
            for _ in 0..times {
                store.record_search(term, &movie(1, term)).await.unwrap();
            }
        }

        let trending = store.list_trending(3).await.unwrap();
        assert_eq!(trending.len(), 3);
        assert!(trending.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(trending[2].search_term, "batman");
        assert!(store.list_trending(0).await.unwrap().is_empty());
    }
}
