//! One-shot catalogue operations for request/response callers.

use std::sync::Arc;

use marquee_core::{Movie, SearchCount};
use tokio::task::JoinHandle;

use crate::controller::{CatalogueController, CatalogueHandle, ControllerOptions};
use crate::error::{FetchFailure, StoreError};
use crate::state::recording_target;
use crate::store::{spawn_record_search, MovieSource, PopularityStore};

/// Stateless façade over a [`MovieSource`] and a [`PopularityStore`].
#[derive(Clone)]
pub struct Catalogue {
    source: Arc<dyn MovieSource>,
    store: Arc<dyn PopularityStore>,
}

impl Catalogue {
    #[must_use]
    pub fn new(source: Arc<dyn MovieSource>, store: Arc<dyn PopularityStore>) -> Self {
        Self { source, store }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn PopularityStore> {
        &self.store
    }

    /// Fetches movies for `query` and records the search in the background.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchFailure`] from the movie source.
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>, FetchFailure> {
        let (movies, _recording) = self.search_tracked(query).await?;
        Ok(movies)
    }

    /// Like [`Catalogue::search`], but hands back the recording task so
    /// short-lived callers can wait for it before exiting.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchFailure`] from the movie source.
    pub async fn search_tracked(
        &self,
        query: &str,
    ) -> Result<(Vec<Movie>, Option<JoinHandle<()>>), FetchFailure> {
        let movies = self.source.fetch_movies(query).await.map_err(|e| {
            tracing::warn!(query = %query, error = %e, "movie fetch failed");
            e
        })?;

        let recording = recording_target(query, &movies).map(|(term, movie)| {
            spawn_record_search(Arc::clone(&self.store), term, movie.clone())
        });

        Ok((movies, recording))
    }

    /// Top trending searches. Store failures are logged and yield an empty
    /// list.
    pub async fn trending(&self, limit: usize) -> Vec<SearchCount> {
        match self.store.list_trending(limit).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    backend = self.store.backend_name(),
                    error = %e,
                    "failed to load trending searches"
                );
                Vec::new()
            }
        }
    }

    /// Top trending searches, surfacing store failures.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] from the popularity store.
    pub async fn trending_strict(&self, limit: usize) -> Result<Vec<SearchCount>, StoreError> {
        self.store.list_trending(limit).await
    }

    /// Starts an interactive controller over the same collaborators.
    #[must_use]
    pub fn spawn_controller(&self, options: ControllerOptions) -> CatalogueHandle {
        CatalogueController::spawn(Arc::clone(&self.source), Arc::clone(&self.store), options)
    }
}
