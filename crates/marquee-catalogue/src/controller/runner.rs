use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::messages::{CatalogueCommand, Completion};
use crate::state::{CatalogueEvent, CatalogueState, Effect};
use crate::store::{spawn_record_search, MovieSource, PopularityStore};

/// Owns the [`CatalogueState`] and runs the effects its transitions emit.
pub(super) struct CatalogueActor {
    source: Arc<dyn MovieSource>,
    store: Arc<dyn PopularityStore>,
    trending_limit: usize,
    commits: mpsc::Receiver<String>,
    commands: mpsc::Receiver<CatalogueCommand>,
    completions_tx: mpsc::Sender<Completion>,
    completions: mpsc::Receiver<Completion>,
    state: CatalogueState,
    publisher: watch::Sender<CatalogueState>,
}

impl CatalogueActor {
    pub(super) fn new(
        source: Arc<dyn MovieSource>,
        store: Arc<dyn PopularityStore>,
        trending_limit: usize,
        commits: mpsc::Receiver<String>,
        commands: mpsc::Receiver<CatalogueCommand>,
        publisher: watch::Sender<CatalogueState>,
    ) -> Self {
        let (completions_tx, completions) = mpsc::channel(32);
        Self {
            source,
            store,
            trending_limit,
            commits,
            commands,
            completions_tx,
            completions,
            state: CatalogueState::new(),
            publisher,
        }
    }

    pub(super) async fn run(mut self, initial_query: String) {
        tracing::info!(
            backend = self.store.backend_name(),
            trending_limit = self.trending_limit,
            "catalogue controller started"
        );

        self.apply(CatalogueEvent::QueryCommitted {
            query: initial_query,
        });
        self.load_trending();

        let mut commits_open = true;
        loop {
            tokio::select! {
                commit = self.commits.recv(), if commits_open => match commit {
                    Some(query) => self.apply(CatalogueEvent::QueryCommitted { query }),
                    None => commits_open = false,
                },
                command = self.commands.recv() => match command {
                    Some(CatalogueCommand::RefreshTrending) => self.load_trending(),
                    None => break,
                },
                Some(done) = self.completions.recv() => self.complete(done),
            }
        }

        tracing::info!("catalogue controller stopped");
    }

    fn apply(&mut self, event: CatalogueEvent) {
        let effects = self.state.handle(event);
        self.publisher.send_replace(self.state.clone());
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn complete(&mut self, done: Completion) {
        let event = match done {
            Completion::Fetched {
                token,
                result: Ok(movies),
            } => CatalogueEvent::FetchSucceeded { token, movies },
            Completion::Fetched {
                token,
                result: Err(failure),
            } => CatalogueEvent::FetchFailed {
                token,
                message: failure.user_message().to_string(),
            },
            Completion::Trending(entries) => CatalogueEvent::TrendingLoaded { entries },
        };
        self.apply(event);
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::Fetch { token, query } => {
                let source = Arc::clone(&self.source);
                let tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let result = source.fetch_movies(&query).await;
                    if let Err(e) = &result {
                        tracing::warn!(query = %query, error = %e, "movie fetch failed");
                    }
                    let _ = tx.send(Completion::Fetched { token, result }).await;
                });
            }
            Effect::RecordSearch { term, movie } => {
                // Detached; the view never waits on it.
                drop(spawn_record_search(Arc::clone(&self.store), term, movie));
            }
        }
    }

    fn load_trending(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.completions_tx.clone();
        let limit = self.trending_limit;
        tokio::spawn(async move {
            match store.list_trending(limit).await {
                Ok(entries) => {
                    tracing::debug!(count = entries.len(), "trending searches loaded");
                    let _ = tx.send(Completion::Trending(entries)).await;
                }
                Err(e) => {
                    tracing::warn!(
                        backend = store.backend_name(),
                        error = %e,
                        "failed to load trending searches"
                    );
                }
            }
        });
    }
}
