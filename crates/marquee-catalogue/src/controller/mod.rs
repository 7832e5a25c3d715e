//! Runtime for [`CatalogueState`](crate::state::CatalogueState).
//!
//! One task owns the state. Committed queries arrive from the debouncer,
//! fetch and trending results arrive from spawned tasks, and every
//! transition is published on a `watch` channel for renderers.

mod handle;
mod messages;
mod runner;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::debounce::{spawn_debouncer, DEFAULT_DEBOUNCE};
use crate::state::CatalogueState;
use crate::store::{MovieSource, PopularityStore};

pub use handle::CatalogueHandle;
use runner::CatalogueActor;

const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Knobs for a running controller.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub debounce: Duration,
    pub trending_limit: usize,
    /// Query committed at start-up.
    pub initial_query: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            initial_query: String::new(),
        }
    }
}

impl ControllerOptions {
    #[must_use]
    pub fn from_app_config(config: &marquee_core::AppConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.search_debounce_ms),
            trending_limit: config.trending_limit,
            initial_query: String::new(),
        }
    }
}

pub struct CatalogueController;

impl CatalogueController {
    /// Spawns the debouncer and the state-owning task.
    ///
    /// The initial query is committed immediately and trending is loaded
    /// once. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn spawn(
        source: Arc<dyn MovieSource>,
        store: Arc<dyn PopularityStore>,
        options: ControllerOptions,
    ) -> CatalogueHandle {
        let (debouncer, commits, debounce_task) =
            spawn_debouncer(options.initial_query.clone(), options.debounce);
        let (command_tx, command_rx) = mpsc::channel(16);
        let (state_tx, state_rx) = watch::channel(CatalogueState::new());

        let actor = CatalogueActor::new(
            source,
            store,
            options.trending_limit,
            commits,
            command_rx,
            state_tx,
        );
        let actor_task = tokio::spawn(actor.run(options.initial_query));

        CatalogueHandle::new(debouncer, command_tx, state_rx, actor_task, debounce_task)
    }
}
