use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::messages::CatalogueCommand;
use crate::debounce::DebouncerHandle;
use crate::state::CatalogueState;

/// Front door of a running catalogue controller.
pub struct CatalogueHandle {
    debouncer: DebouncerHandle,
    commands: mpsc::Sender<CatalogueCommand>,
    state: watch::Receiver<CatalogueState>,
    actor_task: JoinHandle<()>,
    debounce_task: JoinHandle<()>,
}

impl CatalogueHandle {
    pub(super) fn new(
        debouncer: DebouncerHandle,
        commands: mpsc::Sender<CatalogueCommand>,
        state: watch::Receiver<CatalogueState>,
        actor_task: JoinHandle<()>,
        debounce_task: JoinHandle<()>,
    ) -> Self {
        Self {
            debouncer,
            commands,
            state,
            actor_task,
            debounce_task,
        }
    }

    /// Feeds a raw keystroke value to the debouncer.
    ///
    /// Returns `false` if the controller has stopped.
    pub fn set_query(&self, raw: impl Into<String>) -> bool {
        self.debouncer.set_raw(raw)
    }

    /// Asks the controller to reload the trending list.
    pub async fn refresh_trending(&self) -> bool {
        self.commands
            .send(CatalogueCommand::RefreshTrending)
            .await
            .is_ok()
    }

    /// Receiver that sees every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogueState> {
        self.state.clone()
    }

    /// Copy of the most recently published state.
    #[must_use]
    pub fn snapshot(&self) -> CatalogueState {
        self.state.borrow().clone()
    }

    /// Stops the controller and waits for its tasks to finish.
    ///
    /// Searches still being recorded are not waited for.
    pub async fn shutdown(self) {
        let Self {
            debouncer,
            commands,
            actor_task,
            debounce_task,
            ..
        } = self;
        drop(debouncer);
        drop(commands);

        if let Err(e) = actor_task.await {
            tracing::warn!(error = %e, "catalogue controller task failed");
        }
        if let Err(e) = debounce_task.await {
            tracing::warn!(error = %e, "debouncer task failed");
        }
    }
}
