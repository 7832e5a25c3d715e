//! Keystroke debouncing.
//!
//! Raw input goes into a `watch` channel; a background task waits for the
//! value to stay unchanged for the configured delay and then publishes it as
//! a committed query on an `mpsc` channel.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Quiescence window used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Write side of a running debouncer.
///
/// Dropping the handle stops the task without flushing a pending value.
#[derive(Debug)]
pub struct DebouncerHandle {
    raw: watch::Sender<String>,
}

impl DebouncerHandle {
    /// Replaces the raw input and restarts the quiescence timer.
    ///
    /// Returns `false` once the debouncer task has stopped.
    pub fn set_raw(&self, raw: impl Into<String>) -> bool {
        self.raw.send(raw.into()).is_ok()
    }
}

/// Starts a debouncer whose last committed value is `initial`.
///
/// Returns the input handle, the receiver of committed values and the
/// task handle. A committed value equal to the previous one is not sent
/// again.
#[must_use]
pub fn spawn_debouncer(
    initial: String,
    delay: Duration,
) -> (DebouncerHandle, mpsc::Receiver<String>, JoinHandle<()>) {
    let (raw_tx, raw_rx) = watch::channel(initial.clone());
    let (commit_tx, commit_rx) = mpsc::channel(16);
    let task = tokio::spawn(run(raw_rx, commit_tx, delay, initial));
    (DebouncerHandle { raw: raw_tx }, commit_rx, task)
}

async fn run(
    mut raw: watch::Receiver<String>,
    commits: mpsc::Sender<String>,
    delay: Duration,
    mut last_committed: String,
) {
    loop {
        tokio::select! {
            changed = raw.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            () = commits.closed() => break,
        }

        // Every change seen inside the window restarts it.
        loop {
            tokio::select! {
                changed = raw.changed() => {
                    if changed.is_err() {
                        tracing::debug!("debouncer input closed with a pending value; dropping it");
                        return;
                    }
                }
                () = tokio::time::sleep(delay) => break,
                () = commits.closed() => return,
            }
        }

        let value = raw.borrow_and_update().clone();
        if value == last_committed {
            tracing::trace!(query = %value, "debounced value unchanged; not committing");
            continue;
        }

        tracing::debug!(query = %value, "committing debounced query");
        if commits.send(value.clone()).await.is_err() {
            break;
        }
        last_committed = value;
    }

    tracing::debug!("debouncer stopped");
}
