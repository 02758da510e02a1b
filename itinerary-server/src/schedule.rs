//! Fixed-delay repeating tasks.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

/// Handle to a task started by [`every`].
///
/// Dropping the handle stops the task after its current run.
pub struct PeriodicTask {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Run `callback` every `interval`, forever.
///
/// The first run happens one `interval` after the call. The next wait only
/// starts once the previous run has finished, so runs never overlap. A
/// panicking callback ends the task; the panic surfaces from
/// [`PeriodicTask::wait`] or [`PeriodicTask::stop`].
pub fn every<F, Fut>(interval: Duration, mut callback: F) -> PeriodicTask
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (cancel, mut cancelled) = watch::channel(false);

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                // Fires on cancel and when the handle is dropped
                _ = cancelled.changed() => break,
            }
            callback().await;
        }
        debug!("periodic task stopped");
    });

    PeriodicTask { cancel, handle }
}

impl PeriodicTask {
    /// Ask the task to stop; a run already in progress completes first.
    pub fn cancel(&self) {
        // Err only means the task has already ended
        let _ = self.cancel.send(true);
    }

    /// Whether the task has ended (cancelled or panicked).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to end without cancelling it.
    pub async fn wait(&mut self) -> Result<(), JoinError> {
        (&mut self.handle).await
    }

    /// Cancel the task and wait for it to end.
    pub async fn stop(self) -> Result<(), JoinError> {
        self.cancel();
        self.handle.await
    }
}
