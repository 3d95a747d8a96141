pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Identifies a class of background work; at most one task runs per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Deals,
    Stores,
    GameDetail,
}

/// Manages background tasks for data loading
/// Tracks running tasks and provides cancellation support
#[derive(Default)]
pub struct BackgroundTaskManager {
    tasks: HashMap<TaskKey, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a background data loading task
    /// If a task with the same key already exists, it is aborted first
    pub fn spawn_load_task<F>(&mut self, key: TaskKey, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.tasks.remove(&key) {
            if !handle.is_finished() {
                tracing::debug!(?key, "Aborting superseded task");
            }
            handle.abort();
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(key, handle);
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
