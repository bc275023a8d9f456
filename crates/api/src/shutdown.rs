//! Ordered graceful shutdown.
//!
//! Cleanup tasks register with a [`ShutdownManager`] owned by `main`, which
//! runs them after the server stops accepting connections. Each task gets
//! the remaining share of one overall deadline; a task that overruns is
//! abandoned with a warning rather than holding the process hostage.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

type CleanupFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

struct CleanupTask {
    name: &'static str,
    future: CleanupFuture,
}

/// Collects named cleanup tasks and runs them in registration order.
#[derive(Default)]
pub struct ShutdownManager {
    tasks: Vec<CleanupTask>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cleanup task. Tasks run in the order they are registered,
    /// so register dependents before the resources they depend on (e.g.
    /// in-flight workers before the database pool).
    pub fn register<F>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push(CleanupTask {
            name,
            future: Box::pin(future),
        });
    }

    /// Run all registered tasks sequentially under one overall deadline.
    pub async fn run(self, deadline: Duration) {
        let started = tokio::time::Instant::now();

        for task in self.tasks {
            let remaining = deadline.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                tracing::warn!(task = task.name, "shutdown deadline exhausted, skipping");
                continue;
            }

            match tokio::time::timeout(remaining, task.future).await {
                Ok(()) => tracing::info!(task = task.name, "shutdown task complete"),
                Err(_) => {
                    tracing::warn!(task = task.name, "shutdown task overran deadline, abandoned")
                }
            }
        }

        tracing::info!("graceful shutdown complete");
    }
}
