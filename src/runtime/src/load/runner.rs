//! Concurrent execution of per-node tasks.
//!
//! Every task is spawned up front. The runner then joins the handles in
//! spawn order, so all tasks run to completion and the reported error is the
//! first failure by start order, independent of which task finished first.

use std::future::Future;

use nodeload_core::error::{LoadError, Result};
use tokio::task::JoinHandle;

/// Run all tasks concurrently and return the first error by start order.
///
/// Each task is labelled with the node it works on. A failing task does not
/// cancel its siblings; a panicking task is reported as `TaskFailed`.
pub async fn run_until_first_error<F>(tasks: Vec<(String, F)>) -> Result<()>
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let handles: Vec<(String, JoinHandle<Result<()>>)> = tasks
        .into_iter()
        .map(|(label, task)| (label, tokio::spawn(task)))
        .collect();

    let total = handles.len();
    let mut first_error = None;
    let mut failed = 0usize;

    for (label, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(LoadError::TaskFailed {
                node: label.clone(),
                message: e.to_string(),
            }),
        };

        match outcome {
            Ok(()) => tracing::debug!(node = %label, "Load task finished"),
            Err(e) => {
                failed += 1;
                tracing::warn!(node = %label, error = %e, "Load task failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => {
            // TODO: return every per-node failure once callers can report more than one
            if failed > 1 {
                tracing::warn!(failed, total, "Multiple load tasks failed, reporting the first");
            }
            Err(e)
        }
        None => Ok(()),
    }
}
