use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{info, warn};

use super::config::SearchConfig;
use super::error::Error;
use circuit_core::{BacktrackingSolver, SearchBudget, SearchOutcome, TournamentGraph};

/// Runs one circuit search off the async runtime.
///
/// The search itself is synchronous; it is moved onto a blocking thread so
/// Ctrl-C can raise the cancellation flag while it runs.
pub struct CircuitSearcher {
    config: SearchConfig,
}

impl CircuitSearcher {
    pub fn new(config: SearchConfig) -> Self {
        CircuitSearcher { config }
    }

    fn budget(&self, cancel: Arc<AtomicBool>) -> SearchBudget {
        let mut budget = SearchBudget::unlimited().with_cancel_flag(cancel);
        if let Some(max_steps) = self.config.max_steps {
            budget = budget.with_max_steps(max_steps);
        }
        if let Some(timeout_ms) = self.config.timeout_ms {
            budget = budget.with_timeout(Duration::from_millis(timeout_ms));
        }
        budget
    }

    /// Searches `graph` from `start`, or from the smallest label when `None`.
    pub async fn search(
        self,
        graph: Arc<TournamentGraph>,
        start: Option<usize>,
    ) -> Result<SearchOutcome, Error> {
        let cancel = Arc::new(AtomicBool::new(false));
        let solver = BacktrackingSolver::with_budget(self.budget(cancel.clone()));

        info!(
            teams = graph.num_nodes(),
            edges = graph.num_edges(),
            "Searcher: Starting circuit search..."
        );

        let mut task = tokio::task::spawn_blocking(move || match start {
            Some(start) => solver.search_from(&graph, start),
            None => solver.search(&graph),
        });

        tokio::select! {
            joined = &mut task => Ok(joined??),
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => {
                        warn!("Interrupt received, cancelling search.");
                        cancel.store(true, Ordering::Relaxed);
                    }
                    Err(e) => warn!("Unable to listen for Ctrl-C: {}", e),
                }
                Ok(task.await??)
            }
        }
    }
}
