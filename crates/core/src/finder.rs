use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;

use super::graph::TournamentGraph;
use super::traits::CircuitSolver;
use common::{
    error::{AbortReason, Error},
    types::Circuit,
};

/// The deadline is read once per this many steps, starting with the first.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Limits that let a caller stop a runaway search.
///
/// The search is exponential in the worst case. Every limit is checked
/// cooperatively from inside the search loop; an exhausted budget surfaces as
/// `Error::SearchAborted`, never as "no circuit".
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    max_steps: Option<u64>,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Abort as soon as `flag` becomes `true`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check(&self, steps: u64) -> Result<(), Error> {
        let abort = |reason| Err(Error::SearchAborted { reason, steps });

        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return abort(AbortReason::Cancelled);
            }
        }

        if let Some(max_steps) = self.max_steps {
            if steps > max_steps {
                return abort(AbortReason::StepLimit);
            }
        }

        if let Some(deadline) = self.deadline {
            if (steps - 1) % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                return abort(AbortReason::Deadline);
            }
        }

        Ok(())
    }
}

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Iterations of the search loop.
    pub steps: u64,
    /// Tentative extensions that were undone.
    pub backtracks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub circuit: Option<Circuit>,
    pub stats: SearchStats,
}

/// Partial path plus the visited set mirroring its membership.
///
/// `cursors[i]` is the offset of the next successor of `path[i]` still to be
/// tried, so the three vectors form an explicit stack of recursion frames.
/// `path`, `cursors` and the set bits of `visited` always move together.
#[derive(Debug)]
struct SearchState {
    path: Vec<usize>,
    visited: Vec<bool>,
    cursors: Vec<usize>,
}

impl SearchState {
    fn new(num_nodes: usize, start: usize) -> Self {
        let mut visited = vec![false; num_nodes];
        visited[start] = true;

        let mut path = Vec::with_capacity(num_nodes + 1);
        path.push(start);

        let mut cursors = Vec::with_capacity(num_nodes);
        cursors.push(0);

        SearchState {
            path,
            visited,
            cursors,
        }
    }

    fn start(&self) -> usize {
        self.path[0]
    }

    fn current(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    fn is_complete(&self) -> bool {
        self.path.len() == self.visited.len()
    }

    /// Moves the top frame's cursor past visited successors and returns the
    /// first unvisited one, consuming it.
    fn next_unvisited(&mut self, graph: &TournamentGraph) -> Option<usize> {
        let successors = graph.successors(self.current());
        let cursor = self.cursors.last_mut()?;

        while let Some(&candidate) = successors.get(*cursor) {
            *cursor += 1;
            if !self.visited[candidate] {
                return Some(candidate);
            }
        }
        None
    }

    fn advance(&mut self, next: usize) {
        self.visited[next] = true;
        self.path.push(next);
        self.cursors.push(0);
    }

    /// Undoes the most recent `advance`. The start node is never removed.
    fn retreat(&mut self) -> Option<usize> {
        if self.path.len() <= 1 {
            return None;
        }
        let node = self.path.pop()?;
        self.cursors.pop();
        self.visited[node] = false;
        Some(node)
    }

    #[cfg(test)]
    fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    fn into_circuit(mut self) -> Circuit {
        let start = self.start();
        self.path.push(start);
        Circuit::new(self.path)
    }
}

/// Exhaustive depth-first backtracking search for a Hamiltonian circuit.
///
/// Successors are tried in ascending index order (which is label order) and
/// the first complete circuit wins. The recursion is unrolled onto an explicit
/// stack, so graph size is bounded by memory rather than call-stack depth.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    budget: SearchBudget,
}

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(budget: SearchBudget) -> Self {
        BacktrackingSolver { budget }
    }

    /// Searches from the node with the smallest label.
    pub fn search(&self, graph: &TournamentGraph) -> Result<SearchOutcome, Error> {
        if graph.is_empty() {
            return Ok(SearchOutcome {
                circuit: None,
                stats: SearchStats::default(),
            });
        }
        self.search_from(graph, 0)
    }

    /// Runs the search from `start` and reports the circuit (if any) together
    /// with the work done.
    ///
    /// A single-node graph has the circuit `[start, start]` exactly when the
    /// self-edge exists. In larger graphs self-edges are never taken because
    /// the current node is always already visited.
    ///
    /// # Errors
    /// `Error::NodeIndexOutOfBounds` for an invalid `start`, and
    /// `Error::SearchAborted` when the budget runs out.
    pub fn search_from(
        &self,
        graph: &TournamentGraph,
        start: usize,
    ) -> Result<SearchOutcome, Error> {
        let num_nodes = graph.num_nodes();
        if start >= num_nodes {
            return Err(Error::NodeIndexOutOfBounds(start));
        }

        let mut stats = SearchStats::default();

        if num_nodes == 1 {
            let circuit = graph
                .has_edge(start, start)
                .then(|| Circuit::new(vec![start, start]));
            return Ok(SearchOutcome { circuit, stats });
        }

        debug!(
            nodes = num_nodes,
            edges = graph.num_edges(),
            start = ?graph.label(start),
            "Starting circuit search"
        );

        let mut state = SearchState::new(num_nodes, start);

        loop {
            stats.steps += 1;
            self.budget.check(stats.steps)?;

            if state.is_complete() {
                if graph.has_edge(state.current(), state.start()) {
                    debug!(
                        steps = stats.steps,
                        backtracks = stats.backtracks,
                        "Circuit found"
                    );
                    return Ok(SearchOutcome {
                        circuit: Some(state.into_circuit()),
                        stats,
                    });
                }
            } else if let Some(next) = state.next_unvisited(graph) {
                state.advance(next);
                continue;
            }

            // Dead end: every successor of the current node is spent.
            if state.retreat().is_none() {
                debug!(
                    steps = stats.steps,
                    backtracks = stats.backtracks,
                    "Search exhausted without a circuit"
                );
                return Ok(SearchOutcome {
                    circuit: None,
                    stats,
                });
            }
            stats.backtracks += 1;
        }
    }
}

impl CircuitSolver for BacktrackingSolver {
    fn find_circuit_from(
        &self,
        graph: &TournamentGraph,
        start: usize,
    ) -> Result<Option<Circuit>, Error> {
        self.search_from(graph, start).map(|outcome| outcome.circuit)
    }
}
