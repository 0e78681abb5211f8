use super::graph::TournamentGraph;
use common::{error::Error, types::Circuit};

/// Trait for solvers capable of finding a Hamiltonian circuit.
pub trait CircuitSolver {
    /// Searches for a circuit starting at `start`.
    ///
    /// Returns `Ok(Some(circuit))` if a circuit is found,
    /// `Ok(None)` if none exists, or `Err(e)` on failure.
    fn find_circuit_from(
        &self,
        graph: &TournamentGraph,
        start: usize,
    ) -> Result<Option<Circuit>, Error>;

    /// Searches from the node with the smallest label (index 0).
    ///
    /// An empty graph has no circuit.
    fn find_circuit(&self, graph: &TournamentGraph) -> Result<Option<Circuit>, Error> {
        if graph.is_empty() {
            return Ok(None);
        }
        self.find_circuit_from(graph, 0)
    }
}
