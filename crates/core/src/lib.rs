//! Hamiltonian circuit search over tournament "beat" graphs.
//!
//! A graph is built from `(winner, loser)` results with [`build_graph`] and
//! handed to a [`CircuitSolver`]. `Ok(None)` from a solver means the search
//! was exhaustive and no circuit exists; `Err(_)` is reserved for faults and
//! aborted searches.

pub mod finder;
pub mod graph;
pub mod traits;
pub mod validate;

pub use finder::{BacktrackingSolver, SearchBudget, SearchOutcome, SearchStats};
pub use graph::{TournamentGraph, build_graph};
pub use traits::CircuitSolver;
pub use validate::validate_circuit;
