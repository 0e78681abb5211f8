use serde::Serialize;

use super::error::Error;
use circuit_core::{SearchOutcome, TournamentGraph, validate_circuit};

/// What the executor prints once a search has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitReport {
    pub teams: usize,
    pub edges: usize,
    pub found: bool,
    /// Team labels in circuit order, start repeated at the end.
    pub circuit: Option<Vec<String>>,
    pub steps: u64,
    pub backtracks: u64,
}

impl CircuitReport {
    /// Builds a report, re-checking any circuit against the graph first.
    pub fn new(graph: &TournamentGraph, outcome: &SearchOutcome) -> Result<Self, Error> {
        let circuit = match &outcome.circuit {
            Some(circuit) => {
                validate_circuit(graph, circuit)?;
                let labels = circuit
                    .nodes
                    .iter()
                    .map(|&n| graph.label(n).unwrap_or_default().to_string())
                    .collect();
                Some(labels)
            }
            None => None,
        };

        Ok(CircuitReport {
            teams: graph.num_nodes(),
            edges: graph.num_edges(),
            found: circuit.is_some(),
            circuit,
            steps: outcome.stats.steps,
            backtracks: outcome.stats.backtracks,
        })
    }

    pub fn render_text(&self) -> String {
        match &self.circuit {
            Some(circuit) => format!(
                "Circuit through all {} teams (each beat the next):\n{}",
                self.teams,
                circuit.join(" > ")
            ),
            None => format!(
                "No Hamiltonian circuit exists among {} teams ({} distinct results).",
                self.teams, self.edges
            ),
        }
    }

    pub fn render_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
