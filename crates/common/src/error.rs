use thiserror::Error;

/// Why a search stopped before it could prove or disprove a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    StepLimit,
    Deadline,
    Cancelled,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::StepLimit => write!(f, "step limit reached"),
            AbortReason::Deadline => write!(f, "deadline passed"),
            AbortReason::Cancelled => write!(f, "cancelled by caller"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A match result with a blank winner or loser identifier.
    #[error("Match result #{index} is malformed: {field} identifier is empty.")]
    MalformedResult { index: usize, field: &'static str },

    /// Indicates an attempt to access a node index that exceeds the graph size (N).
    #[error("Node index {0} is out of bounds.")]
    NodeIndexOutOfBounds(usize),

    #[error("Unknown node '{0}'.")]
    UnknownNode(String),

    /// Indicates a structural inconsistency found during graph processing or validation.
    #[error("Graph structure is invalid or inconsistent: {0}")]
    InvalidGraph(String),

    /// The search gave up early; no claim is made about circuit existence.
    #[error("Search aborted after {steps} steps: {reason}.")]
    SearchAborted { reason: AbortReason, steps: u64 },
}
