
/// Type alias for a single directed edge between dense node indices: (winner, loser)
pub type Edge = (usize, usize);

/// A closed walk through every node of a graph exactly once.
///
/// `nodes` holds node indices in visiting order and repeats the first node at
/// the end, so a circuit over `k` nodes has `k + 1` entries:
/// ```text
/// [a, b, c, a]  =>  a -> b -> c -> a
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    pub nodes: Vec<usize>,
}

impl Circuit {
    pub fn new(nodes: Vec<usize>) -> Self {
        Circuit { nodes }
    }

    /// Number of distinct nodes visited (the closing repeat is not counted).
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn start(&self) -> Option<usize> {
        self.nodes.first().copied()
    }

    /// True when the sequence returns to where it began.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 2 && self.nodes.first() == self.nodes.last()
    }

    /// The consecutive `(from, to)` pairs of the circuit, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}
