use std::collections::BTreeSet;

use common::error::Error;
use common::types::Edge;

/// Directed "beat" graph in Compressed Sparse Row (CSR) format.
///
/// CSR format stores outgoing edges of each node contiguously in memory:
/// - `node_pointers[u]..node_pointers[u+1]` → edges from node `u`
/// - `edge_targets[i]` -> target node of edge `i`
/// - `edge_source_by_index[i]` -> source node of edge `i`
///
/// Node indices follow the lexicographic order of `labels`, and each node's
/// successors are sorted ascending with duplicates removed. Both orders are
/// what make the circuit search reproducible across runs and platforms.
///
/// The graph is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentGraph {
    labels: Vec<String>,
    node_pointers: Vec<usize>,
    edge_targets: Vec<usize>,
    edge_source_by_index: Vec<usize>,
}

/// Builds a graph from `(winner, loser)` pairs.
///
/// The node set is the union of every identifier seen. Repeated results
/// between the same two teams collapse into one edge. Identifiers are trimmed;
/// a blank winner or loser rejects the whole build with
/// [`Error::MalformedResult`] carrying the position of the offending pair.
///
/// ```
/// use circuit_core::build_graph;
///
/// let graph = build_graph([("BOS", "NYK"), ("NYK", "PHI"), ("PHI", "BOS")]).unwrap();
/// assert_eq!(graph.labels(), ["BOS", "NYK", "PHI"]);
/// assert!(graph.has_edge(0, 1));
/// ```
pub fn build_graph<I, W, L>(results: I) -> Result<TournamentGraph, Error>
where
    I: IntoIterator<Item = (W, L)>,
    W: AsRef<str>,
    L: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (index, (winner, loser)) in results.into_iter().enumerate() {
        let winner = winner.as_ref().trim();
        let loser = loser.as_ref().trim();

        if winner.is_empty() {
            return Err(Error::MalformedResult {
                index,
                field: "winner",
            });
        }
        if loser.is_empty() {
            return Err(Error::MalformedResult {
                index,
                field: "loser",
            });
        }

        pairs.push((winner.to_string(), loser.to_string()));
    }

    let labels: Vec<String> = pairs
        .iter()
        .flat_map(|(w, l)| [w.clone(), l.clone()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // `labels` is sorted and unique, so a binary search recovers each index.
    let mut edges: Vec<Edge> = Vec::with_capacity(pairs.len());
    for (winner, loser) in &pairs {
        let u = labels
            .binary_search(winner)
            .map_err(|_| Error::UnknownNode(winner.clone()))?;
        let v = labels
            .binary_search(loser)
            .map_err(|_| Error::UnknownNode(loser.clone()))?;
        edges.push((u, v));
    }

    TournamentGraph::from_edges(labels, &mut edges)
}

impl TournamentGraph {
    /// Creates a graph from node labels and index-level edges `(src, dst)`.
    ///
    /// `labels[i]` names node `i` and must be strictly ascending. Edges are
    /// sorted by `(src, dst)` and deduplicated in place before the CSR arrays
    /// are built.
    ///
    /// # Errors
    /// Returns `Error::NodeIndexOutOfBounds` if an edge references a node
    /// outside `0..labels.len()`, and `Error::InvalidGraph` if the labels are
    /// unsorted or repeated.
    pub fn from_edges(labels: Vec<String>, edges: &mut Vec<Edge>) -> Result<Self, Error> {
        let num_nodes = labels.len();

        if let Some(&(u, v)) = edges.iter().find(|&&(u, v)| u >= num_nodes || v >= num_nodes) {
            return Err(Error::NodeIndexOutOfBounds(u.max(v)));
        }

        if labels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidGraph(
                "node labels must be sorted and unique".to_string(),
            ));
        }

        edges.sort_unstable();
        edges.dedup();

        let (node_pointers, edge_targets, edge_source_by_index) =
            Self::build_csr_from_edges(num_nodes, edges);

        Ok(Self {
            labels,
            node_pointers,
            edge_targets,
            edge_source_by_index,
        })
    }

    /// Two-pass counting construction of the CSR index.
    ///
    /// Expects `edges` sorted by source; the cursor pass then preserves the
    /// destination order within each source block.
    fn build_csr_from_edges(num_nodes: usize, edges: &[Edge]) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
        let m = edges.len();
        let mut node_pointers = vec![0; num_nodes + 1];

        for &(u, _) in edges {
            node_pointers[u + 1] += 1;
        }

        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let mut edge_targets = vec![0; m];
        let mut edge_source_by_index = vec![0; m];

        let mut cursor = node_pointers.clone();

        for &(u, v) in edges {
            let pos = cursor[u];
            edge_targets[pos] = v;
            edge_source_by_index[pos] = u;
            cursor[u] += 1;
        }

        (node_pointers, edge_targets, edge_source_by_index)
    }

    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, node: usize) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    /// Outgoing neighbours of `node` in ascending index order.
    ///
    /// An out-of-range node has no successors.
    pub fn successors(&self, node: usize) -> &[usize] {
        if node >= self.num_nodes() {
            return &[];
        }
        &self.edge_targets[self.node_pointers[node]..self.node_pointers[node + 1]]
    }

    /// O(log d) membership test on the sorted successor block of `u`.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.successors(u).binary_search(&v).is_ok()
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.successors(node).len()
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.edge_targets.iter().filter(|&&v| v == node).count()
    }

    /// Every edge as a `(winner, loser)` label pair, in CSR order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edge_targets
            .iter()
            .zip(&self.edge_source_by_index)
            .map(|(&v, &u)| (self.labels[u].as_str(), self.labels[v].as_str()))
    }
}
