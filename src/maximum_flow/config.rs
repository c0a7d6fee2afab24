/// Construction-time settings of a [`Graph`](crate::maximum_flow::graph::Graph).
///
/// `expected_nodes` and `expected_arcs` only pre-size storage; a graph grows
/// past them as needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub expected_nodes: usize,
    pub expected_arcs: usize,
    /// While growing, move a same-tree neighbour under the growing node when
    /// that shortens its known distance to the terminal.
    pub reparent_heuristic: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { expected_nodes: 0, expected_arcs: 0, reparent_heuristic: true }
    }
}

impl Config {
    pub fn with_capacity(expected_nodes: usize, expected_arcs: usize) -> Self {
        Self { expected_nodes, expected_arcs, ..Self::default() }
    }

    pub fn reparent_heuristic(mut self, enabled: bool) -> Self {
        self.reparent_heuristic = enabled;
        self
    }
}
