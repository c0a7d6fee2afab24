use crate::error::{GraphError, Result};
use crate::maximum_flow::boykov_kolmogorov::BoykovKolmogorov;
use crate::maximum_flow::config::Config;
use crate::maximum_flow::status::{Segment, Status};
use crate::maximum_flow::{Capacity, EdgeId, NodeId};
use std::fmt::Debug;
use tracing::warn;

/// An arc pair as the caller built it, with the net flow `from -> to` once
/// solved. `flow` is negative when more went `to -> from`.
#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: Flow,
    pub capacity: Flow,
    pub reverse_capacity: Flow,
}

#[derive(Default, PartialEq, Debug, Clone, Copy)]
pub(crate) struct TerminalWeights<Flow> {
    pub source: Flow,
    pub sink: Flow,
}

/// Directed capacitated graph with one implicit source and one implicit sink.
///
/// Nodes and arcs are added first, then [`solve`](Graph::solve) computes the
/// maximum flow. The first solve freezes the topology: any later
/// `add_node`, `add_edge` or terminal weight change is rejected with
/// [`GraphError::StructuralEditAfterSolve`].
#[derive(Default)]
pub struct Graph<Flow> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
    pub(crate) terminals: Vec<TerminalWeights<Flow>>,
    config: Config,
    solver: Option<BoykovKolmogorov<Flow>>,
    status: Status,
}

impl<Flow> Graph<Flow>
where
    Flow: Capacity + Default,
{
    /// Empty graph with storage pre-sized for the expected node and arc counts.
    pub fn with_capacity(expected_nodes: usize, expected_arcs: usize) -> Self {
        Self::with_config(Config::with_capacity(expected_nodes, expected_arcs))
    }

    /// Empty graph using `config` for pre-sizing and solver settings.
    pub fn with_config(config: Config) -> Self {
        Self {
            edges: Vec::with_capacity(config.expected_arcs),
            terminals: Vec::with_capacity(config.expected_nodes),
            config,
            ..Self::default()
        }
    }
}

impl<Flow> Graph<Flow>
where
    Flow: Capacity,
{
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn add_node(&mut self) -> Result<NodeId> {
        self.ensure_editable()?;
        self.terminals.push(TerminalWeights { source: Flow::zero(), sink: Flow::zero() });
        self.num_nodes += 1;
        Ok(self.num_nodes - 1)
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Result<Vec<NodeId>> {
        self.ensure_editable()?;
        self.terminals.extend((0..num_nodes).map(|_| TerminalWeights { source: Flow::zero(), sink: Flow::zero() }));
        self.num_nodes += num_nodes;
        Ok(((self.num_nodes - num_nodes)..self.num_nodes).collect())
    }

    /// Adds the arc pair `u -> v` with capacity `cap_uv` and `v -> u` with
    /// capacity `cap_vu`, returning its edge id.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, cap_uv: Flow, cap_vu: Flow) -> Result<EdgeId> {
        self.ensure_editable()?;
        self.check_node(u)?;
        self.check_node(v)?;
        if cap_uv < Flow::zero() || cap_vu < Flow::zero() {
            return Err(GraphError::InvalidCapacity);
        }

        self.edges.push(Edge { from: u, to: v, flow: Flow::zero(), capacity: cap_uv, reverse_capacity: cap_vu });
        self.num_edges += 1;
        Ok(self.num_edges - 1)
    }

    /// Replaces the capacities of `source -> v` and `v -> sink`.
    pub fn set_terminal_weights(&mut self, v: NodeId, to_source: Flow, to_sink: Flow) -> Result<()> {
        self.ensure_editable()?;
        self.check_node(v)?;
        if to_source < Flow::zero() || to_sink < Flow::zero() {
            return Err(GraphError::InvalidCapacity);
        }

        self.terminals[v] = TerminalWeights { source: to_source, sink: to_sink };
        Ok(())
    }

    /// Adds to the capacities of `source -> v` and `v -> sink`.
    pub fn add_terminal_weights(&mut self, v: NodeId, to_source: Flow, to_sink: Flow) -> Result<()> {
        self.ensure_editable()?;
        self.check_node(v)?;
        if to_source < Flow::zero() || to_sink < Flow::zero() {
            return Err(GraphError::InvalidCapacity);
        }

        let current = self.terminals[v];
        let source = current.source.checked_add(&to_source).ok_or(GraphError::Overflow)?;
        let sink = current.sink.checked_add(&to_sink).ok_or(GraphError::Overflow)?;
        self.terminals[v] = TerminalWeights { source, sink };
        Ok(())
    }

    /// Runs the maximum flow computation and returns the flow value, which
    /// equals the capacity of the minimum cut.
    ///
    /// Solving again without edits in between returns the same value.
    pub fn solve(&mut self) -> Result<Flow> {
        if self.solver.is_none() {
            self.check_overflow()?;
        }

        let (num_nodes, edges, terminals, config) = (self.num_nodes, &self.edges, &self.terminals, self.config);
        let solver = self.solver.get_or_insert_with(|| BoykovKolmogorov::new(num_nodes, edges, terminals, config));
        let flow = solver.solve();
        solver.csr.set_flow(&mut self.edges);

        self.status = Status::Optimal;
        Ok(flow)
    }

    /// Side of the minimum cut `v` belongs to. Before the first solve every
    /// node is on the sink side.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a node of this graph.
    pub fn segment_of(&self, v: NodeId) -> Segment {
        assert!(v < self.num_nodes, "node {v} does not exist");
        self.try_segment_of(v).unwrap_or(Segment::Sink)
    }

    pub fn try_segment_of(&self, v: NodeId) -> Option<Segment> {
        if v >= self.num_nodes {
            return None;
        }
        Some(match &self.solver {
            Some(solver) => solver.segment_of(v),
            None => Segment::Sink,
        })
    }

    pub fn maximum_flow(&self) -> Flow {
        self.solver.as_ref().map_or(Flow::zero(), |solver| solver.flow())
    }

    // nodes on the source side of the cut
    pub fn minimum_cut(&self) -> Vec<NodeId> {
        (0..self.num_nodes).filter(|&v| self.segment_of(v) == Segment::Source).collect()
    }

    pub fn get_edge(&self, edge_id: EdgeId) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    /// Signed residual capacity between `v` and the terminals: positive
    /// towards the source, negative towards the sink.
    pub fn terminal_residual(&self, v: NodeId) -> Option<Flow> {
        if v >= self.num_nodes {
            return None;
        }
        Some(match &self.solver {
            Some(solver) => solver.nodes[v].terminal_capacity,
            None => self.terminals[v].source - self.terminals[v].sink,
        })
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.solver.is_some() {
            warn!("rejected structural edit after solve");
            return Err(GraphError::StructuralEditAfterSolve);
        }
        Ok(())
    }

    #[inline]
    fn check_node(&self, v: NodeId) -> Result<()> {
        if v >= self.num_nodes {
            return Err(GraphError::InvalidNode(v));
        }
        Ok(())
    }

    // The two residuals of an arc pair always sum to its two capacities and
    // the flow never exceeds either terminal total, so checking these sums
    // once rules out overflow for the whole run.
    fn check_overflow(&self) -> Result<()> {
        for edge in &self.edges {
            edge.capacity.checked_add(&edge.reverse_capacity).ok_or(GraphError::Overflow)?;
        }

        let source_total = self.terminals.iter().try_fold(Flow::zero(), |sum, t| sum.checked_add(&t.source));
        let sink_total = self.terminals.iter().try_fold(Flow::zero(), |sum, t| sum.checked_add(&t.sink));
        if source_total.is_none() && sink_total.is_none() {
            return Err(GraphError::Overflow);
        }
        Ok(())
    }
}

impl<Flow> Debug for Graph<Flow>
where
    Flow: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph").field("num_nodes", &self.num_nodes).field("num_edges", &self.num_edges).field("status", &self.status).finish()
    }
}
