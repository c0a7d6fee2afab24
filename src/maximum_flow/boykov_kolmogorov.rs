use crate::maximum_flow::active_queue::ActiveQueue;
use crate::maximum_flow::config::Config;
use crate::maximum_flow::csr::{ArcRef, CSR};
use crate::maximum_flow::graph::{Edge, TerminalWeights};
use crate::maximum_flow::orphans::OrphanList;
use crate::maximum_flow::status::Segment;
use crate::maximum_flow::Capacity;
use tracing::{debug, trace};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Parent {
    // in neither tree
    Free,
    // bound directly to its terminal through terminal_capacity
    Root,
    // arc leaving this node towards its parent
    ViaArc(ArcRef),
    // lost its parent, waiting for adoption
    Orphan,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<Flow> {
    pub terminal_capacity: Flow,
    pub parent: Parent,
    pub is_sink: bool,
    pub timestamp: usize,
    pub dist: usize,
}

impl<Flow> Node<Flow> {
    #[inline]
    fn has_parent(&self) -> bool {
        matches!(self.parent, Parent::Root | Parent::ViaArc(_))
    }
}

// source-tree endpoint, sink-tree endpoint and the arc joining them, oriented
// from the source side to the sink side
type Meeting = (usize, usize, ArcRef);

pub(crate) struct BoykovKolmogorov<Flow> {
    pub csr: CSR<Flow>,
    pub nodes: Vec<Node<Flow>>,
    active: ActiveQueue,
    orphans: OrphanList,

    time: usize,
    flow: Flow,
    reparent_heuristic: bool,

    augmentations: usize,
    adoptions: usize,
}

impl<Flow> BoykovKolmogorov<Flow>
where
    Flow: Capacity,
{
    // Each node's two terminal weights collapse into one signed residual and
    // the smaller weight is pushed straight through source -> u -> sink.
    pub fn new(num_nodes: usize, edges: &[Edge<Flow>], terminals: &[TerminalWeights<Flow>], config: Config) -> Self {
        let mut csr = CSR::default();
        csr.build(num_nodes, edges);

        let mut flow = Flow::zero();
        let mut nodes = Vec::with_capacity(num_nodes);
        for t in terminals {
            flow += t.source.min(t.sink);
            nodes.push(Node { terminal_capacity: t.source - t.sink, parent: Parent::Free, is_sink: false, timestamp: 0, dist: 0 });
        }

        Self {
            csr,
            nodes,
            active: ActiveQueue::default(),
            orphans: OrphanList::default(),
            time: 0,
            flow,
            reparent_heuristic: config.reparent_heuristic,
            augmentations: 0,
            adoptions: 0,
        }
    }

    #[inline]
    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn segment_of(&self, u: usize) -> Segment {
        let node = &self.nodes[u];
        if node.has_parent() && !node.is_sink {
            Segment::Source
        } else {
            Segment::Sink
        }
    }

    pub fn solve(&mut self) -> Flow {
        self.init();
        debug!(nodes = self.csr.num_nodes, arcs = self.csr.num_arcs, "solving maximum flow");

        // Idle -> Growing -> (Augmenting -> Adopting ->)* ... -> Done
        let mut current_node = None;
        loop {
            let current = match current_node.take() {
                Some(i) => {
                    self.active.set_linked(i, false);
                    self.nodes[i].has_parent().then_some(i)
                }
                None => None,
            };
            let i = match current.or_else(|| self.next_active()) {
                Some(i) => i,
                None => break,
            };

            let meeting = self.grow(i);
            self.time += 1;

            if let Some((s_start, t_start, middle)) = meeting {
                // keep growing from i once the trees are repaired
                self.active.set_linked(i, true);
                current_node = Some(i);

                self.augment(s_start, t_start, middle);
                self.adopt();
            }
        }

        if cfg!(debug_assertions) {
            self.check_trees();
        }
        debug!(flow = ?self.flow, augmentations = self.augmentations, adoptions = self.adoptions, "maximum flow found");
        self.flow
    }

    fn init(&mut self) {
        self.active.reset(self.nodes.len());
        self.orphans.clear();
        self.time = 0;

        for (u, node) in self.nodes.iter_mut().enumerate() {
            node.timestamp = 0;
            if node.terminal_capacity == Flow::zero() {
                node.parent = Parent::Free;
                continue;
            }
            node.is_sink = node.terminal_capacity < Flow::zero();
            node.parent = Parent::Root;
            node.dist = 1;
            self.active.push(u);
        }
    }

    fn next_active(&mut self) -> Option<usize> {
        while let Some(i) = self.active.pop() {
            // orphaned or freed while queued
            if self.nodes[i].has_parent() {
                return Some(i);
            }
        }
        None
    }

    // Capacity of the tree edge between a child and its parent, given the arc
    // leaving the child towards the parent. Source trees carry flow down
    // towards the child, sink trees up towards the parent.
    #[inline]
    fn tree_residual(&self, parent_arc: ArcRef, is_sink: bool) -> Flow {
        if is_sink {
            self.csr.residual(parent_arc)
        } else {
            self.csr.residual(parent_arc.sister())
        }
    }

    fn grow(&mut self, i: usize) -> Option<Meeting> {
        let is_sink = self.nodes[i].is_sink;
        let (timestamp, dist) = (self.nodes[i].timestamp, self.nodes[i].dist);

        for &a in self.csr.neighbors(i) {
            let towards_i = a.sister();
            if self.tree_residual(towards_i, is_sink) == Flow::zero() {
                continue;
            }

            let j = self.csr.head(a);
            let node = &mut self.nodes[j];
            if node.parent == Parent::Free {
                node.is_sink = is_sink;
                node.parent = Parent::ViaArc(towards_i);
                node.timestamp = timestamp;
                node.dist = dist + 1;
                self.active.push(j);
            } else if node.is_sink != is_sink {
                return Some(if is_sink { (j, i, towards_i) } else { (i, j, a) });
            } else if self.reparent_heuristic && node.timestamp <= timestamp && node.dist > dist {
                node.parent = Parent::ViaArc(towards_i);
                node.timestamp = timestamp;
                node.dist = dist + 1;
            }
        }
        None
    }

    fn augment(&mut self, s_start: usize, t_start: usize, middle: ArcRef) {
        // bottleneck
        let mut bottleneck = self.csr.residual(middle);
        let mut i = s_start;
        while let Some(a) = self.tree_arc(i) {
            bottleneck = bottleneck.min(self.csr.residual(a.sister()));
            i = self.csr.head(a);
        }
        bottleneck = bottleneck.min(self.nodes[i].terminal_capacity);

        let mut i = t_start;
        while let Some(a) = self.tree_arc(i) {
            bottleneck = bottleneck.min(self.csr.residual(a));
            i = self.csr.head(a);
        }
        bottleneck = bottleneck.min(-self.nodes[i].terminal_capacity);
        debug_assert!(bottleneck > Flow::zero(), "augmenting path without capacity");

        // push
        self.csr.push_flow(middle, bottleneck);

        let mut i = s_start;
        while let Some(a) = self.tree_arc(i) {
            let down = a.sister();
            self.csr.push_flow(down, bottleneck);
            if self.csr.residual(down) == Flow::zero() {
                self.make_orphan(i);
            }
            i = self.csr.head(a);
        }
        self.nodes[i].terminal_capacity -= bottleneck;
        debug_assert!(self.nodes[i].terminal_capacity >= Flow::zero(), "source root {i} pushed past its terminal capacity");
        if self.nodes[i].terminal_capacity == Flow::zero() {
            self.make_orphan(i);
        }

        let mut i = t_start;
        while let Some(a) = self.tree_arc(i) {
            self.csr.push_flow(a, bottleneck);
            if self.csr.residual(a) == Flow::zero() {
                self.make_orphan(i);
            }
            i = self.csr.head(a);
        }
        self.nodes[i].terminal_capacity += bottleneck;
        debug_assert!(self.nodes[i].terminal_capacity <= Flow::zero(), "sink root {i} pushed past its terminal capacity");
        if self.nodes[i].terminal_capacity == Flow::zero() {
            self.make_orphan(i);
        }

        self.flow += bottleneck;
        self.augmentations += 1;
        trace!(bottleneck = ?bottleneck, s_start, t_start, "augmented");
    }

    // Next arc on the way from `i` up to its root, None at the root itself.
    #[inline]
    fn tree_arc(&self, i: usize) -> Option<ArcRef> {
        match self.nodes[i].parent {
            Parent::Root => None,
            Parent::ViaArc(a) => Some(a),
            parent => panic!("corrupted search tree: node {i} on an augmenting path has parent {parent:?}"),
        }
    }

    #[inline]
    fn make_orphan(&mut self, i: usize) {
        self.nodes[i].parent = Parent::Orphan;
        self.orphans.push_saturated(i);
    }

    fn adopt(&mut self) {
        while let Some(i) = self.orphans.next() {
            self.process_orphan(i);
            self.adoptions += 1;
        }
    }

    fn process_orphan(&mut self, i: usize) {
        let is_sink = self.nodes[i].is_sink;

        let mut best: Option<(ArcRef, usize)> = None;
        for k in self.csr.start[i]..self.csr.start[i + 1] {
            let a = self.csr.adjacency[k];
            if self.tree_residual(a, is_sink) == Flow::zero() {
                continue;
            }

            let j = self.csr.head(a);
            if self.nodes[j].is_sink != is_sink || self.nodes[j].parent == Parent::Free {
                continue;
            }

            if let Some(d) = self.distance_to_terminal(j) {
                if best.map_or(true, |(_, d_min)| d < d_min) {
                    best = Some((a, d));
                }
                self.mark_path(j, d);
            }
        }

        match best {
            Some((a, d)) => {
                let node = &mut self.nodes[i];
                node.parent = Parent::ViaArc(a);
                node.timestamp = self.time;
                node.dist = d + 1;
            }
            None => self.free(i, is_sink),
        }
    }

    // Length of the tree path from j to its terminal, or None when the path
    // runs into an orphan. Stops early at nodes already measured in this pass.
    fn distance_to_terminal(&mut self, j: usize) -> Option<usize> {
        let mut k = j;
        let mut d = 0;
        loop {
            let node = &mut self.nodes[k];
            if node.timestamp == self.time {
                return Some(d + node.dist);
            }
            d += 1;
            match node.parent {
                Parent::Root => {
                    node.timestamp = self.time;
                    node.dist = 1;
                    return Some(d);
                }
                Parent::ViaArc(a) => k = self.csr.head(a),
                Parent::Orphan => return None,
                Parent::Free => panic!("corrupted search tree: free node {k} on a tree path"),
            }
        }
    }

    fn mark_path(&mut self, j: usize, mut d: usize) {
        let mut k = j;
        while self.nodes[k].timestamp != self.time {
            let node = &mut self.nodes[k];
            node.timestamp = self.time;
            node.dist = d;
            d -= 1;
            k = match node.parent {
                Parent::ViaArc(a) => self.csr.head(a),
                parent => panic!("corrupted search tree: unmeasured node {k} has parent {parent:?}"),
            };
        }
    }

    // No parent found: i leaves its tree, its children become orphans and the
    // neighbours that could grow back into i are woken up.
    fn free(&mut self, i: usize, is_sink: bool) {
        self.nodes[i].parent = Parent::Free;
        self.nodes[i].timestamp = 0;

        for &a in self.csr.neighbors(i) {
            let j = self.csr.head(a);
            let parent = self.nodes[j].parent;
            if self.nodes[j].is_sink != is_sink || parent == Parent::Free {
                continue;
            }

            if self.tree_residual(a, is_sink) > Flow::zero() {
                self.active.push(j);
            }
            if let Parent::ViaArc(p) = parent {
                if self.csr.head(p) == i {
                    self.nodes[j].parent = Parent::Orphan;
                    self.orphans.push_cascade(j);
                }
            }
        }
    }

    fn check_trees(&self) {
        for (u, node) in self.nodes.iter().enumerate() {
            match node.parent {
                Parent::Free => {}
                Parent::Orphan => panic!("corrupted search tree: node {u} is still an orphan"),
                Parent::Root => {
                    let towards_sink = node.terminal_capacity < Flow::zero();
                    assert!(node.terminal_capacity != Flow::zero() && towards_sink == node.is_sink, "corrupted search tree: root {u} is not bound to its terminal");
                }
                Parent::ViaArc(a) => {
                    let p = self.csr.head(a);
                    assert!(self.nodes[p].has_parent() && self.nodes[p].is_sink == node.is_sink, "corrupted search tree: node {u} hangs off node {p} of another tree");
                    assert!(self.tree_residual(a, node.is_sink) > Flow::zero(), "corrupted search tree: tree edge {u} -> {p} is saturated");
                }
            }
        }
    }
}
