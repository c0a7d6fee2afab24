use crate::maximum_flow::graph::Edge;
use crate::maximum_flow::Capacity;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Direction {
    Forward,
    Reverse,
}

// one direction of an arc pair, as seen from the node it leaves
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ArcRef {
    pub arc: usize,
    pub direction: Direction,
}

impl ArcRef {
    #[inline]
    pub fn sister(self) -> Self {
        let direction = match self.direction {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        };
        ArcRef { arc: self.arc, direction }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub(crate) struct ArcPair<Flow> {
    pub tail: usize,
    pub head: usize,
    pub residual_forward: Flow,
    pub residual_reverse: Flow,
}

pub(crate) struct CSR<Flow> {
    pub num_nodes: usize,
    pub num_arcs: usize,

    pub start: Vec<usize>,
    pub adjacency: Vec<ArcRef>,
    pub arcs: Vec<ArcPair<Flow>>,
}

// no `Flow: Default` needed for empty storage
impl<Flow> Default for CSR<Flow> {
    fn default() -> Self {
        Self { num_nodes: 0, num_arcs: 0, start: Vec::new(), adjacency: Vec::new(), arcs: Vec::new() }
    }
}

impl<Flow> CSR<Flow>
where
    Flow: Capacity,
{
    pub fn build(&mut self, num_nodes: usize, edges: &[Edge<Flow>]) {
        self.num_nodes = num_nodes;
        self.num_arcs = edges.len();

        // self-loops never carry flow, so they stay out of the adjacency
        let mut degree = vec![0; num_nodes];
        for edge in edges.iter().filter(|e| e.from != e.to) {
            degree[edge.from] += 1;
            degree[edge.to] += 1;
        }

        self.start.clear();
        self.start.resize(num_nodes + 1, 0);
        for i in 1..=num_nodes {
            self.start[i] += self.start[i - 1] + degree[i - 1];
        }

        let placeholder = ArcRef { arc: usize::MAX, direction: Direction::Forward };
        self.adjacency.clear();
        self.adjacency.resize(self.start[num_nodes], placeholder);
        self.arcs.clear();
        self.arcs.reserve_exact(edges.len());

        let mut counter = vec![0; num_nodes];
        for (arc, e) in edges.iter().enumerate() {
            self.arcs.push(ArcPair { tail: e.from, head: e.to, residual_forward: e.capacity, residual_reverse: e.reverse_capacity });
            if e.from == e.to {
                continue;
            }

            let (u, v) = (e.from, e.to);
            self.adjacency[self.start[u] + counter[u]] = ArcRef { arc, direction: Direction::Forward };
            counter[u] += 1;
            self.adjacency[self.start[v] + counter[v]] = ArcRef { arc, direction: Direction::Reverse };
            counter[v] += 1;
        }
    }

    // net flow from `from` to `to` is whatever the forward residual has lost
    pub fn set_flow(&self, edges: &mut [Edge<Flow>]) {
        for (edge, arc) in edges.iter_mut().zip(self.arcs.iter()) {
            edge.flow = edge.capacity - arc.residual_forward;
        }
    }

    #[inline]
    pub fn neighbors(&self, u: usize) -> std::slice::Iter<ArcRef> {
        self.adjacency[self.start[u]..self.start[u + 1]].iter()
    }

    #[inline]
    pub fn head(&self, a: ArcRef) -> usize {
        match a.direction {
            Direction::Forward => self.arcs[a.arc].head,
            Direction::Reverse => self.arcs[a.arc].tail,
        }
    }

    #[inline]
    pub fn residual(&self, a: ArcRef) -> Flow {
        match a.direction {
            Direction::Forward => self.arcs[a.arc].residual_forward,
            Direction::Reverse => self.arcs[a.arc].residual_reverse,
        }
    }

    #[inline]
    pub fn push_flow(&mut self, a: ArcRef, flow: Flow) {
        let pair = &mut self.arcs[a.arc];
        let (along, against) = match a.direction {
            Direction::Forward => (&mut pair.residual_forward, &mut pair.residual_reverse),
            Direction::Reverse => (&mut pair.residual_reverse, &mut pair.residual_forward),
        };
        *along -= flow;
        *against += flow;
        debug_assert!(*along >= Flow::zero(), "negative residual on arc {}", a.arc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: usize, to: usize, capacity: i64, reverse_capacity: i64) -> Edge<i64> {
        Edge { from, to, flow: 0, capacity, reverse_capacity }
    }

    #[test]
    fn adjacency_keeps_insertion_order() {
        let edges = vec![edge(0, 1, 3, 0), edge(2, 0, 1, 4), edge(1, 2, 5, 5)];
        let mut csr = CSR::default();
        csr.build(3, &edges);

        let around_zero: Vec<_> = csr.neighbors(0).map(|&a| (a.arc, csr.head(a))).collect();
        assert_eq!(around_zero, vec![(0, 1), (1, 2)]);
        let around_two: Vec<_> = csr.neighbors(2).map(|&a| (a.arc, a.direction)).collect();
        assert_eq!(around_two, vec![(1, Direction::Forward), (2, Direction::Reverse)]);
    }

    #[test]
    fn residuals_follow_the_direction_of_travel() {
        let edges = vec![edge(0, 1, 3, 1)];
        let mut csr = CSR::default();
        csr.build(2, &edges);

        let out_of_one = *csr.neighbors(1).next().unwrap();
        assert_eq!(csr.residual(out_of_one), 1);
        assert_eq!(csr.residual(out_of_one.sister()), 3);

        csr.push_flow(out_of_one.sister(), 2);
        assert_eq!(csr.residual(out_of_one.sister()), 1);
        assert_eq!(csr.residual(out_of_one), 3);

        let mut edges = edges;
        csr.set_flow(&mut edges);
        assert_eq!(edges[0].flow, 2);
    }

    #[test]
    fn self_loops_are_not_adjacent() {
        let edges = vec![edge(0, 0, 7, 7), edge(0, 1, 1, 0)];
        let mut csr = CSR::default();
        csr.build(2, &edges);

        assert_eq!(csr.neighbors(0).count(), 1);
        assert_eq!(csr.arcs.len(), 2);
    }
}
