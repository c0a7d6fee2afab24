#![allow(dead_code)]

use graph_cut::maximum_flow::config::Config;
use graph_cut::maximum_flow::graph::Graph;
use graph_cut::maximum_flow::status::Segment;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct Instance {
    pub num_nodes: usize,
    // (u, v, cap_uv, cap_vu)
    pub edges: Vec<(usize, usize, i64, i64)>,
    // (to_source, to_sink)
    pub terminals: Vec<(i64, i64)>,
}

impl Instance {
    pub fn random(seed: u64, max_nodes: usize, max_capacity: i64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let num_nodes = rng.gen_range(1..=max_nodes);
        let num_edges = rng.gen_range(0..=3 * num_nodes);

        let edges = (0..num_edges)
            .map(|_| {
                let u = rng.gen_range(0..num_nodes);
                let v = rng.gen_range(0..num_nodes);
                let cap_vu = if rng.gen_bool(0.4) { rng.gen_range(0..=max_capacity) } else { 0 };
                (u, v, rng.gen_range(0..=max_capacity), cap_vu)
            })
            .collect();
        let terminals = (0..num_nodes)
            .map(|_| {
                let source = if rng.gen_bool(0.3) { rng.gen_range(0..=max_capacity) } else { 0 };
                let sink = if rng.gen_bool(0.3) { rng.gen_range(0..=max_capacity) } else { 0 };
                (source, sink)
            })
            .collect();

        Instance { num_nodes, edges, terminals }
    }

    pub fn build(&self, config: Config) -> Graph<i64> {
        let mut graph = Graph::with_config(config);
        graph.add_nodes(self.num_nodes).unwrap();
        for &(u, v, cap_uv, cap_vu) in &self.edges {
            graph.add_edge(u, v, cap_uv, cap_vu).unwrap();
        }
        for (v, &(source, sink)) in self.terminals.iter().enumerate() {
            graph.set_terminal_weights(v, source, sink).unwrap();
        }
        graph
    }

    // Edmonds-Karp on a dense matrix with explicit terminals
    pub fn reference_flow(&self) -> i64 {
        let n = self.num_nodes + 2;
        let (source, sink) = (self.num_nodes, self.num_nodes + 1);
        let mut capacity = vec![vec![0i64; n]; n];
        for &(u, v, cap_uv, cap_vu) in &self.edges {
            if u != v {
                capacity[u][v] += cap_uv;
                capacity[v][u] += cap_vu;
            }
        }
        for (v, &(to_source, to_sink)) in self.terminals.iter().enumerate() {
            capacity[source][v] += to_source;
            capacity[v][sink] += to_sink;
        }

        let mut flow = 0;
        loop {
            let mut prev = vec![usize::MAX; n];
            prev[source] = source;
            let mut queue = VecDeque::from([source]);
            while let Some(u) = queue.pop_front() {
                for v in 0..n {
                    if prev[v] == usize::MAX && capacity[u][v] > 0 {
                        prev[v] = u;
                        queue.push_back(v);
                    }
                }
            }
            if prev[sink] == usize::MAX {
                return flow;
            }

            let mut delta = i64::MAX;
            let mut v = sink;
            while v != source {
                delta = delta.min(capacity[prev[v]][v]);
                v = prev[v];
            }
            let mut v = sink;
            while v != source {
                capacity[prev[v]][v] -= delta;
                capacity[v][prev[v]] += delta;
                v = prev[v];
            }
            flow += delta;
        }
    }
}

// capacity of the cut a solved graph reports, measured on the original weights
pub fn cut_capacity(instance: &Instance, graph: &Graph<i64>) -> i64 {
    let mut total = 0;
    for &(u, v, cap_uv, cap_vu) in &instance.edges {
        match (graph.segment_of(u), graph.segment_of(v)) {
            (Segment::Source, Segment::Sink) => total += cap_uv,
            (Segment::Sink, Segment::Source) => total += cap_vu,
            _ => {}
        }
    }
    for (v, &(to_source, to_sink)) in instance.terminals.iter().enumerate() {
        total += match graph.segment_of(v) {
            Segment::Source => to_sink,
            Segment::Sink => to_source,
        };
    }
    total
}

pub fn segments(graph: &Graph<i64>) -> Vec<Segment> {
    (0..graph.num_nodes()).map(|v| graph.segment_of(v)).collect()
}
