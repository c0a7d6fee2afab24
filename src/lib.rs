//! Minimum s-t cuts for energy minimization.
//!
//! The solver is the Boykov-Kolmogorov augmenting-path algorithm: two search
//! trees grow from the source and the sink, meet, push flow along the joined
//! path and are then repaired in place by adopting orphaned nodes.
//!
//! ```
//! use graph_cut::maximum_flow::graph::Graph;
//! use graph_cut::maximum_flow::status::Segment;
//!
//! let mut graph = Graph::<i64>::default();
//! let nodes = graph.add_nodes(2).unwrap();
//! graph.add_edge(nodes[0], nodes[1], 5, 0).unwrap();
//! graph.set_terminal_weights(nodes[0], 10, 0).unwrap();
//! graph.set_terminal_weights(nodes[1], 0, 10).unwrap();
//!
//! assert_eq!(graph.solve().unwrap(), 5);
//! assert_eq!(graph.segment_of(nodes[0]), Segment::Source);
//! assert_eq!(graph.segment_of(nodes[1]), Segment::Sink);
//! ```

pub mod error;
pub mod maximum_flow;

pub use error::{GraphError, Result};
