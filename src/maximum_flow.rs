mod active_queue;
mod boykov_kolmogorov;
pub mod config;
mod csr;
pub mod graph;
mod orphans;
pub mod status;

use num_traits::{CheckedAdd, NumAssign, Signed};
use std::fmt::Debug;

/// Numeric type of capacities and flow.
///
/// Terminal residuals are kept as one signed value per node, positive towards
/// the source and negative towards the sink, hence `Signed`.
pub trait Capacity: NumAssign + Signed + Ord + Copy + CheckedAdd + Debug {}

impl<T> Capacity for T where T: NumAssign + Signed + Ord + Copy + CheckedAdd + Debug {}

pub type NodeId = usize;
pub type EdgeId = usize;
