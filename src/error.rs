use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("capacity must be non-negative")]
    InvalidCapacity,

    #[error("node {0} does not exist")]
    InvalidNode(usize),

    #[error("capacity arithmetic overflows the capacity type")]
    Overflow,

    #[error("the graph topology is frozen once solve() has run")]
    StructuralEditAfterSolve,
}
