#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Status {
    #[default]
    NotSolved,
    Optimal,
}

/// Side of the minimum cut a node ends up on.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Segment {
    Source,
    Sink,
}
