use std::collections::VecDeque;

/// Nodes waiting for adoption.
///
/// Orphans created by an augmentation are taken last-in first-out. Every
/// orphan taken from there is settled together with its whole cascade, the
/// children freed while processing it, in first-in first-out order before the
/// next saturated orphan is looked at.
#[derive(Default)]
pub(crate) struct OrphanList {
    saturated: Vec<usize>,
    cascade: VecDeque<usize>,
}

impl OrphanList {
    pub fn clear(&mut self) {
        self.saturated.clear();
        self.cascade.clear();
    }

    #[inline]
    pub fn push_saturated(&mut self, u: usize) {
        self.saturated.push(u);
    }

    #[inline]
    pub fn push_cascade(&mut self, u: usize) {
        self.cascade.push_back(u);
    }

    #[inline]
    pub fn next(&mut self) -> Option<usize> {
        self.cascade.pop_front().or_else(|| self.saturated.pop())
    }
}
