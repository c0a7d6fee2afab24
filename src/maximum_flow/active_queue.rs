use std::collections::VecDeque;

// Nodes are read from the front of the first queue and appended to the back
// of the second one. When the first queue runs dry the second takes its
// place, so a node activated during a pass is not grown again in that pass.
#[derive(Default)]
pub(crate) struct ActiveQueue {
    queues: [VecDeque<usize>; 2],
    linked: Vec<bool>,
}

impl ActiveQueue {
    pub fn reset(&mut self, num_nodes: usize) {
        self.queues.iter_mut().for_each(|q| q.clear());
        self.linked.clear();
        self.linked.resize(num_nodes, false);
    }

    #[inline]
    pub fn push(&mut self, u: usize) {
        if !self.linked[u] {
            self.linked[u] = true;
            self.queues[1].push_back(u);
        }
    }

    pub fn pop(&mut self) -> Option<usize> {
        if self.queues[0].is_empty() {
            self.queues.swap(0, 1);
        }
        let u = self.queues[0].pop_front()?;
        self.linked[u] = false;
        Some(u)
    }

    // a node held outside the queues but flagged as linked cannot be pushed
    #[inline]
    pub fn set_linked(&mut self, u: usize, linked: bool) {
        self.linked[u] = linked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_during_a_pass_waits_for_the_next_pass() {
        let mut queue = ActiveQueue::default();
        queue.reset(4);
        queue.push(0);
        queue.push(1);

        assert_eq!(queue.pop(), Some(0));
        queue.push(2);
        assert_eq!(queue.pop(), Some(1));
        queue.push(3);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn a_node_is_queued_at_most_once() {
        let mut queue = ActiveQueue::default();
        queue.reset(2);
        queue.push(1);
        queue.push(1);

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), None);

        queue.push(1);
        assert_eq!(queue.pop(), Some(1));
    }

    #[test]
    fn linked_flag_blocks_pushes() {
        let mut queue = ActiveQueue::default();
        queue.reset(1);
        queue.set_linked(0, true);
        queue.push(0);
        assert_eq!(queue.pop(), None);

        queue.set_linked(0, false);
        queue.push(0);
        assert_eq!(queue.pop(), Some(0));
    }
}
