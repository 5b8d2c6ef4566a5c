use crate::thread::{Thread, ThreadId};
use std::cmp::Reverse;
use std::collections::VecDeque;
use std::sync::Arc;

/// Ordered collection of threads awaiting dispatch.
///
/// Only the orchestrating thread touches the queue; the concurrent
/// round-robin drivers work on their own candidate and leave queue
/// membership to the post-join bookkeeping.
pub struct ReadyQueue {
    queue: VecDeque<Arc<Thread>>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, id: ThreadId) -> bool {
        self.queue.iter().any(|t| t.id == id)
    }

    /// Appends to the back. A thread already present is left where it is
    /// and `false` is returned; no thread appears twice.
    pub fn enqueue(&mut self, thread: Arc<Thread>) -> bool {
        if self.contains(thread.id) {
            return false;
        }
        self.queue.push_back(thread);
        true
    }

    /// Remove by identity (e.g. finished or preempted out of the queue).
    pub fn remove(&mut self, id: ThreadId) -> bool {
        if let Some(pos) = self.queue.iter().position(|t| t.id == id) {
            self.queue.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn pop_front(&mut self) -> Option<Arc<Thread>> {
        self.queue.pop_front()
    }

    /// Head of the CPU-bound partition, in queue order.
    pub fn first_cpu_bound(&self) -> Option<Arc<Thread>> {
        self.queue.iter().find(|t| !t.io_bound).cloned()
    }

    /// Head of the IO-bound partition, in queue order.
    pub fn first_io_bound(&self) -> Option<Arc<Thread>> {
        self.queue.iter().find(|t| t.io_bound).cloned()
    }

    /// Descending by priority; the sort is stable, so equal priorities
    /// keep their prior relative order.
    pub fn sort_by_priority(&mut self) {
        self.queue
            .make_contiguous()
            .sort_by_key(|t| Reverse(t.priority));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Thread>> {
        self.queue.iter()
    }
}

impl Default for ReadyQueue {
    fn default() -> Self {
        Self::new()
    }
}
