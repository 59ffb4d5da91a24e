//! Priority queue feeding the actor thread
//!
//! Many producers, one consumer. Entries leave in ascending `(tier, seq)` order,
//! where `seq` is taken from a per-queue counter under the same lock as the push,
//! so two entries never compare equal and equal-tier work runs in submission order.

use parking_lot::{Condvar, Mutex};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::actor::operation::Operation;
use crate::actor::task::{Completer, Task};
use crate::system::metrics::Metrics;

/// Scheduling tier. Lower tiers are dequeued first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Lookups, batch reads and counts
    Read = 0,
    /// Anything that changes the graph
    Mutation = 1,
    /// Stop request, runs after all queued reads and mutations
    Shutdown = 2,
}

/// A queued operation together with the completer for its task
#[derive(Debug)]
pub struct QueueEntry {
    priority: Priority,
    seq: u64,
    pub(crate) completer: Completer,
    pub(crate) operation: Operation,
}

impl QueueEntry {
    /// Tier the entry was submitted at
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Ordering key
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The queued operation
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Split into the parts the dispatcher consumes
    pub fn into_parts(self) -> (Completer, Operation) {
        (self.completer, self.operation)
    }

    fn key(&self) -> (Priority, u64) {
        (self.priority, self.seq)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // BinaryHeap is a max-heap; reverse so the smallest key pops first
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[derive(Debug, Default)]
struct QueueState {
    heap: BinaryHeap<QueueEntry>,
    next_seq: u64,
    closed: bool,
}

/// Blocking priority queue of pending operations
#[derive(Debug, Default)]
pub struct TaskQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl TaskQueue {
    /// Create an empty, open queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `operation` at its natural tier
    pub fn submit(&self, operation: Operation) -> Task {
        let priority = operation.priority();
        self.submit_with_priority(priority, operation)
    }

    /// Enqueue `operation` at an explicit tier and return its task immediately
    ///
    /// On a closed queue the returned task is already resolved to `ActorStopped`.
    pub fn submit_with_priority(&self, priority: Priority, operation: Operation) -> Task {
        let metrics = Metrics::global();
        metrics
            .operations_submitted
            .with_label_values(&[operation.kind()])
            .inc();

        let mut state = self.state.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        let (task, completer) = Task::new(seq);
        if state.closed {
            // Dropping the completer resolves the task
            return task;
        }
        state.heap.push(QueueEntry {
            priority,
            seq,
            completer,
            operation,
        });
        metrics.queue_depth.set(state.heap.len() as i64);
        drop(state);

        self.available.notify_one();
        task
    }

    /// Block until an entry is available and return the smallest `(tier, seq)`
    ///
    /// Returns `None` once the queue is closed.
    pub fn pop(&self) -> Option<QueueEntry> {
        let mut state = self.state.lock();
        loop {
            if let Some(entry) = state.heap.pop() {
                Metrics::global().queue_depth.set(state.heap.len() as i64);
                return Some(entry);
            }
            if state.closed {
                return None;
            }
            self.available.wait(&mut state);
        }
    }

    /// Non-blocking [`pop`](Self::pop)
    pub fn try_pop(&self) -> Option<QueueEntry> {
        let mut state = self.state.lock();
        let entry = state.heap.pop();
        Metrics::global().queue_depth.set(state.heap.len() as i64);
        entry
    }

    /// Close the queue, dropping everything still pending
    ///
    /// Tasks of dropped entries resolve to `ActorStopped`. Idempotent.
    pub fn close(&self) {
        let drained = {
            let mut state = self.state.lock();
            state.closed = true;
            std::mem::take(&mut state.heap)
        };
        if !drained.is_empty() {
            tracing::warn!(pending = drained.len(), "dropping queued operations on close");
        }
        Metrics::global().queue_depth.set(0);
        drop(drained);
        self.available.notify_all();
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.state.lock().heap.len()
    }

    /// Whether no entries are pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
