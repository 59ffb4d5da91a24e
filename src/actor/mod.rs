//! Single-writer actor in front of the graph store
//!
//! Async callers submit [`Operation`]s through a [`GraphHandle`] and get a [`Task`]
//! back immediately. One dedicated OS thread pops entries from the [`TaskQueue`] in
//! `(tier, seq)` order, runs them against the store and completes their tasks.
//! Reads that tolerate being unordered go through [`GraphReader`] instead.

pub mod adapter;
pub mod dispatch;
pub mod operation;
pub mod queue;
pub mod task;
pub mod worker;

pub use operation::Operation;
pub use queue::{Priority, QueueEntry, TaskQueue};
pub use task::{Completer, Task};
pub use worker::{GraphActor, GraphHandle, GraphReader};
