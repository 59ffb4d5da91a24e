//! Single-assignment completion handle shared between a caller and the actor
//!
//! A [`Task`] is the caller's half: it is pending until the matching [`Completer`]
//! fires. The completer is moved into the queue entry and consumed on completion,
//! so a task can be resolved at most once.

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::core::error::Error;
use crate::core::types::Reply;

/// Caller side of a submitted operation
#[derive(Debug)]
pub struct Task {
    seq: u64,
    state: TaskState,
}

#[derive(Debug)]
enum TaskState {
    Pending(oneshot::Receiver<Reply>),
    Done(Reply),
}

/// Actor side of a submitted operation
#[derive(Debug)]
pub struct Completer {
    seq: u64,
    tx: oneshot::Sender<Reply>,
}

fn stopped() -> Reply {
    Reply::from_error(&Error::ActorStopped)
}

impl Task {
    /// Create a pending task and the completer that resolves it
    pub fn new(seq: u64) -> (Task, Completer) {
        let (tx, rx) = oneshot::channel();
        (
            Task {
                seq,
                state: TaskState::Pending(rx),
            },
            Completer { seq, tx },
        )
    }

    /// Ordering key assigned at submission
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Non-blocking check. Once this returns `false` the reply is cached and
    /// [`wait`](Self::wait) returns it immediately.
    pub fn is_pending(&mut self) -> bool {
        if let TaskState::Pending(rx) = &mut self.state {
            let reply = match rx.try_recv() {
                Ok(reply) => reply,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Closed) => stopped(),
            };
            self.state = TaskState::Done(reply);
        }
        false
    }

    /// Wait for the reply
    ///
    /// Resolves to a 503 `ActorStopped` reply if the actor dropped the task without
    /// completing it.
    pub async fn wait(self) -> Reply {
        match self.state {
            TaskState::Done(reply) => reply,
            TaskState::Pending(rx) => rx.await.unwrap_or_else(|_| stopped()),
        }
    }

    /// Blocking variant of [`wait`](Self::wait) for callers outside an async runtime
    ///
    /// # Panics
    ///
    /// Panics when called from within an async execution context.
    pub fn blocking_wait(self) -> Reply {
        match self.state {
            TaskState::Done(reply) => reply,
            TaskState::Pending(rx) => rx.blocking_recv().unwrap_or_else(|_| stopped()),
        }
    }
}

impl Completer {
    /// Ordering key of the task this completer resolves
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Resolve the task. The caller may already have dropped its half, which is fine.
    pub fn complete(self, reply: Reply) {
        let _ = self.tx.send(reply);
    }
}
