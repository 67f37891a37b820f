//! FIFO handoff between the generation loop and the narration scheduler.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::script::Script;

/// Unbounded script queue. Clones share the same underlying deque.
#[derive(Clone, Default)]
pub struct ScriptQueue {
    inner: Arc<Mutex<VecDeque<Script>>>,
}

impl ScriptQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Script>> {
        self.inner.lock().expect("script queue mutex poisoned")
    }

    /// Append to the tail. Never blocks on the consumer.
    pub fn enqueue(&self, script: Script) {
        self.lock().push_back(script);
    }

    /// Remove the head, or `None` if the queue is empty.
    pub fn dequeue(&self) -> Option<Script> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
