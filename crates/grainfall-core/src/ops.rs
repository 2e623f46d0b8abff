//! Pending input operations
//!
//! Input handling only enqueues work; the sandbox executes one operation per
//! frame, before the physics ticks of that frame.

use std::collections::VecDeque;

/// Deferred grid edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Paint the current brush at the current cursor
    BrushDraw,
    /// Reset the canvas interior to air
    Clear,
}

/// FIFO of operations
#[derive(Debug, Default)]
pub struct OpQueue {
    queue: VecDeque<Operation>,
}

impl OpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: Operation) {
        self.queue.push_back(op);
    }

    pub fn pop(&mut self) -> Option<Operation> {
        self.queue.pop_front()
    }

    pub fn front(&self) -> Option<&Operation> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
