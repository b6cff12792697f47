use alloc::collections::VecDeque;

use super::{Error, ErrorCode, ErrorQueue};

/// Heap-backed error queue with a capacity chosen at runtime.
///
/// Same overflow contract as [`ArrayErrorQueue`](super::ArrayErrorQueue):
/// the queue never grows past its capacity, a full queue records a
/// `-350, "Queue overflow"` in its newest slot.
#[derive(Debug)]
pub struct DequeErrorQueue {
    deque: VecDeque<Error>,
    capacity: usize,
}

impl DequeErrorQueue {
    pub fn new(capacity: usize) -> Self {
        DequeErrorQueue {
            deque: VecDeque::with_capacity(capacity),
            capacity,
        }
    }
}

impl ErrorQueue for DequeErrorQueue {
    fn push_back_error(&mut self, err: Error) {
        if self.deque.len() < self.capacity {
            self.deque.push_back(err);
        } else if let Some(last) = self.deque.back_mut() {
            *last = ErrorCode::QueueOverflow.into();
        }
    }

    fn pop_front_error(&mut self) -> Option<Error> {
        self.deque.pop_front()
    }

    fn num_errors(&self) -> usize {
        self.deque.len()
    }

    fn clear_errors(&mut self) {
        self.deque.clear()
    }
}
