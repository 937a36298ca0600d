//! Fixed-depth delay line over a signal

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// FIFO that releases each value `capacity` pushes after it went in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayLine<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T> DelayLine<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a sample; once more than `capacity` are held the oldest is
    /// evicted and returned
    pub fn push(&mut self, value: T) -> Option<T> {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity {
            self.samples.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest held sample
    pub fn oldest(&self) -> Option<&T> {
        self.samples.front()
    }
}
