// SPDX-License-Identifier: MPL-2.0
//! Memory-bounded ring buffer for diagnostic events.
//!
//! Once full, pushing evicts the oldest entry, so a long-running session
//! keeps only its most recent notification activity.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Buffer capacity bounds (100 to 10000 events).
pub mod buffer_capacity_bounds {
    use crate::config::{
        DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        MIN_DIAGNOSTICS_BUFFER_CAPACITY,
    };

    pub const MIN: usize = MIN_DIAGNOSTICS_BUFFER_CAPACITY;
    pub const MAX: usize = MAX_DIAGNOSTICS_BUFFER_CAPACITY;
    pub const DEFAULT: usize = DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY;
}

/// Number of events the diagnostics buffer holds.
///
/// Out-of-range values are clamped rather than rejected, so a hand-edited
/// settings file can never disable the buffer.
///
/// ```
/// use toastline::diagnostics::BufferCapacity;
///
/// assert_eq!(BufferCapacity::new(2_000).value(), 2_000);
/// assert_eq!(BufferCapacity::new(50_000).value(), 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= buffer_capacity_bounds::MIN
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= buffer_capacity_bounds::MAX
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

impl From<usize> for BufferCapacity {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<BufferCapacity> for usize {
    fn from(capacity: BufferCapacity) -> Self {
        capacity.0
    }
}

/// A generic circular buffer with fixed capacity.
///
/// Elements are kept in chronological order (oldest first).
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a buffer without the [`BufferCapacity`] clamp. Used by tests
    /// that need tiny buffers.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an element, evicting the oldest if at capacity.
    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_clamps_to_bounds() {
        assert_eq!(BufferCapacity::new(0).value(), buffer_capacity_bounds::MIN);
        assert_eq!(
            BufferCapacity::new(100_000).value(),
            buffer_capacity_bounds::MAX
        );
        assert_eq!(BufferCapacity::new(5_000).value(), 5_000);
    }

    #[test]
    fn capacity_default_and_extremes() {
        assert_eq!(
            BufferCapacity::default().value(),
            buffer_capacity_bounds::DEFAULT
        );
        assert!(BufferCapacity::new(buffer_capacity_bounds::MIN).is_min());
        assert!(BufferCapacity::new(buffer_capacity_bounds::MAX).is_max());
        assert!(!BufferCapacity::default().is_min());
        assert!(!BufferCapacity::default().is_max());
    }

    #[test]
    fn capacity_deserializes_through_clamp() {
        #[derive(Deserialize)]
        struct Wrapper {
            capacity: BufferCapacity,
        }

        let parsed: Wrapper = toml::from_str("capacity = 3").expect("valid toml");
        assert_eq!(parsed.capacity.value(), buffer_capacity_bounds::MIN);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut buffer = CircularBuffer::with_raw_capacity(3);
        for item in 1..=5 {
            buffer.push(item);
        }

        let items: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(items, vec![3, 4, 5]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = CircularBuffer::with_raw_capacity(5);
        buffer.push("a");
        buffer.push("b");

        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 5);
    }

    #[test]
    fn zero_raw_capacity_still_holds_one() {
        let mut buffer = CircularBuffer::with_raw_capacity(0);
        buffer.push(1);
        buffer.push(2);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn new_uses_buffer_capacity() {
        let buffer: CircularBuffer<u8> = CircularBuffer::new(BufferCapacity::new(500));
        assert_eq!(buffer.capacity(), 500);
    }
}
