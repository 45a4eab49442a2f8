//! Generic fixed-capacity circular buffer.

use crate::driver::error::{QueueError, QueueResult};

/// Circular buffer with wraparound write/read indices and an occupancy count.
///
/// Capacity is the const parameter `N`; there is no resizing.
#[derive(Debug, Clone)]
pub struct RingBuffer<T: Copy, const N: usize> {
    /// Backing storage
    pub(super) slots: [T; N],
    /// Index where the next value will be written
    pub(super) head: usize,
    /// Index where the next value will be read
    pub(super) tail: usize,
    /// Number of values currently stored
    pub(super) count: usize,
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    /// Create an empty ring whose slots are filled with `fill`
    #[must_use]
    pub const fn new(fill: T) -> Self {
        Self {
            slots: [fill; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Fixed capacity of the ring
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of values currently stored
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Check if no values are stored
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if the ring cannot accept another value
    #[inline(always)]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.count == N
    }

    /// Drop all contents and rewind both indices
    #[inline(always)]
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Append a value at the write index
    pub fn push(&mut self, value: T) -> QueueResult<()> {
        if self.is_full() {
            return Err(QueueError::QueueFull);
        }
        self.slots[self.head] = value;
        self.head = (self.head + 1) % N;
        self.count += 1;
        Ok(())
    }

    /// Remove the value at the read index
    pub fn pop(&mut self) -> QueueResult<T> {
        if self.is_empty() {
            return Err(QueueError::QueueEmpty);
        }
        let value = self.slots[self.tail];
        self.tail = (self.tail + 1) % N;
        self.count -= 1;
        Ok(value)
    }

    /// Look at the value at the read index without removing it
    pub fn peek(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[self.tail])
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
