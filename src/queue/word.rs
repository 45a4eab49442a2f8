//! 32-bit word queue.
//!
//! The unit of internal buffering between user I/O and the device FIFOs.
//! Unlike the device FIFO, a word queue is an opt-in software resource: it
//! refuses every push and pop until [`WordQueue::init`] has run.

use super::ring::RingBuffer;
use crate::driver::error::{QueueError, QueueResult};

/// Fixed-capacity circular queue of 32-bit words with an initialized flag.
#[derive(Debug, Clone)]
pub struct WordQueue<const N: usize> {
    ring: RingBuffer<u32, N>,
    initialized: bool,
}

impl<const N: usize> WordQueue<N> {
    /// Create a zeroed, uninitialized queue (const, suitable for static storage)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: RingBuffer::new(0),
            initialized: false,
        }
    }

    /// Reset indices and count and mark the queue usable.
    ///
    /// Re-initializing a queue that holds data drops that data.
    pub fn init(&mut self) {
        self.ring.reset();
        self.initialized = true;
    }

    /// Mark the queue unusable; subsequent push/pop report `NotInitialized`
    pub fn deinit(&mut self) {
        self.ring.reset();
        self.initialized = false;
    }

    /// Check whether [`init`](Self::init) has run
    #[inline(always)]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Fixed capacity in words
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Queued word count, 0 when uninitialized
    #[inline(always)]
    pub const fn size(&self) -> usize {
        if self.initialized { self.ring.len() } else { 0 }
    }

    /// Check if no words are queued (true when uninitialized)
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Check if the queue cannot accept another word (false when uninitialized)
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.initialized && self.ring.is_full()
    }

    /// Append one word
    ///
    /// # Errors
    /// - `NotInitialized` - queue has not been initialized
    /// - `QueueFull` - queue already holds `N` words
    pub fn push(&mut self, value: u32) -> QueueResult<()> {
        if !self.initialized {
            return Err(QueueError::NotInitialized);
        }
        self.ring.push(value)
    }

    /// Remove the oldest word
    ///
    /// # Errors
    /// - `NotInitialized` - queue has not been initialized
    /// - `QueueEmpty` - no words are queued
    pub fn pop(&mut self) -> QueueResult<u32> {
        if !self.initialized {
            return Err(QueueError::NotInitialized);
        }
        self.ring.pop()
    }
}

impl<const N: usize> Default for WordQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::constants::WORD_QUEUE_CAPACITY;

    // =========================================================================
    // Initialization
    // =========================================================================

    #[test]
    fn uninitialized_queue_rejects_access() {
        let mut queue: WordQueue<4> = WordQueue::new();
        assert!(!queue.is_initialized());
        assert_eq!(queue.push(1), Err(QueueError::NotInitialized));
        assert_eq!(queue.pop(), Err(QueueError::NotInitialized));
        assert_eq!(queue.size(), 0);
        assert!(queue.is_empty());
        assert!(!queue.is_full());
    }

    #[test]
    fn init_resets_contents() {
        let mut queue: WordQueue<4> = WordQueue::new();
        queue.init();
        queue.push(0x1111_1111).unwrap();
        queue.push(0x2222_2222).unwrap();
        assert_eq!(queue.size(), 2);

        queue.init();
        assert_eq!(queue.size(), 0);
        assert_eq!(queue.pop(), Err(QueueError::QueueEmpty));
    }

    #[test]
    fn deinit_blocks_further_access() {
        let mut queue: WordQueue<4> = WordQueue::new();
        queue.init();
        queue.push(5).unwrap();
        queue.deinit();
        assert_eq!(queue.size(), 0);
        assert_eq!(queue.pop(), Err(QueueError::NotInitialized));
    }

    // =========================================================================
    // Capacity Boundaries
    // =========================================================================

    #[test]
    fn word_beyond_capacity_is_rejected() {
        let mut queue: WordQueue<WORD_QUEUE_CAPACITY> = WordQueue::new();
        queue.init();
        for i in 0..WORD_QUEUE_CAPACITY as u32 {
            queue.push(i).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(queue.push(0xFFFF_FFFF), Err(QueueError::QueueFull));
        assert_eq!(queue.size(), WORD_QUEUE_CAPACITY);

        for i in 0..WORD_QUEUE_CAPACITY as u32 {
            assert_eq!(queue.pop(), Ok(i));
        }
        assert_eq!(queue.pop(), Err(QueueError::QueueEmpty));
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn size_tracks_wraparound() {
        let mut queue: WordQueue<3> = WordQueue::new();
        queue.init();
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        assert_eq!(queue.pop(), Ok(1));
        queue.push(3).unwrap();
        queue.push(4).unwrap();
        assert_eq!(queue.size(), 3);
        assert_eq!(queue.pop(), Ok(2));
        assert_eq!(queue.pop(), Ok(3));
        assert_eq!(queue.pop(), Ok(4));
    }
}
