//! Device byte FIFO model.
//!
//! One TX and one RX FIFO exist per physical port. They model hardware
//! buffering, so they are always structurally valid: there is no initialized
//! flag, only a bulk reset performed by common init.

use super::ring::RingBuffer;
use crate::driver::error::QueueResult;

/// Fixed-capacity byte FIFO.
#[derive(Debug, Clone)]
pub struct ByteFifo<const N: usize> {
    ring: RingBuffer<u8, N>,
}

impl<const N: usize> ByteFifo<N> {
    /// Create an empty FIFO
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: RingBuffer::new(0),
        }
    }

    /// Drop all buffered bytes
    #[inline(always)]
    pub fn reset(&mut self) {
        self.ring.reset();
    }

    /// Fixed capacity in bytes
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of buffered bytes
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.ring.len()
    }

    /// Check if the FIFO holds no bytes
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Check if the FIFO holds `N` bytes
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Append one byte
    ///
    /// # Errors
    /// - `QueueFull` - FIFO already holds `N` bytes
    #[inline]
    pub fn push(&mut self, byte: u8) -> QueueResult<()> {
        self.ring.push(byte)
    }

    /// Remove the oldest byte
    ///
    /// # Errors
    /// - `QueueEmpty` - FIFO is empty
    #[inline]
    pub fn pop(&mut self) -> QueueResult<u8> {
        self.ring.pop()
    }

    /// Push bytes from `data` until the FIFO fills, returning how many fit
    pub fn push_slice(&mut self, data: &[u8]) -> usize {
        data.iter()
            .take_while(|&&byte| self.ring.push(byte).is_ok())
            .count()
    }

    /// Pop bytes into `buffer` until the FIFO empties, returning how many moved
    pub fn pop_slice(&mut self, buffer: &mut [u8]) -> usize {
        let mut moved = 0;
        for slot in buffer.iter_mut() {
            match self.ring.pop() {
                Ok(byte) => *slot = byte,
                Err(_) => break,
            }
            moved += 1;
        }
        moved
    }
}

impl<const N: usize> Default for ByteFifo<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// TX/RX FIFO pair of one port, as seen from the hardware side.
///
/// `tx` receives bytes drained by the engine (software to device); `rx`
/// is filled by the device and consumed by the engine.
#[derive(Debug, Clone, Default)]
pub struct FifoPair<const N: usize> {
    /// Software-to-device FIFO
    pub tx: ByteFifo<N>,
    /// Device-to-software FIFO
    pub rx: ByteFifo<N>,
}

impl<const N: usize> FifoPair<N> {
    /// Create an empty FIFO pair
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tx: ByteFifo::new(),
            rx: ByteFifo::new(),
        }
    }

    /// Empty both FIFOs
    pub fn reset(&mut self) {
        self.tx.reset();
        self.rx.reset();
    }

    /// Move up to `max_bytes` from the TX FIFO into the RX FIFO.
    ///
    /// Models a loopback cable (or the MCR loopback path): bytes keep their
    /// order and stop moving when the TX side empties or the RX side fills.
    pub fn loopback(&mut self, max_bytes: usize) -> usize {
        let mut moved = 0;
        while moved < max_bytes && !self.tx.is_empty() && !self.rx.is_full() {
            let Ok(byte) = self.tx.pop() else { break };
            if self.rx.push(byte).is_err() {
                break;
            }
            moved += 1;
        }
        moved
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::error::QueueError;

    #[test]
    fn fifo_is_usable_without_init() {
        let mut fifo: ByteFifo<4> = ByteFifo::new();
        assert!(fifo.is_empty());
        fifo.push(0xAB).unwrap();
        assert_eq!(fifo.len(), 1);
        assert_eq!(fifo.pop(), Ok(0xAB));
        assert_eq!(fifo.pop(), Err(QueueError::QueueEmpty));
    }

    #[test]
    fn fifo_reports_full() {
        let mut fifo: ByteFifo<3> = ByteFifo::new();
        assert_eq!(fifo.push_slice(&[1, 2, 3, 4, 5]), 3);
        assert!(fifo.is_full());
        assert_eq!(fifo.push(6), Err(QueueError::QueueFull));
        assert_eq!(fifo.len(), fifo.capacity());
    }

    #[test]
    fn pop_slice_stops_when_empty() {
        let mut fifo: ByteFifo<8> = ByteFifo::new();
        fifo.push_slice(&[9, 8, 7]);
        let mut buf = [0u8; 5];
        assert_eq!(fifo.pop_slice(&mut buf), 3);
        assert_eq!(&buf[..3], &[9, 8, 7]);
        assert!(fifo.is_empty());
    }

    #[test]
    fn reset_empties_fifo() {
        let mut fifo: ByteFifo<8> = ByteFifo::new();
        fifo.push_slice(&[1, 2]);
        fifo.reset();
        assert!(fifo.is_empty());
    }

    // =========================================================================
    // FifoPair
    // =========================================================================

    #[test]
    fn loopback_moves_bytes_in_order() {
        let mut pair: FifoPair<8> = FifoPair::new();
        pair.tx.push_slice(&[0x11, 0x22, 0x33]);
        assert_eq!(pair.loopback(usize::MAX), 3);
        assert!(pair.tx.is_empty());
        assert_eq!(pair.rx.pop(), Ok(0x11));
        assert_eq!(pair.rx.pop(), Ok(0x22));
        assert_eq!(pair.rx.pop(), Ok(0x33));
    }

    #[test]
    fn loopback_respects_limit_and_rx_capacity() {
        let mut pair: FifoPair<2> = FifoPair::new();
        pair.tx.push_slice(&[1, 2]);
        assert_eq!(pair.loopback(1), 1);
        assert_eq!(pair.tx.len(), 1);

        pair.rx.push(0xEE).unwrap();
        // RX is now full, nothing more can move
        assert_eq!(pair.loopback(10), 0);
        assert_eq!(pair.tx.len(), 1);
    }

    #[test]
    fn pair_reset_clears_both_sides() {
        let mut pair: FifoPair<4> = FifoPair::new();
        pair.tx.push(1).unwrap();
        pair.rx.push(2).unwrap();
        pair.reset();
        assert!(pair.tx.is_empty());
        assert!(pair.rx.is_empty());
    }
}
