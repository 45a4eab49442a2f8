//! Fixed-capacity buffers
//!
//! - [`WordQueue`]: 32-bit software queue between user I/O and the device
//!   FIFOs (one TX and one RX per device)
//! - [`ByteFifo`] / [`FifoPair`]: byte-granular model of the hardware FIFOs
//! - [`RingBuffer`]: the circular buffer both are built on
//!
//! All storage is inline; capacities are const generics.

mod fifo;
mod ring;
mod word;

pub use fifo::{ByteFifo, FifoPair};
pub use ring::RingBuffer;
pub use word::WordQueue;
