//! Hardware Abstraction Layer
//!
//! This module binds logical ports to UART register blocks.
//!
//! - [`mapper`]: the [`RegisterMapper`] trait plus the default (in-memory)
//!   and memory-mapped implementations

pub mod mapper;

pub use mapper::{DefaultMapper, DeviceBinding, MmioMapper, RegisterMapper};
