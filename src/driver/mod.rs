//! Core driver components for the serial staging engine.
//!
//! - [`config`] - Port modes
//! - [`error`] - Error types and result aliases
//! - [`descriptor`] - Descriptor handles and per-descriptor staging state
//! - [`device`] - Device table entries
//! - [`serial`] - The [`SerialDriver`] context: init, lookup, port table
//!
//! The transmit, receive, poll and control-line operations are further
//! `impl SerialDriver` blocks in private submodules.
//!
//! # Example
//!
//! ```ignore
//! use ph_serial_stage::driver::{PortMode, SerialDriverDefault};
//!
//! let mut driver = SerialDriverDefault::default();
//! driver.common_init();
//! let d = driver.port_init(0, PortMode::Serial);
//! driver.write(d, b"hello")?;
//! ```

// Submodules
pub mod config;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod serial;

mod control;
mod poll;
mod rx;
mod tx;

// Re-exports for convenience
pub use config::PortMode;
pub use control::DiscreteLine;
pub use descriptor::Descriptor;
pub use device::UartDevice;
pub use error::{
    ConfigError, ConfigResult, Error, IoError, PartialError, QueueError, QueueResult,
    Result, TransferResult,
};
pub use poll::PollStatus;
pub use serial::{SerialDriver, SerialDriverDefault, SerialDriverSmall};
