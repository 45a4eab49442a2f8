//! Poll-driven UART Staging Engine
//!
//! A `no_std`, `no_alloc` engine that moves a byte stream between user code
//! and a fixed set of 16550-style UART ports through word-granular queues.
//!
//! Nothing here is interrupt-driven. Every call returns immediately with a
//! full/empty status that the caller retries on its next poll cycle.
//!
//! # Architecture
//!
//! Data moves through four stages per direction:
//!
//! ```text
//!  write ──> [input word] ──> TX Word Queue ──> [drain word] ──> TX Byte FIFO
//!  read  <── [output word] <── RX Word Queue <── [assembly word] <── RX Byte FIFO
//! ```
//!
//! 1. **Driver Layer** ([`driver`]): [`SerialDriver`] owns the device and
//!    descriptor tables and implements every staging operation
//! 2. **Queue Layer** ([`queue`]): [`WordQueue`] and [`ByteFifo`] ring buffers
//! 3. **HAL Layer** ([`hal`]): [`RegisterMapper`] binds ports to register
//!    blocks
//! 4. **Register Layer** ([`register`]): 16550 offsets, MCR bits and the
//!    [`RegisterAccess`] backends
//!
//! Words are packed and unpacked little-endian: the first byte written is
//! the lowest byte of the word and the first byte transmitted.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for error and status types
//! - `log`: Emit `log` records for init, port setup and I/O failures
//! - `critical-section`: Enable the ISR-safe [`sync::SharedSerial`] wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_serial_stage::{PortMode, SerialDriverDefault};
//!
//! let mut serial = SerialDriverDefault::default();
//! serial.common_init();
//!
//! let d = serial.port_init(0, PortMode::Serial);
//! serial.write(d, b"ping")?;
//!
//! loop {
//!     let status = serial.poll(d, 16, 16)?;
//!     let mut buf = [0u8; 16];
//!     if let Ok(n) = serial.read(d, &mut buf) {
//!         handle(&buf[..n]);
//!     }
//! }
//! ```
//!
//! # Memory Requirements
//!
//! With the default sizing (8 ports, 300-word queues, 255-byte FIFOs) the
//! driver occupies roughly 23 KB, dominated by the two word queues per port.
//! [`SerialDriverSmall`] fits in well under 1 KB.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod queue;
pub mod register;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::PortMode;
pub use driver::descriptor::Descriptor;
pub use driver::device::UartDevice;
pub use driver::error::{
    ConfigError, ConfigResult, Error, IoError, PartialError, QueueError, QueueResult,
    Result, TransferResult,
};
pub use driver::serial::{SerialDriver, SerialDriverDefault, SerialDriverSmall};
pub use driver::{DiscreteLine, PollStatus};
pub use hal::{DefaultMapper, DeviceBinding, MmioMapper, RegisterMapper};
pub use queue::{ByteFifo, FifoPair, WordQueue};
pub use register::{MmioRegisters, RegisterAccess, ShadowRegisters};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{SharedSerial, SharedSerialDefault, SharedSerialSmall};

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Default sizing
        DEVICE_FIFO_CAPACITY,
        PORT_COUNT,
        WORD_QUEUE_CAPACITY,
        // Small sizing
        SMALL_DEVICE_FIFO_CAPACITY,
        SMALL_PORT_COUNT,
        SMALL_WORD_QUEUE_CAPACITY,
        // Layout
        DEFAULT_DEVICE_NAMES,
        DEFAULT_REGISTER_STRIDE,
        WORD_BYTES,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static, ISR-safe serial driver bound through [`DefaultMapper`].
///
/// # Examples
///
/// ```ignore
/// ph_serial_stage::serial_static!(SERIAL);
///
/// SERIAL.with(|serial| serial.common_init());
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! serial_static {
    ($name:ident) => {
        $crate::serial_static!(
            $name,
            $crate::constants::PORT_COUNT,
            $crate::constants::WORD_QUEUE_CAPACITY,
            $crate::constants::DEVICE_FIFO_CAPACITY
        );
    };
    ($name:ident, $ports:expr, $words:expr, $bytes:expr) => {
        static $name: $crate::sync::SharedSerial<$crate::DefaultMapper, { $ports }, { $words }, { $bytes }> =
            $crate::sync::SharedSerial::new($crate::DefaultMapper);
    };
}
