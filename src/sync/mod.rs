//! Synchronization support
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`] for ISR-safe
//!   interior mutability
//! - **Shared Wrappers** (`shared`): [`SharedSerial`], a critical-section
//!   protected [`SerialDriver`](crate::SerialDriver)
//!
//! Enabled by the `critical-section` feature. The engine itself stays
//! poll-driven; these wrappers only serialize access to it.
//!
//! # Example
//!
//! ```ignore
//! use ph_serial_stage::sync::SharedSerialDefault;
//! use ph_serial_stage::hal::DefaultMapper;
//!
//! static SERIAL: SharedSerialDefault = SharedSerialDefault::new(DefaultMapper);
//!
//! fn main() {
//!     SERIAL.with(|serial| serial.common_init());
//! }
//! ```

mod primitives;
mod shared;

pub use primitives::CriticalSectionCell;
pub use shared::{SharedSerial, SharedSerialDefault, SharedSerialSmall};
