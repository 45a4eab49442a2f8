//! Centralized Constants
//!
//! Single source of truth for the sizing and layout numbers used throughout
//! the staging engine.
//!
//! # Organization
//!
//! - **Sizing**: port count, word queue and device FIFO capacities
//! - **Word layout**: bytes per staged word
//! - **Register mapping**: default naming and address stride
//!
//! Register offsets and control bits live in [`crate::register`] since they
//! describe the 16550 register block rather than the engine.

// =============================================================================
// Sizing
// =============================================================================

/// Number of physical UART ports (and therefore descriptor slots)
pub const PORT_COUNT: usize = 8;

/// Word queue capacity in 32-bit entries (1200 bytes per queue)
pub const WORD_QUEUE_CAPACITY: usize = 300;

/// Device FIFO capacity in bytes
pub const DEVICE_FIFO_CAPACITY: usize = 255;

/// Port count for the small sizing
pub const SMALL_PORT_COUNT: usize = 2;

/// Word queue capacity for the small sizing
pub const SMALL_WORD_QUEUE_CAPACITY: usize = 16;

/// Device FIFO capacity for the small sizing
pub const SMALL_DEVICE_FIFO_CAPACITY: usize = 16;

// =============================================================================
// Word Layout
// =============================================================================

/// Bytes in one queued word
pub const WORD_BYTES: usize = 4;

// =============================================================================
// Register Mapping
// =============================================================================

/// Address stride between synthetic register blocks of the default mapper
pub const DEFAULT_REGISTER_STRIDE: usize = 0x1000;

/// Device names assigned by the default mapper, indexed by port
pub const DEFAULT_DEVICE_NAMES: [&str; PORT_COUNT] = [
    "uart0", "uart1", "uart2", "uart3", "uart4", "uart5", "uart6", "uart7",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sizing() {
        assert_eq!(PORT_COUNT, 8);
        assert_eq!(WORD_QUEUE_CAPACITY, 300);
        assert_eq!(DEVICE_FIFO_CAPACITY, 255);
        assert_eq!(WORD_BYTES, core::mem::size_of::<u32>());
    }

    #[test]
    fn default_names_cover_every_port() {
        assert_eq!(DEFAULT_DEVICE_NAMES.len(), PORT_COUNT);
        assert_eq!(DEFAULT_DEVICE_NAMES[0], "uart0");
        assert_eq!(DEFAULT_DEVICE_NAMES[PORT_COUNT - 1], "uart7");
    }
}
