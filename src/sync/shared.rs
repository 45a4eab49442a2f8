//! ISR-safe driver wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::serial::SerialDriver;
use crate::hal::mapper::{DefaultMapper, RegisterMapper};
use crate::internal::constants::{
    DEVICE_FIFO_CAPACITY, PORT_COUNT, SMALL_DEVICE_FIFO_CAPACITY, SMALL_PORT_COUNT,
    SMALL_WORD_QUEUE_CAPACITY, WORD_QUEUE_CAPACITY,
};

/// ISR-safe serial driver wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure. This is the external serialization a
/// driver needs when one context writes and another polls.
///
/// # Example
///
/// ```ignore
/// static SERIAL: SharedSerialDefault = SharedSerial::new(DefaultMapper);
///
/// let d = SERIAL.with(|serial| {
///     serial.common_init();
///     serial.port_init(0, PortMode::Serial)
/// });
///
/// #[interrupt]
/// fn TIMER() {
///     SERIAL.with(|serial| serial.poll(d, 16, 16).ok());
/// }
/// ```
pub struct SharedSerial<M, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
where
    M: RegisterMapper,
{
    inner: CriticalSectionCell<SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>>,
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    SharedSerial<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    /// Create a new shared driver (const, suitable for static initialization).
    pub const fn new(mapper: M) -> Self {
        Self {
            inner: CriticalSectionCell::new(SerialDriver::new(mapper)),
        }
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>) -> R,
    {
        self.inner.try_with(f)
    }

    /// Check if common init has run
    pub fn is_initialized(&self) -> bool {
        self.inner.with_ref(SerialDriver::is_initialized)
    }
}

impl<M, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> Default
    for SharedSerial<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
where
    M: RegisterMapper + Default,
{
    fn default() -> Self {
        Self::new(M::default())
    }
}

/// Shared driver with the reference sizing over shadow registers.
pub type SharedSerialDefault =
    SharedSerial<DefaultMapper, PORT_COUNT, WORD_QUEUE_CAPACITY, DEVICE_FIFO_CAPACITY>;

/// Small shared driver for memory-constrained systems.
pub type SharedSerialSmall = SharedSerial<
    DefaultMapper,
    SMALL_PORT_COUNT,
    SMALL_WORD_QUEUE_CAPACITY,
    SMALL_DEVICE_FIFO_CAPACITY,
>;
