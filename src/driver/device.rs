//! Device table entries

use super::config::PortMode;
use crate::hal::mapper::DeviceBinding;
use crate::queue::WordQueue;

/// One physical UART port: hardware binding, mode and word queues.
///
/// Created by the driver, reset by common init, configured by port init.
/// Exposed read-only through
/// [`get_uart_device`](crate::SerialDriver::get_uart_device).
#[derive(Debug)]
pub struct UartDevice<R, const QUEUE_WORDS: usize> {
    pub(crate) port: usize,
    pub(crate) binding: DeviceBinding<R>,
    pub(crate) configured: bool,
    pub(crate) mode: PortMode,
    pub(crate) tx_queue: WordQueue<QUEUE_WORDS>,
    pub(crate) rx_queue: WordQueue<QUEUE_WORDS>,
}

impl<R, const QUEUE_WORDS: usize> UartDevice<R, QUEUE_WORDS> {
    pub(crate) const fn new() -> Self {
        Self {
            port: 0,
            binding: DeviceBinding::new(),
            configured: false,
            mode: PortMode::Discrete,
            tx_queue: WordQueue::new(),
            rx_queue: WordQueue::new(),
        }
    }

    /// Return to the common-init state. The register binding survives.
    ///
    /// Both word queues are deinitialized; only a Serial port init starts them again.
    pub(crate) fn reset(&mut self, port: usize) {
        self.port = port;
        self.configured = false;
        self.mode = PortMode::Discrete;
        self.tx_queue.deinit();
        self.rx_queue.deinit();
    }

    /// Apply a port init: record the mode and, for serial ports, start both
    /// word queues empty
    pub(crate) fn configure(&mut self, mode: PortMode) {
        if mode.has_queues() {
            self.tx_queue.init();
            self.rx_queue.init();
        }
        self.mode = mode;
        self.configured = true;
    }

    /// Physical port index
    #[must_use]
    pub const fn port(&self) -> usize {
        self.port
    }

    /// Check if a descriptor has configured this device
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.configured
    }

    /// Mode the device was configured with
    #[must_use]
    pub const fn mode(&self) -> PortMode {
        self.mode
    }

    /// Display name recorded by the mapper
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        self.binding.name
    }

    /// Base address recorded by the mapper (0 if unknown)
    #[must_use]
    pub const fn base_address(&self) -> usize {
        self.binding.base_address
    }

    /// Bound register block
    #[must_use]
    pub const fn registers(&self) -> Option<&R> {
        self.binding.registers.as_ref()
    }

    /// Transmit word queue
    #[must_use]
    pub const fn tx_queue(&self) -> &WordQueue<QUEUE_WORDS> {
        &self.tx_queue
    }

    /// Receive word queue
    #[must_use]
    pub const fn rx_queue(&self) -> &WordQueue<QUEUE_WORDS> {
        &self.rx_queue
    }
}
