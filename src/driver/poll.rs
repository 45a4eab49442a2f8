//! Combined transmit/receive servicing

use super::config::PortMode;
use super::descriptor::Descriptor;
use super::error::Result;
use super::serial::SerialDriver;
use crate::hal::mapper::RegisterMapper;

/// Outcome of one [`poll`](SerialDriver::poll) call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollStatus {
    /// Bytes moved into the TX device FIFO
    pub transmitted: usize,
    /// Bytes moved out of the RX device FIFO
    pub received: usize,
    /// Whether the receive side was serviced
    pub rx_serviced: bool,
}

impl PollStatus {
    /// Check if the call moved any bytes
    #[must_use]
    pub const fn made_progress(&self) -> bool {
        self.transmitted > 0 || self.received > 0
    }
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    /// Service both directions of a serial descriptor.
    ///
    /// Transmit runs first with a budget of `max_tx` bytes. Receive runs with
    /// a budget of `max_rx` bytes only if nothing is left waiting on the
    /// transmit side afterwards.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Serial mode
    pub fn poll(&mut self, descriptor: Descriptor, max_tx: usize, max_rx: usize) -> Result<PollStatus> {
        let mut port = self.resolve(descriptor, PortMode::Serial)?;

        let mut status = PollStatus {
            transmitted: port.transmit(max_tx)?,
            ..PollStatus::default()
        };
        if !port.tx_pending() {
            status.received = port.receive(max_rx)?;
            status.rx_serviced = true;
        }
        Ok(status)
    }
}
