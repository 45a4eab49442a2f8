//! Transmit path.
//!
//! This module extends [`SerialDriver`] with the two transmit stages:
//!
//! 1. **Write**: user bytes are packed little-endian into the descriptor's
//!    input word and pushed to the TX word queue four at a time.
//! 2. **Drain**: words are popped from the TX word queue and fed into the
//!    port's TX device FIFO, lowest byte first.
//!
//! Both stages keep their partial word in the descriptor between calls, so a
//! byte stream can be split across any number of calls without loss.

#[cfg(feature = "log")]
use log::debug;

use super::config::PortMode;
use super::descriptor::Descriptor;
use super::error::{IoError, PartialError, QueueError, QueueResult, Result, TransferResult};
use super::serial::{PortContext, SerialDriver};
use crate::hal::mapper::RegisterMapper;
use crate::internal::stage::StagedWord;

// =============================================================================
// Staging Algorithms
// =============================================================================

impl<R, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> PortContext<'_, R, QUEUE_WORDS, FIFO_BYTES> {
    /// Push a complete input word to the TX queue; partial words stay put
    fn flush_tx_input(&mut self) -> QueueResult<()> {
        if let Some(word) = self.entry.tx_input.full_word() {
            self.device.tx_queue.push(word)?;
            self.entry.tx_input.clear();
        }
        Ok(())
    }

    /// Stage `data` into the TX word queue
    pub(crate) fn write(&mut self, data: &[u8]) -> TransferResult {
        let mut written = 0;

        while written < data.len() {
            if self.entry.tx_input.is_full() {
                match self.flush_tx_input() {
                    Ok(()) => continue,
                    Err(QueueError::QueueFull) => break,
                    Err(err) => return Err(PartialError::new(err.into_tx(), written)),
                }
            }
            self.entry.tx_input.push_byte(data[written]);
            written += 1;
        }

        // A full queue only matters if the caller still had bytes to give;
        // otherwise the complete word simply waits for the next call.
        match self.flush_tx_input() {
            Ok(()) => {}
            Err(QueueError::QueueFull) if written == data.len() => {}
            Err(err) => return Err(PartialError::new(err.into_tx(), written)),
        }

        if written == data.len() {
            Ok(written)
        } else {
            Err(PartialError::new(IoError::TxFull.into(), written))
        }
    }

    /// Drain up to `max_bytes` from the TX word queue into the TX device FIFO
    pub(crate) fn transmit(&mut self, max_bytes: usize) -> Result<usize> {
        let mut transmitted = 0;

        while transmitted < max_bytes && !self.fifos.tx.is_full() {
            if self.entry.tx_drain.is_empty() {
                if self.device.tx_queue.is_empty() && !self.entry.tx_input.is_empty() {
                    // Nothing queued: let the trailing input bytes go out
                    self.entry.tx_drain = self.entry.tx_input.take();
                } else {
                    match self.device.tx_queue.pop() {
                        Ok(word) => self.entry.tx_drain = StagedWord::from_word(word),
                        Err(QueueError::QueueEmpty) => break,
                        Err(err) => return Err(err.into_tx()),
                    }
                }
            }

            let Some(byte) = self.entry.tx_drain.peek_byte() else {
                break;
            };
            if self.fifos.tx.push(byte).is_err() {
                break;
            }
            self.entry.tx_drain.pop_byte();
            transmitted += 1;
        }

        Ok(transmitted)
    }

    /// Pop one raw word from the TX side, bypassing the device FIFO
    pub(crate) fn next_tx_word(&mut self) -> Result<u32> {
        if self.device.tx_queue.is_empty() {
            if let Some(word) = self.entry.tx_input.full_word() {
                self.entry.tx_input.clear();
                return Ok(word);
            }
        }
        self.device.tx_queue.pop().map_err(QueueError::into_tx)
    }

    /// Check if any transmit data has not reached the device FIFO yet
    pub(crate) fn tx_pending(&self) -> bool {
        self.entry.tx_staged() || !self.device.tx_queue.is_empty()
    }
}

// =============================================================================
// Public Transmit API
// =============================================================================

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    /// Write bytes to a serial descriptor.
    ///
    /// Bytes are accepted until the TX word queue fills. Up to three trailing
    /// bytes (or one complete word when the queue is full) stay staged in the
    /// descriptor and are picked up by the next write or drain.
    ///
    /// Returns the number of bytes accepted, which is `data.len()` on success.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Serial mode
    /// - `TxFull` - queue filled before all of `data` was accepted; the
    ///   accepted count is in [`PartialError::transferred`]
    pub fn write(&mut self, descriptor: Descriptor, data: &[u8]) -> TransferResult {
        let mut port = self.resolve(descriptor, PortMode::Serial)?;
        let result = port.write(data);

        #[cfg(feature = "log")]
        if let Err(err) = &result {
            let (done, total, cause) = (err.transferred, data.len(), err.error);
            debug!("serial: write on {descriptor} stopped after {done} of {total} bytes: {cause}");
        }

        result
    }

    /// Push one complete word straight to the TX word queue.
    ///
    /// Bypasses byte staging; any partially written bytes stay staged.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Serial mode
    /// - `TxFull` - the TX word queue is full
    pub fn write_u32(&mut self, descriptor: Descriptor, value: u32) -> Result<()> {
        let port = self.resolve(descriptor, PortMode::Serial)?;
        port.device.tx_queue.push(value).map_err(QueueError::into_tx)
    }

    /// Move up to `max_bytes` from the TX word queue into the port's TX
    /// device FIFO.
    ///
    /// Stops without error when the queue runs dry or the FIFO fills. When
    /// the queue is empty, trailing input bytes that never formed a complete
    /// word are drained as well.
    ///
    /// Returns the number of bytes pushed to the FIFO.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Serial mode
    pub fn transmit_to_device_fifo(&mut self, descriptor: Descriptor, max_bytes: usize) -> Result<usize> {
        self.resolve(descriptor, PortMode::Serial)?.transmit(max_bytes)
    }

    /// Pop the next queued TX word without going through the device FIFO.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Serial mode
    /// - `TxEmpty` - no complete word is queued or staged
    pub fn read_next_tx_u32(&mut self, descriptor: Descriptor) -> Result<u32> {
        self.resolve(descriptor, PortMode::Serial)?.next_tx_word()
    }

    /// Complete TX words waiting for the device FIFO (0 if the descriptor
    /// does not resolve)
    pub fn pending_tx(&self, descriptor: Descriptor) -> usize {
        self.lookup(descriptor).map_or(0, |(entry, device)| {
            device.tx_queue.size() + usize::from(entry.tx_input.is_full())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
