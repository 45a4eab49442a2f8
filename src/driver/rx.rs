//! Receive path.
//!
//! This module extends [`SerialDriver`] with the two receive stages:
//!
//! 1. **Drain**: bytes are pulled from the port's RX device FIFO and
//!    assembled little-endian into words for the RX word queue.
//! 2. **Read**: words are popped from the RX word queue and handed to the
//!    caller byte by byte, lowest byte first.
//!
//! When the RX word queue runs dry, `read` also takes bytes still sitting in
//! the assembly word, so a trailing partial word is never stuck.

use super::config::PortMode;
use super::descriptor::Descriptor;
use super::error::{ConfigError, IoError, PartialError, QueueError, QueueResult, Result, TransferResult};
use super::serial::{PortContext, SerialDriver};
use crate::hal::mapper::RegisterMapper;
use crate::internal::constants::WORD_BYTES;
use crate::internal::stage::StagedWord;

// =============================================================================
// Staging Algorithms
// =============================================================================

impl<R, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> PortContext<'_, R, QUEUE_WORDS, FIFO_BYTES> {
    /// Push a complete assembly word to the RX queue; partial words stay put
    fn flush_rx_assembly(&mut self) -> QueueResult<()> {
        if let Some(word) = self.entry.rx_assembly.full_word() {
            self.device.rx_queue.push(word)?;
            self.entry.rx_assembly.clear();
        }
        Ok(())
    }

    /// Pull up to `max_bytes` from the RX device FIFO into the RX word queue
    pub(crate) fn receive(&mut self, max_bytes: usize) -> Result<usize> {
        let mut received = 0;

        while received < max_bytes {
            if self.entry.rx_assembly.is_full() {
                match self.flush_rx_assembly() {
                    Ok(()) => continue,
                    Err(QueueError::QueueFull) => break,
                    Err(err) => return Err(err.into_rx()),
                }
            }
            let Ok(byte) = self.fifos.rx.pop() else {
                break;
            };
            self.entry.rx_assembly.push_byte(byte);
            received += 1;
        }

        match self.flush_rx_assembly() {
            Ok(()) | Err(QueueError::QueueFull) => Ok(received),
            Err(err) => Err(err.into_rx()),
        }
    }

    /// Copy received bytes into `buffer`
    pub(crate) fn read(&mut self, buffer: &mut [u8]) -> TransferResult {
        let mut read = 0;

        while read < buffer.len() {
            if let Some(byte) = self.entry.rx_output.pop_byte() {
                buffer[read] = byte;
                read += 1;
                continue;
            }

            match self.device.rx_queue.pop() {
                Ok(word) => {
                    self.entry.rx_output = StagedWord::from_word(word);
                    continue;
                }
                Err(QueueError::QueueEmpty) => {}
                Err(err) => return Err(PartialError::new(err.into_rx(), read)),
            }

            match self.entry.rx_assembly.pop_byte() {
                Some(byte) => {
                    buffer[read] = byte;
                    read += 1;
                }
                None => break,
            }
        }

        if read == 0 && !buffer.is_empty() {
            return Err(PartialError::new(IoError::RxEmpty.into(), 0));
        }
        Ok(read)
    }

    /// Received bytes available to `read`
    pub(crate) fn rx_available(&self) -> usize {
        self.device.rx_queue.size() * WORD_BYTES + self.entry.rx_staged_bytes()
    }
}

// =============================================================================
// Public Receive API
// =============================================================================

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    /// Move up to `max_bytes` from the port's RX device FIFO into the RX
    /// word queue.
    ///
    /// Stops without error when the FIFO empties or the queue fills. Bytes
    /// that do not complete a word stay in the descriptor's assembly word.
    ///
    /// Returns the number of bytes taken from the FIFO.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Serial mode
    pub fn receive_from_device_fifo(&mut self, descriptor: Descriptor, max_bytes: usize) -> Result<usize> {
        self.resolve(descriptor, PortMode::Serial)?.receive(max_bytes)
    }

    /// Read received bytes into `buffer`.
    ///
    /// An empty `buffer` is a no-op returning `Ok(0)`.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Serial mode
    /// - `RxEmpty` - nothing was available for a non-empty `buffer`
    pub fn read(&mut self, descriptor: Descriptor, buffer: &mut [u8]) -> TransferResult {
        self.resolve(descriptor, PortMode::Serial)?.read(buffer)
    }

    /// Read exactly four received bytes as a little-endian word.
    ///
    /// Nothing is consumed unless four bytes are available.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve or its RX queue is
    ///   not initialized
    /// - `NotConfigured` - descriptor is not in Serial mode
    /// - `RxEmpty` - fewer than four bytes are available
    pub fn read_u32(&mut self, descriptor: Descriptor) -> Result<u32> {
        let mut port = self.resolve(descriptor, PortMode::Serial)?;
        if !port.device.rx_queue.is_initialized() {
            return Err(ConfigError::NotInitialized.into());
        }
        if port.rx_available() < WORD_BYTES {
            return Err(IoError::RxEmpty.into());
        }

        let mut bytes = [0u8; WORD_BYTES];
        port.read(&mut bytes).map_err(|err| err.error)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Complete RX words waiting to be read (0 if the descriptor does not
    /// resolve)
    pub fn pending_rx(&self, descriptor: Descriptor) -> usize {
        self.lookup(descriptor)
            .map_or(0, |(_, device)| device.rx_queue.size())
    }

    /// Received bytes available to [`read`](Self::read), including partial
    /// words (0 if the descriptor does not resolve)
    pub fn available_rx_bytes(&self, descriptor: Descriptor) -> usize {
        self.lookup(descriptor).map_or(0, |(entry, device)| {
            device.rx_queue.size() * WORD_BYTES + entry.rx_staged_bytes()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
