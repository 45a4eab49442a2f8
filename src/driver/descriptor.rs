//! Descriptor handles and per-descriptor staging state

use super::config::PortMode;
use crate::internal::stage::StagedWord;

// =============================================================================
// Descriptor Handle
// =============================================================================

/// Opaque handle bound 1:1 to an initialized port.
///
/// Descriptors are 1-based indices into the descriptor table; the raw value
/// 0 is reserved as [`Descriptor::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Descriptor(u32);

impl Descriptor {
    /// Sentinel returned by [`port_init`](crate::SerialDriver::port_init) on failure
    pub const INVALID: Self = Self(0);

    /// Handle for descriptor table slot `index`
    #[inline(always)]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Raw handle value
    #[inline(always)]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check that this is not the invalid sentinel
    #[inline(always)]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Zero-based table slot, `None` for the invalid sentinel
    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self.0 {
            0 => None,
            raw => Some(raw as usize - 1),
        }
    }
}

impl From<u32> for Descriptor {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Descriptor> for u32 {
    fn from(descriptor: Descriptor) -> Self {
        descriptor.0
    }
}

impl core::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Descriptor Entry
// =============================================================================

/// Live descriptor table slot.
///
/// Free slots are `None` in the table, so a half-built entry can never be
/// mistaken for a live one. The four staging words persist across calls;
/// they are only reset when the slot is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DescriptorEntry {
    /// Physical port this descriptor is bound to
    pub(crate) port: usize,
    /// Mode the port was opened with
    pub(crate) mode: PortMode,
    /// Bytes from `write` not yet pushed to the TX word queue
    pub(crate) tx_input: StagedWord,
    /// Word popped from the TX word queue, draining into the TX FIFO
    pub(crate) tx_drain: StagedWord,
    /// Bytes pulled from the RX FIFO, assembling into a word
    pub(crate) rx_assembly: StagedWord,
    /// Word popped from the RX word queue, draining to `read`
    pub(crate) rx_output: StagedWord,
}

impl DescriptorEntry {
    /// Fresh entry with every staging word empty
    pub(crate) const fn new(port: usize, mode: PortMode) -> Self {
        Self {
            port,
            mode,
            tx_input: StagedWord::Empty,
            tx_drain: StagedWord::Empty,
            rx_assembly: StagedWord::Empty,
            rx_output: StagedWord::Empty,
        }
    }

    /// Check if any transmit-side bytes are still staged
    #[inline(always)]
    pub(crate) const fn tx_staged(&self) -> bool {
        !self.tx_input.is_empty() || !self.tx_drain.is_empty()
    }

    /// Receive-side bytes held outside the RX word queue
    #[inline(always)]
    pub(crate) const fn rx_staged_bytes(&self) -> usize {
        self.rx_assembly.len() + self.rx_output.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
