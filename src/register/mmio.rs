//! Memory-mapped register block.

use core::ptr::NonNull;

use super::RegisterAccess;
use super::offsets::REGISTER_COUNT;

/// Volatile access to a UART channel mapped at a fixed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioRegisters {
    base: NonNull<u8>,
}

impl MmioRegisters {
    /// Bind to the register block at `base`.
    ///
    /// Returns `None` for a null base address.
    ///
    /// # Safety
    /// `base` must point to a UART register block of at least
    /// [`REGISTER_COUNT`] bytes that stays mapped for the lifetime of the
    /// returned value, and no other code may rely on exclusive access to it.
    #[must_use]
    pub unsafe fn new(base: usize) -> Option<Self> {
        NonNull::new(base as *mut u8).map(|base| Self { base })
    }

    /// Base address of the register block
    #[must_use]
    pub fn base_address(&self) -> usize {
        self.base.as_ptr() as usize
    }
}

impl RegisterAccess for MmioRegisters {
    #[inline(always)]
    fn read(&self, offset: usize) -> u8 {
        if offset >= REGISTER_COUNT {
            return 0;
        }
        // SAFETY: `new` guarantees the block is mapped and offset is in range
        unsafe { core::ptr::read_volatile(self.base.as_ptr().add(offset)) }
    }

    #[inline(always)]
    fn write(&mut self, offset: usize, value: u8) {
        if offset >= REGISTER_COUNT {
            return;
        }
        // SAFETY: `new` guarantees the block is mapped and offset is in range
        unsafe { core::ptr::write_volatile(self.base.as_ptr().add(offset), value) }
    }
}

// SAFETY: the pointer names a fixed hardware block, not thread-local memory.
unsafe impl Send for MmioRegisters {}
