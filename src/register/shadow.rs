//! In-memory register file.

use super::RegisterAccess;
use super::offsets::REGISTER_COUNT;

/// Register block backed by plain memory.
///
/// Bound by the default mapper when no hardware address is known, and used
/// on the host to observe exactly which control bits the driver touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShadowRegisters {
    regs: [u8; REGISTER_COUNT],
}

impl ShadowRegisters {
    /// Create a register file with every register cleared
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Create a register file with preset contents
    #[must_use]
    pub const fn with_values(regs: [u8; REGISTER_COUNT]) -> Self {
        Self { regs }
    }

    /// Snapshot of all registers
    #[must_use]
    pub const fn values(&self) -> [u8; REGISTER_COUNT] {
        self.regs
    }
}

impl RegisterAccess for ShadowRegisters {
    #[inline]
    fn read(&self, offset: usize) -> u8 {
        self.regs.get(offset).copied().unwrap_or(0)
    }

    #[inline]
    fn write(&mut self, offset: usize, value: u8) {
        if let Some(reg) = self.regs.get_mut(offset) {
            *reg = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::offsets;

    #[test]
    fn new_file_reads_zero() {
        let regs = ShadowRegisters::new();
        assert_eq!(regs.values(), [0; REGISTER_COUNT]);
    }

    #[test]
    fn write_then_read() {
        let mut regs = ShadowRegisters::new();
        regs.write(offsets::SCRATCH, 0x5A);
        assert_eq!(regs.read(offsets::SCRATCH), 0x5A);
        assert_eq!(regs.read(offsets::DATA), 0);
    }

    #[test]
    fn out_of_range_offsets_are_inert() {
        let mut regs = ShadowRegisters::with_values([1, 2, 3, 4, 5, 6, 7, 8]);
        regs.write(REGISTER_COUNT, 0xFF);
        assert_eq!(regs.read(REGISTER_COUNT), 0);
        assert_eq!(regs.values(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
