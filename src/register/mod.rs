//! 16550-compatible UART register access
//!
//! The engine touches exactly one register, the Modem Control Register, and
//! only through read-modify-write of single bits. Access is abstracted by
//! [`RegisterAccess`] so the same driver runs against real memory-mapped
//! hardware ([`MmioRegisters`]) or an in-memory register file
//! ([`ShadowRegisters`]).

mod mmio;
mod shadow;

pub use mmio::MmioRegisters;
pub use shadow::ShadowRegisters;

/// Register offsets from the channel base address (byte stride)
pub mod offsets {
    /// Receive buffer / transmit holding register
    pub const DATA: usize = 0;
    /// Interrupt enable register
    pub const IER: usize = 1;
    /// Interrupt status (read) / FIFO control (write)
    pub const ISR_FCR: usize = 2;
    /// Line control register
    pub const LCR: usize = 3;
    /// Modem control register
    pub const MCR: usize = 4;
    /// Line status register
    pub const LSR: usize = 5;
    /// Modem status register
    pub const MSR: usize = 6;
    /// Scratch pad register
    pub const SCRATCH: usize = 7;

    /// Number of byte registers in one channel block
    pub const REGISTER_COUNT: usize = 8;
}

/// Modem Control Register bits
pub mod mcr {
    /// Data terminal ready (#DTR)
    pub const DTR: u8 = 1 << 0;
    /// Request to send (#RTS)
    pub const RTS: u8 = 1 << 1;
    /// User output 1 (#OP1)
    pub const OUT1: u8 = 1 << 2;
    /// User output 2 (#OP2)
    pub const OUT2: u8 = 1 << 3;
    /// Internal loopback mode
    pub const LOOPBACK: u8 = 1 << 4;

    /// Bit driven by the discrete-line operations
    pub const DISCRETE_LINE: u8 = RTS;
}

/// Byte-wide access to one UART channel's register block.
///
/// Offsets are taken from [`offsets`]; implementations may ignore (or read
/// as zero) offsets at or beyond [`offsets::REGISTER_COUNT`].
pub trait RegisterAccess {
    /// Read the register at `offset`
    fn read(&self, offset: usize) -> u8;

    /// Write `value` to the register at `offset`
    fn write(&mut self, offset: usize, value: u8);

    /// Read-modify-write the register at `offset`
    #[inline]
    fn modify<F>(&mut self, offset: usize, f: F)
    where
        F: FnOnce(u8) -> u8,
        Self: Sized,
    {
        let value = self.read(offset);
        self.write(offset, f(value));
    }

    /// Set `bits` at `offset`, leaving other bits untouched
    #[inline]
    fn set_bits(&mut self, offset: usize, bits: u8)
    where
        Self: Sized,
    {
        self.modify(offset, |v| v | bits);
    }

    /// Clear `bits` at `offset`, leaving other bits untouched
    #[inline]
    fn clear_bits(&mut self, offset: usize, bits: u8)
    where
        Self: Sized,
    {
        self.modify(offset, |v| v & !bits);
    }

    /// Check whether every bit in `bits` is set at `offset`
    #[inline]
    fn bits_set(&self, offset: usize, bits: u8) -> bool {
        self.read(offset) & bits == bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_fit_register_block() {
        for offset in [
            offsets::DATA,
            offsets::IER,
            offsets::ISR_FCR,
            offsets::LCR,
            offsets::MCR,
            offsets::LSR,
            offsets::MSR,
            offsets::SCRATCH,
        ] {
            assert!(offset < offsets::REGISTER_COUNT);
        }
    }

    #[test]
    fn mcr_bits_are_distinct() {
        let bits = [mcr::DTR, mcr::RTS, mcr::OUT1, mcr::OUT2, mcr::LOOPBACK];
        for (i, a) in bits.iter().enumerate() {
            assert_eq!(a.count_ones(), 1);
            for b in &bits[i + 1..] {
                assert_eq!(a & b, 0);
            }
        }
        assert_eq!(mcr::LOOPBACK, 0x10);
        assert_eq!(mcr::DISCRETE_LINE, 0x02);
    }

    #[test]
    fn provided_helpers_only_touch_requested_bits() {
        let mut regs = ShadowRegisters::new();
        regs.write(offsets::MCR, 0b1010_0101);

        regs.set_bits(offsets::MCR, mcr::RTS);
        assert_eq!(regs.read(offsets::MCR), 0b1010_0111);
        assert!(regs.bits_set(offsets::MCR, mcr::RTS));

        regs.clear_bits(offsets::MCR, mcr::RTS);
        assert_eq!(regs.read(offsets::MCR), 0b1010_0101);
        assert!(!regs.bits_set(offsets::MCR, mcr::RTS));

        regs.modify(offsets::LCR, |v| v ^ 0xFF);
        assert_eq!(regs.read(offsets::LCR), 0xFF);
    }
}
