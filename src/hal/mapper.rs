//! Register mapping HAL
//!
//! Binds a logical port index to the register block of a UART channel. The
//! driver calls the mapper lazily, the first time a descriptor is allocated
//! for a port, and treats a binding whose registers are still absent after
//! the call as a failure.

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{DEFAULT_DEVICE_NAMES, DEFAULT_REGISTER_STRIDE};
use crate::register::{MmioRegisters, RegisterAccess, ShadowRegisters};

// =============================================================================
// Device Binding
// =============================================================================

/// Hardware binding of one port, populated by a [`RegisterMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceBinding<R> {
    /// Register block of the channel; `None` until mapped
    pub registers: Option<R>,
    /// Display name of the channel
    pub name: Option<&'static str>,
    /// Base address of the register block (0 if unknown)
    pub base_address: usize,
}

impl<R> DeviceBinding<R> {
    /// An unmapped binding
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registers: None,
            name: None,
            base_address: 0,
        }
    }

    /// Check if a register block is bound
    #[inline(always)]
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        self.registers.is_some()
    }
}

impl<R> Default for DeviceBinding<R> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Mapper Trait
// =============================================================================

/// Trait for port-to-register-block mapping.
///
/// This trait can be implemented by different backends, allowing the same
/// engine to run on memory-mapped hardware, in-memory register files, or
/// test doubles.
pub trait RegisterMapper {
    /// Register block type produced by this mapper
    type Regs: RegisterAccess;

    /// Populate `binding.registers` for `port`.
    ///
    /// May also set `binding.name` and `binding.base_address`. Returning
    /// `Ok(())` with `binding.registers` still `None` is a mapping failure.
    fn map(&mut self, port: usize, binding: &mut DeviceBinding<Self::Regs>) -> ConfigResult<()>;
}

// =============================================================================
// Default Mapper
// =============================================================================

/// Mapper binding each port to an in-memory [`ShadowRegisters`] block.
///
/// A binding that already holds registers keeps them; a missing name is
/// filled from the built-in `uart0`..`uart7` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultMapper;

impl RegisterMapper for DefaultMapper {
    type Regs = ShadowRegisters;

    fn map(&mut self, port: usize, binding: &mut DeviceBinding<ShadowRegisters>) -> ConfigResult<()> {
        let name = DEFAULT_DEVICE_NAMES
            .get(port)
            .copied()
            .ok_or(ConfigError::InvalidArgument)?;

        if binding.registers.is_none() {
            binding.registers = Some(ShadowRegisters::new());
            binding.base_address = port * DEFAULT_REGISTER_STRIDE;
        }
        if binding.name.is_none() {
            binding.name = Some(name);
        }
        Ok(())
    }
}

// =============================================================================
// MMIO Mapper
// =============================================================================

/// Mapper binding each port to a memory-mapped register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioMapper<const PORTS: usize> {
    base_addresses: [usize; PORTS],
}

impl<const PORTS: usize> MmioMapper<PORTS> {
    /// Create a mapper from a per-port base address table.
    ///
    /// A zero entry marks a port without hardware; mapping it fails.
    ///
    /// # Safety
    /// Every non-zero address must satisfy the contract of
    /// [`MmioRegisters::new`].
    #[must_use]
    pub const unsafe fn new(base_addresses: [usize; PORTS]) -> Self {
        Self { base_addresses }
    }

    /// Base address configured for `port`, if any
    #[must_use]
    pub fn base_address(&self, port: usize) -> Option<usize> {
        self.base_addresses.get(port).copied().filter(|&addr| addr != 0)
    }
}

impl<const PORTS: usize> RegisterMapper for MmioMapper<PORTS> {
    type Regs = MmioRegisters;

    fn map(&mut self, port: usize, binding: &mut DeviceBinding<MmioRegisters>) -> ConfigResult<()> {
        let base = self.base_address(port).ok_or(ConfigError::MappingFailed)?;
        // SAFETY: guaranteed by the contract of `MmioMapper::new`
        let regs = unsafe { MmioRegisters::new(base) }.ok_or(ConfigError::MappingFailed)?;

        binding.registers = Some(regs);
        binding.base_address = base;
        if binding.name.is_none() {
            binding.name = DEFAULT_DEVICE_NAMES.get(port).copied();
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
