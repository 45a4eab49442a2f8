//! Control-line operations
//!
//! Single-bit read-modify-write on a port's Modem Control Register. These sit
//! beside the staging engine rather than inside it: they never touch the
//! word queues or FIFOs.

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

#[cfg(feature = "log")]
use log::debug;

use super::config::PortMode;
use super::descriptor::Descriptor;
use super::error::{ConfigError, Error, Result};
use super::serial::SerialDriver;
use crate::hal::mapper::RegisterMapper;
use crate::register::{RegisterAccess, mcr, offsets};

/// Generate enable/disable/query methods for one MCR bit.
macro_rules! control_bit_ops {
    ($enable_fn:ident, $disable_fn:ident, $query_fn:ident, $mode:expr, $bit:expr, $what:expr) => {
        #[doc = concat!("Enable ", $what, ".")]
        ///
        /// # Errors
        /// - `NotInitialized` - descriptor does not resolve
        /// - `NotConfigured` - descriptor is in the wrong mode
        pub fn $enable_fn(&mut self, descriptor: Descriptor) -> Result<()> {
            self.set_control_bit(descriptor, $mode, $bit, true)
        }

        #[doc = concat!("Disable ", $what, ".")]
        ///
        /// # Errors
        /// - `NotInitialized` - descriptor does not resolve
        /// - `NotConfigured` - descriptor is in the wrong mode
        pub fn $disable_fn(&mut self, descriptor: Descriptor) -> Result<()> {
            self.set_control_bit(descriptor, $mode, $bit, false)
        }

        #[doc = concat!("Check if ", $what, " is enabled")]
        ///
        /// # Errors
        /// Same as the enable/disable pair.
        pub fn $query_fn(&self, descriptor: Descriptor) -> Result<bool> {
            self.control_bit(descriptor, $mode, $bit)
        }
    };
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    control_bit_ops!(
        enable_loopback,
        disable_loopback,
        is_loopback_enabled,
        PortMode::Serial,
        mcr::LOOPBACK,
        "internal loopback"
    );

    control_bit_ops!(
        enable_discrete,
        disable_discrete,
        is_discrete_enabled,
        PortMode::Discrete,
        mcr::DISCRETE_LINE,
        "the discrete output line"
    );

    /// Set or clear `bit` in the MCR of the port behind `descriptor`
    fn set_control_bit(&mut self, descriptor: Descriptor, mode: PortMode, bit: u8, enable: bool) -> Result<()> {
        let port = self.resolve(descriptor, mode)?;
        let regs = port
            .device
            .binding
            .registers
            .as_mut()
            .ok_or(ConfigError::MappingFailed)?;

        if enable {
            regs.set_bits(offsets::MCR, bit);
        } else {
            regs.clear_bits(offsets::MCR, bit);
        }

        #[cfg(feature = "log")]
        {
            let index = port.device.port;
            let action = if enable { "set" } else { "cleared" };
            debug!("MCR port {index}: {bit:#04x} {action}");
        }
        Ok(())
    }

    fn control_bit(&self, descriptor: Descriptor, mode: PortMode, bit: u8) -> Result<bool> {
        let (entry, device) = self.lookup(descriptor)?;
        if entry.mode != mode {
            return Err(ConfigError::NotConfigured.into());
        }
        let regs = device.registers().ok_or(ConfigError::MappingFailed)?;
        Ok(regs.bits_set(offsets::MCR, bit))
    }

    /// Borrow the discrete line of a Discrete-mode descriptor as an
    /// `embedded-hal` output pin.
    ///
    /// # Errors
    /// - `NotInitialized` - descriptor does not resolve
    /// - `NotConfigured` - descriptor is not in Discrete mode
    pub fn discrete_line(&mut self, descriptor: Descriptor) -> Result<DiscreteLine<'_, M, PORTS, QUEUE_WORDS, FIFO_BYTES>> {
        self.resolve(descriptor, PortMode::Discrete)?;
        Ok(DiscreteLine {
            driver: self,
            descriptor,
        })
    }
}

// =============================================================================
// embedded-hal Output Pin
// =============================================================================

/// Discrete control line of one port, driven through the MCR.
///
/// High means the line bit is set.
pub struct DiscreteLine<'a, M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> {
    driver: &'a mut SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>,
    descriptor: Descriptor,
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    DiscreteLine<'_, M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    /// Descriptor this line belongs to
    pub const fn descriptor(&self) -> Descriptor {
        self.descriptor
    }
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> ErrorType
    for DiscreteLine<'_, M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    type Error = Error;
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> OutputPin
    for DiscreteLine<'_, M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    fn set_low(&mut self) -> Result<()> {
        self.driver.disable_discrete(self.descriptor)
    }

    fn set_high(&mut self) -> Result<()> {
        self.driver.enable_discrete(self.descriptor)
    }
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> StatefulOutputPin
    for DiscreteLine<'_, M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    fn is_set_high(&mut self) -> Result<bool> {
        self.driver.is_discrete_enabled(self.descriptor)
    }

    fn is_set_low(&mut self) -> Result<bool> {
        self.is_set_high().map(|high| !high)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
