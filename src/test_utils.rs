//! Testing utilities and mock implementations
//!
//! This module provides a mock register mapper and driver constructors for
//! testing the staging engine on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::vec::Vec;

use crate::driver::config::PortMode;
use crate::driver::descriptor::Descriptor;
use crate::driver::error::{ConfigError, ConfigResult};
use crate::driver::serial::SerialDriver;
use crate::hal::mapper::{DeviceBinding, RegisterMapper};
use crate::register::ShadowRegisters;

// =============================================================================
// Mock Register Mapper
// =============================================================================

/// Mock register mapper for exercising port initialization paths
///
/// Records every port it is asked to map and can be told to fail a port
/// outright or to report success without binding any registers.
///
/// # Example
///
/// ```ignore
/// let mut mapper = MockMapper::new();
/// mapper.fail_port(1);
/// let mut driver = TestDriver::new(mapper);
/// driver.common_init();
/// assert!(!driver.port_init(1, PortMode::Serial).is_valid());
/// ```
#[derive(Debug, Default)]
pub struct MockMapper {
    /// Ports passed to `map`, in call order
    calls: Vec<usize>,
    /// Port whose mapping returns an error
    failing_port: Option<usize>,
    /// Port whose mapping returns `Ok` but leaves registers unbound
    unbound_port: Option<usize>,
    /// Initial register contents handed out on a successful map
    preset: [u8; 8],
}

impl MockMapper {
    /// Create a mapper that binds every port
    pub fn new() -> Self {
        Self::default()
    }

    /// Make mapping `port` fail with `MappingFailed`
    pub fn fail_port(&mut self, port: usize) {
        self.failing_port = Some(port);
    }

    /// Make mapping `port` succeed without binding registers
    pub fn leave_unbound(&mut self, port: usize) {
        self.unbound_port = Some(port);
    }

    /// Preset register contents for newly bound ports
    pub fn with_preset(mut self, preset: [u8; 8]) -> Self {
        self.preset = preset;
        self
    }

    /// Ports mapped so far
    pub fn calls(&self) -> &[usize] {
        &self.calls
    }
}

impl RegisterMapper for MockMapper {
    type Regs = ShadowRegisters;

    fn map(&mut self, port: usize, binding: &mut DeviceBinding<ShadowRegisters>) -> ConfigResult<()> {
        self.calls.push(port);
        if self.failing_port == Some(port) {
            return Err(ConfigError::MappingFailed);
        }
        if self.unbound_port == Some(port) {
            return Ok(());
        }
        if binding.registers.is_none() {
            binding.registers = Some(ShadowRegisters::with_values(self.preset));
        }
        binding.name = Some("mock");
        binding.base_address = 0x1000 + port;
        Ok(())
    }
}

// =============================================================================
// Driver Constructors
// =============================================================================

/// Small driver over the mock mapper: 4 ports, 8-word queues, 16-byte FIFOs
pub type TestDriver = SerialDriver<MockMapper, 4, 8, 16>;

/// Driver with the reference queue sizing over the mock mapper
pub type ReferenceDriver = SerialDriver<MockMapper, 8, 300, 255>;

/// Common-initialized small driver
pub fn test_driver() -> TestDriver {
    let mut driver = TestDriver::new(MockMapper::new());
    driver.common_init();
    driver
}

/// Common-initialized small driver with `port` opened in `mode`
pub fn driver_with_port(port: usize, mode: PortMode) -> (TestDriver, Descriptor) {
    let mut driver = test_driver();
    let descriptor = driver.port_init(port, mode);
    assert!(descriptor.is_valid(), "port {port} failed to open");
    (driver, descriptor)
}

/// Common-initialized reference-sized driver with port 0 open in serial mode
pub fn reference_serial() -> (std::boxed::Box<ReferenceDriver>, Descriptor) {
    let mut driver = std::boxed::Box::new(ReferenceDriver::new(MockMapper::new()));
    driver.common_init();
    let descriptor = driver.port_init(0, PortMode::Serial);
    assert!(descriptor.is_valid());
    (driver, descriptor)
}
