//! Core serial staging driver.
//!
//! This module contains the main [`SerialDriver`] structure and the
//! descriptor lifecycle:
//!
//! - Common init (destructive reset of every port)
//! - Port init (descriptor allocation, register mapping, queue setup)
//! - Descriptor resolution and device lookup
//! - Register mapper replacement
//!
//! The data paths extend [`SerialDriver`] from sibling modules:
//! [`tx`](super::tx), [`rx`](super::rx), [`poll`](super::poll) and
//! [`control`](super::control).

#[cfg(feature = "log")]
use log::{debug, warn};

use super::config::PortMode;
use super::descriptor::{Descriptor, DescriptorEntry};
use super::device::UartDevice;
use super::error::{ConfigError, ConfigResult};
use crate::hal::mapper::RegisterMapper;
use crate::internal::constants::{
    DEVICE_FIFO_CAPACITY, PORT_COUNT, SMALL_DEVICE_FIFO_CAPACITY, SMALL_PORT_COUNT,
    SMALL_WORD_QUEUE_CAPACITY, WORD_QUEUE_CAPACITY,
};
use crate::queue::FifoPair;

// =============================================================================
// Port Context
// =============================================================================

/// Disjoint borrows of everything one descriptor operation touches.
pub(crate) struct PortContext<'a, R, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> {
    pub(crate) entry: &'a mut DescriptorEntry,
    pub(crate) device: &'a mut UartDevice<R, QUEUE_WORDS>,
    pub(crate) fifos: &'a mut FifoPair<FIFO_BYTES>,
}

// =============================================================================
// Serial Driver
// =============================================================================

/// Poll-driven UART descriptor staging engine
///
/// Owns the device table, the descriptor table, the per-port device FIFO
/// pairs and the register mapper. Every operation takes the driver by
/// reference; there is no global state, so independent instances can run
/// side by side.
///
/// # Type Parameters
/// * `M` - Register mapper binding ports to register blocks
/// * `PORTS` - Number of physical ports, and descriptor slots
/// * `QUEUE_WORDS` - Capacity of each TX/RX word queue
/// * `FIFO_BYTES` - Capacity of each device FIFO
///
/// # Example
/// ```ignore
/// static mut SERIAL: SerialDriverDefault = SerialDriver::new(DefaultMapper);
///
/// let serial = unsafe { &mut SERIAL };
/// serial.common_init();
/// let d = serial.port_init(0, PortMode::Serial);
/// serial.write(d, b"hello")?;
/// serial.poll(d, 64, 64)?;
/// ```
///
/// # Module Organization
///
/// - Lifecycle and lookup (this module)
/// - [`tx`](super::tx): write path and transmit drain
/// - [`rx`](super::rx): receive drain and read path
/// - [`poll`](super::poll): combined TX-then-RX servicing
/// - [`control`](super::control): modem control line operations
pub struct SerialDriver<
    M: RegisterMapper,
    const PORTS: usize,
    const QUEUE_WORDS: usize,
    const FIFO_BYTES: usize,
> {
    /// Port-to-register binding hook
    mapper: M,
    /// Device table, indexed by port
    devices: [UartDevice<M::Regs, QUEUE_WORDS>; PORTS],
    /// Descriptor table, indexed by descriptor slot
    descriptors: [Option<DescriptorEntry>; PORTS],
    /// Device FIFO pairs, indexed by port
    fifos: [FifoPair<FIFO_BYTES>; PORTS],
    /// Set by common init
    initialized: bool,
}

impl<M: RegisterMapper, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
{
    /// Create a driver around `mapper`
    ///
    /// This is a const function suitable for static initialization.
    /// The driver must be [`common_init`](Self::common_init)ed before use.
    pub const fn new(mapper: M) -> Self {
        Self {
            mapper,
            devices: [const { UartDevice::new() }; PORTS],
            descriptors: [const { None }; PORTS],
            fifos: [const { FifoPair::new() }; PORTS],
            initialized: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Reset every device, descriptor and device FIFO.
    ///
    /// Devices return to unconfigured Discrete mode, all descriptors are
    /// released and all FIFOs are emptied. Register bindings made by earlier
    /// port inits are kept. Calling this again wipes all port state.
    pub fn common_init(&mut self) {
        for (port, device) in self.devices.iter_mut().enumerate() {
            device.reset(port);
        }
        self.descriptors = [const { None }; PORTS];
        for fifos in &mut self.fifos {
            fifos.reset();
        }
        self.initialized = true;

        #[cfg(feature = "log")]
        debug!("serial: common init, {PORTS} ports");
    }

    /// Check if [`common_init`](Self::common_init) has run
    #[inline(always)]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of physical ports
    #[inline(always)]
    pub const fn port_count(&self) -> usize {
        PORTS
    }

    /// Open `port` in `mode`, reporting why it failed.
    ///
    /// If the port is already bound to a live descriptor, that descriptor is
    /// returned unchanged and `mode` is ignored. Otherwise the mapper binds
    /// the port's registers, the first free descriptor slot is claimed with
    /// all staging cleared, and for `Serial` mode both word queues are
    /// (re)initialized.
    ///
    /// # Errors
    /// - `NotInitialized` - common init has not run
    /// - `InvalidArgument` - `port` is out of range
    /// - `MappingFailed` - the mapper failed or left the registers unbound
    /// - `NoFreeDescriptor` - every descriptor slot is in use
    pub fn try_port_init(&mut self, port: usize, mode: PortMode) -> ConfigResult<Descriptor> {
        if !self.initialized {
            return Err(ConfigError::NotInitialized);
        }
        if port >= PORTS {
            return Err(ConfigError::InvalidArgument);
        }

        if let Some(existing) = self.descriptor_for_port(port) {
            #[cfg(feature = "log")]
            {
                let current = self.devices[port].mode;
                if current != mode {
                    warn!("serial: port {port} already open as {current}, ignoring {mode}");
                }
            }
            return Ok(existing);
        }

        let device = &mut self.devices[port];
        if let Err(err) = self.mapper.map(port, &mut device.binding) {
            #[cfg(feature = "log")]
            warn!("serial: mapping port {port} failed: {err}");
            return Err(match err {
                ConfigError::InvalidArgument => ConfigError::InvalidArgument,
                _ => ConfigError::MappingFailed,
            });
        }
        if !device.binding.is_mapped() {
            #[cfg(feature = "log")]
            warn!("serial: mapper left port {port} without registers");
            return Err(ConfigError::MappingFailed);
        }

        let Some(slot) = self.descriptors.iter().position(Option::is_none) else {
            #[cfg(feature = "log")]
            warn!("serial: no free descriptor for port {port}");
            return Err(ConfigError::NoFreeDescriptor);
        };

        self.descriptors[slot] = Some(DescriptorEntry::new(port, mode));
        device.configure(mode);
        let descriptor = Descriptor::from_index(slot);

        #[cfg(feature = "log")]
        {
            let name = device.binding.name.unwrap_or("?");
            debug!("serial: port {port} ({name}) open as {descriptor} in {mode} mode");
        }

        Ok(descriptor)
    }

    /// Open `port` in `mode`, returning [`Descriptor::INVALID`] on failure.
    ///
    /// See [`try_port_init`](Self::try_port_init) for the failure reasons.
    pub fn port_init(&mut self, port: usize, mode: PortMode) -> Descriptor {
        self.try_port_init(port, mode).unwrap_or(Descriptor::INVALID)
    }

    /// Live descriptor bound to `port`, if any
    pub fn descriptor_for_port(&self, port: usize) -> Option<Descriptor> {
        self.descriptors
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|entry| entry.port == port))
            .map(Descriptor::from_index)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Live entry for `descriptor`
    fn entry(&self, descriptor: Descriptor) -> ConfigResult<&DescriptorEntry> {
        if !self.initialized {
            return Err(ConfigError::NotInitialized);
        }
        descriptor
            .index()
            .and_then(|index| self.descriptors.get(index))
            .and_then(Option::as_ref)
            .ok_or(ConfigError::NotInitialized)
    }

    /// Live entry and device for `descriptor`, in any mode
    pub(super) fn lookup(
        &self,
        descriptor: Descriptor,
    ) -> ConfigResult<(&DescriptorEntry, &UartDevice<M::Regs, QUEUE_WORDS>)> {
        let entry = self.entry(descriptor)?;
        let device = self.devices.get(entry.port).ok_or(ConfigError::NotInitialized)?;
        Ok((entry, device))
    }

    /// Resolve `descriptor` to its entry, device and FIFOs, requiring `mode`.
    ///
    /// # Errors
    /// - `NotInitialized` - common init has not run or the descriptor is not live
    /// - `NotConfigured` - the descriptor was opened in another mode
    pub(crate) fn resolve(
        &mut self,
        descriptor: Descriptor,
        mode: PortMode,
    ) -> ConfigResult<PortContext<'_, M::Regs, QUEUE_WORDS, FIFO_BYTES>> {
        let entry = self.entry(descriptor)?;
        if entry.mode != mode {
            return Err(ConfigError::NotConfigured);
        }
        let port = entry.port;

        let index = descriptor.index().ok_or(ConfigError::NotInitialized)?;
        let entry = self.descriptors[index]
            .as_mut()
            .ok_or(ConfigError::NotInitialized)?;
        let device = self.devices.get_mut(port).ok_or(ConfigError::NotInitialized)?;
        let fifos = self.fifos.get_mut(port).ok_or(ConfigError::NotInitialized)?;

        Ok(PortContext {
            entry,
            device,
            fifos,
        })
    }

    /// Device bound to `descriptor`
    ///
    /// # Errors
    /// - `NotInitialized` - common init has not run or the descriptor is not live
    pub fn get_uart_device(
        &self,
        descriptor: Descriptor,
    ) -> ConfigResult<&UartDevice<M::Regs, QUEUE_WORDS>> {
        let port = self.entry(descriptor)?.port;
        self.devices.get(port).ok_or(ConfigError::NotInitialized)
    }

    /// Mode `descriptor` was opened with
    ///
    /// # Errors
    /// - `NotInitialized` - common init has not run or the descriptor is not live
    pub fn port_mode(&self, descriptor: Descriptor) -> ConfigResult<PortMode> {
        self.entry(descriptor).map(|entry| entry.mode)
    }

    // =========================================================================
    // Device FIFO Side
    // =========================================================================

    /// TX/RX device FIFOs of `port`
    pub fn device_fifos(&self, port: usize) -> Option<&FifoPair<FIFO_BYTES>> {
        self.fifos.get(port)
    }

    /// Mutable TX/RX device FIFOs of `port`, for the hardware side of the model
    pub fn device_fifos_mut(&mut self, port: usize) -> Option<&mut FifoPair<FIFO_BYTES>> {
        self.fifos.get_mut(port)
    }

    // =========================================================================
    // Register Mapper
    // =========================================================================

    /// Current register mapper
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Install `mapper`, returning the previous one.
    ///
    /// Affects ports mapped after this call only.
    pub fn replace_mapper(&mut self, mapper: M) -> M {
        core::mem::replace(&mut self.mapper, mapper)
    }
}

impl<M, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize>
    SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
where
    M: RegisterMapper + Default,
{
    /// Restore the default mapper, returning the one in use
    pub fn reset_mapper(&mut self) -> M {
        self.replace_mapper(M::default())
    }
}

impl<M, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> Default
    for SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
where
    M: RegisterMapper + Default,
{
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M, const PORTS: usize, const QUEUE_WORDS: usize, const FIFO_BYTES: usize> core::fmt::Debug
    for SerialDriver<M, PORTS, QUEUE_WORDS, FIFO_BYTES>
where
    M: RegisterMapper,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerialDriver")
            .field("ports", &PORTS)
            .field("initialized", &self.initialized)
            .field(
                "open",
                &self.descriptors.iter().filter(|slot| slot.is_some()).count(),
            )
            .finish()
    }
}

// =============================================================================
// Type Aliases
// =============================================================================

/// Reference sizing: 8 ports, 300-word queues, 255-byte device FIFOs
pub type SerialDriverDefault =
    SerialDriver<crate::hal::DefaultMapper, PORT_COUNT, WORD_QUEUE_CAPACITY, DEVICE_FIFO_CAPACITY>;

/// Small sizing for memory-constrained systems: 2 ports, 16-word queues,
/// 16-byte device FIFOs
pub type SerialDriverSmall = SerialDriver<
    crate::hal::DefaultMapper,
    SMALL_PORT_COUNT,
    SMALL_WORD_QUEUE_CAPACITY,
    SMALL_DEVICE_FIFO_CAPACITY,
>;

// =============================================================================
// Unit Tests
// =============================================================================
