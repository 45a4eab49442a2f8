//! End-to-end scenarios against the public API.

use ph_serial_stage::constants::{DEFAULT_REGISTER_STRIDE, WORD_QUEUE_CAPACITY};
use ph_serial_stage::register::{mcr, offsets};
use ph_serial_stage::{
    ConfigError, Descriptor, Error, IoError, PortMode, RegisterAccess, SerialDriverDefault,
    SerialDriverSmall,
};

fn boxed_default() -> Box<SerialDriverDefault> {
    let mut driver = Box::<SerialDriverDefault>::default();
    driver.common_init();
    driver
}

// =============================================================================
// Port Lifecycle
// =============================================================================

#[test]
fn default_mapper_names_and_places_ports() {
    let mut driver = boxed_default();
    let d = driver.port_init(3, PortMode::Serial);

    let device = driver.get_uart_device(d).unwrap();
    assert_eq!(device.port(), 3);
    assert_eq!(device.name(), Some("uart3"));
    assert_eq!(device.base_address(), 3 * DEFAULT_REGISTER_STRIDE);
    assert_eq!(device.tx_queue().capacity(), WORD_QUEUE_CAPACITY);
}

#[test]
fn reinit_returns_same_descriptor_and_keeps_mode() {
    let mut driver = SerialDriverSmall::default();
    driver.common_init();

    let first = driver.port_init(1, PortMode::Serial);
    let second = driver.port_init(1, PortMode::Discrete);
    assert_eq!(first, second);
    assert_eq!(driver.port_mode(second), Ok(PortMode::Serial));
}

#[test]
fn port_init_before_common_init_fails() {
    let mut driver = SerialDriverSmall::default();
    assert_eq!(
        driver.try_port_init(0, PortMode::Serial),
        Err(ConfigError::NotInitialized)
    );
    assert_eq!(driver.port_init(0, PortMode::Serial), Descriptor::INVALID);
}

#[test]
fn common_init_invalidates_descriptors() {
    let mut driver = SerialDriverSmall::default();
    driver.common_init();
    let d = driver.port_init(0, PortMode::Serial);
    driver.write(d, &[1, 2, 3, 4]).unwrap();

    driver.common_init();
    assert_eq!(
        driver.write_u32(d, 7),
        Err(Error::Config(ConfigError::NotInitialized))
    );
    assert_eq!(driver.pending_tx(d), 0);

    let reopened = driver.port_init(0, PortMode::Serial);
    assert_eq!(driver.pending_tx(reopened), 0);
}

// =============================================================================
// Data Path
// =============================================================================

#[test]
fn full_queue_then_drain_reports_capacity_edges() {
    let mut driver = boxed_default();
    let d = driver.port_init(0, PortMode::Serial);

    for value in 0..WORD_QUEUE_CAPACITY as u32 {
        driver.write_u32(d, value).unwrap();
    }
    assert_eq!(driver.write_u32(d, 300), Err(Error::Io(IoError::TxFull)));
    assert_eq!(driver.pending_tx(d), WORD_QUEUE_CAPACITY);

    for value in 0..WORD_QUEUE_CAPACITY as u32 {
        assert_eq!(driver.read_next_tx_u32(d), Ok(value));
    }
    assert_eq!(driver.read_next_tx_u32(d), Err(Error::Io(IoError::TxEmpty)));
}

#[test]
fn ports_do_not_share_state() {
    let mut driver = SerialDriverSmall::default();
    driver.common_init();
    let a = driver.port_init(0, PortMode::Serial);
    let b = driver.port_init(1, PortMode::Serial);

    driver.write(a, b"abcd").unwrap();
    driver.transmit_to_device_fifo(a, 16).unwrap();
    driver.transmit_to_device_fifo(b, 16).unwrap();

    assert_eq!(driver.device_fifos(0).unwrap().tx.len(), 4);
    assert!(driver.device_fifos(1).unwrap().tx.is_empty());
    assert_eq!(driver.pending_tx(b), 0);
}

#[test]
fn loopback_round_trip_through_poll() {
    let mut driver = SerialDriverSmall::default();
    driver.common_init();
    let d = driver.port_init(0, PortMode::Serial);
    driver.enable_loopback(d).unwrap();

    driver.write(d, b"hello, uart").unwrap();
    let mut received = Vec::new();
    let mut buf = [0u8; 5];
    for _ in 0..16 {
        driver.poll(d, 4, 8).unwrap();
        driver.device_fifos_mut(0).unwrap().loopback(usize::MAX);
        if let Ok(n) = driver.read(d, &mut buf) {
            received.extend_from_slice(&buf[..n]);
        }
    }
    assert_eq!(received, b"hello, uart");
}

// =============================================================================
// Discrete Ports
// =============================================================================

#[test]
fn discrete_port_rejects_data_path_and_toggles_one_bit() {
    let mut driver = SerialDriverSmall::default();
    driver.common_init();
    let d = driver.port_init(1, PortMode::Discrete);
    let not_configured = Error::Config(ConfigError::NotConfigured);

    assert_eq!(driver.write_u32(d, 1), Err(not_configured));
    assert_eq!(driver.read_u32(d), Err(not_configured));
    assert_eq!(driver.transmit_to_device_fifo(d, 4), Err(not_configured));
    assert_eq!(driver.poll(d, 4, 4), Err(not_configured));

    let before = driver.get_uart_device(d).unwrap().registers().unwrap().read(offsets::MCR);
    driver.enable_discrete(d).unwrap();
    let during = driver.get_uart_device(d).unwrap().registers().unwrap().read(offsets::MCR);
    driver.disable_discrete(d).unwrap();
    let after = driver.get_uart_device(d).unwrap().registers().unwrap().read(offsets::MCR);

    assert_eq!(before ^ during, mcr::DISCRETE_LINE);
    assert_eq!(after, before);
}
