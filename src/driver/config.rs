//! Port configuration types

use super::error::ConfigError;

/// Usage mode of a port.
///
/// A port opened in [`Serial`](PortMode::Serial) mode gets its TX and RX word
/// queues initialized and accepts data-path operations. A port opened in
/// [`Discrete`](PortMode::Discrete) mode only exposes the discrete control
/// line; every data-path call on it returns `NotConfigured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PortMode {
    /// Byte-stream UART with word queues
    Serial = 0,
    /// Single control-line toggle, no data queues (state after common init)
    #[default]
    Discrete = 1,
}

impl PortMode {
    /// Raw mode value as stored by callers that keep plain integers
    #[inline(always)]
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Check if this mode carries data queues
    #[inline(always)]
    #[must_use]
    pub const fn has_queues(self) -> bool {
        matches!(self, PortMode::Serial)
    }
}

impl TryFrom<u8> for PortMode {
    type Error = ConfigError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(PortMode::Serial),
            1 => Ok(PortMode::Discrete),
            _ => Err(ConfigError::InvalidArgument),
        }
    }
}

impl core::fmt::Display for PortMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PortMode::Serial => "serial",
            PortMode::Discrete => "discrete",
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_discrete() {
        assert_eq!(PortMode::default(), PortMode::Discrete);
    }

    #[test]
    fn raw_values_round_trip() {
        for mode in [PortMode::Serial, PortMode::Discrete] {
            assert_eq!(PortMode::try_from(mode.as_raw()), Ok(mode));
        }
    }

    #[test]
    fn unknown_raw_mode_is_invalid() {
        assert_eq!(PortMode::try_from(2), Err(ConfigError::InvalidArgument));
        assert_eq!(PortMode::try_from(0xFF), Err(ConfigError::InvalidArgument));
    }

    #[test]
    fn only_serial_has_queues() {
        assert!(PortMode::Serial.has_queues());
        assert!(!PortMode::Discrete.has_queues());
    }
}
