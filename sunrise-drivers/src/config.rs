//! Startup configuration
//!
//! Bus parameters are fixed once the transport is built. With the `serde`
//! feature (on by default) the configuration can be loaded from a TOML
//! machine file:
//!
//! ```toml
//! [uart]
//! baudrate = 9600
//!
//! [transport]
//! pre_guard_us = 10000
//! post_guard_us = 10000
//! ```
//!
//! Missing fields take their defaults.

use core::fmt;

use sunrise_hal::UartConfig;
use sunrise_protocol::MAX_PACKET_SIZE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::transport::TransportConfig;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate of zero
    InvalidBaudrate,
    /// Flush timeout shorter than a maximum-size packet takes to send
    FlushTimeoutTooShort { required_us: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaudrate => f.write_str("baud rate must be non-zero"),
            Self::FlushTimeoutTooShort { required_us } => {
                write!(f, "flush timeout must be at least {} us", required_us)
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Complete driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SunriseConfig {
    /// Serial line settings, applied during bring-up
    pub uart: UartConfig,
    /// RS-485 session timing
    pub transport: TransportConfig,
}

impl SunriseConfig {
    /// Check that the timing parameters suit the line settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uart.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }

        let packet_time = self.uart.transmit_time_us(MAX_PACKET_SIZE);
        if (self.transport.flush_timeout_us as u64) < packet_time {
            return Err(ConfigError::FlushTimeoutTooShort {
                required_us: u32::try_from(packet_time).unwrap_or(u32::MAX),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SunriseConfig::default();

        assert_eq!(config.uart, UartConfig::sunrise());
        assert_eq!(config.transport, TransportConfig::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_baudrate_rejected() {
        let mut config = SunriseConfig::default();
        config.uart.baudrate = 0;

        assert_eq!(config.validate(), Err(ConfigError::InvalidBaudrate));
    }

    #[test]
    fn test_short_flush_timeout_rejected() {
        let mut config = SunriseConfig::default();
        config.transport.flush_timeout_us = 1_000;

        assert_eq!(
            config.validate(),
            Err(ConfigError::FlushTimeoutTooShort {
                required_us: 271_875
            })
        );
    }

    #[test]
    fn test_faster_line_needs_shorter_timeout() {
        let mut config = SunriseConfig::default();
        config.uart.baudrate = 115_200;
        config.transport = TransportConfig::for_uart(&config.uart);

        assert_eq!(config.validate(), Ok(()));
        assert!(config.transport.flush_timeout_us < TransportConfig::default().flush_timeout_us);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_load_from_toml() {
        use sunrise_hal::{DataBits, Parity, StopBits};

        let config: SunriseConfig = toml::from_str(
            r#"
            [uart]
            baudrate = 19200
            parity = "Even"

            [transport]
            pre_guard_us = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.uart.baudrate, 19200);
        assert_eq!(config.uart.data_bits, DataBits::Eight);
        assert_eq!(config.uart.parity, Parity::Even);
        assert_eq!(config.uart.stop_bits, StopBits::One);
        assert_eq!(config.transport.pre_guard_us, 5000);
        assert_eq!(config.transport.post_guard_us, 10_000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_empty_toml_is_default() {
        let config: SunriseConfig = toml::from_str("").unwrap();
        assert_eq!(config, SunriseConfig::default());
    }
}
