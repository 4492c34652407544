//! UART serial communication abstractions
//!
//! Provides the transmit-side trait the RS-485 transport writes packets
//! through, plus the line settings the Sunrise sign expects.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UART transmitter
///
/// Blocking trait for sending data over a UART interface.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been accepted by the peripheral or an
    /// error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    ///
    /// Returns once the last stop bit has left the shift register.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check whether the transmitter is still shifting out data
    ///
    /// Peripherals that cannot report this return `false`, in which case
    /// [`UartTx::flush`] alone is responsible for draining.
    fn is_busy(&self) -> bool {
        false
    }
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_blocking(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

/// Baud rate of the Sunrise sign's RS-485 port
pub const SUNRISE_BAUDRATE: u32 = 9600;

impl UartConfig {
    /// Line settings of the Sunrise sign: 9600 baud, 8N1
    pub const fn sunrise() -> Self {
        Self {
            baudrate: SUNRISE_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Number of bit times one character occupies on the wire
    pub const fn bits_per_char(&self) -> u32 {
        let data = match self.data_bits {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
            DataBits::Nine => 9,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        1 + data + parity + stop
    }

    /// Time in microseconds needed to shift `len` bytes out of the UART
    pub fn transmit_time_us(&self, len: usize) -> u64 {
        if self.baudrate == 0 {
            return 0;
        }
        let bits = len as u64 * self.bits_per_char() as u64;
        (bits * 1_000_000).div_ceil(self.baudrate as u64)
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::sunrise()
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    One,
    Two,
}
