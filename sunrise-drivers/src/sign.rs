//! Sunrise sign driver
//!
//! Composes the packet encoders with the RS-485 transport. Every operation
//! encodes first and transmits second, so invalid input never reaches the
//! bus.

use core::fmt;

use embedded_hal::delay::DelayNs;
use sunrise_hal::{OutputPin, UartTx};
use sunrise_protocol::{encode_diagnostic_sequence, encode_message, encode_reset, EncodeError};

use crate::transport::{Rs485Transport, TransportError};

/// Sign operation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SunriseError<E> {
    /// The input could not be encoded; nothing was sent
    Encode(EncodeError),
    /// The bus failed mid-operation
    Transport(TransportError<E>),
}

impl<E> From<EncodeError> for SunriseError<E> {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

impl<E> From<TransportError<E>> for SunriseError<E> {
    fn from(e: TransportError<E>) -> Self {
        Self::Transport(e)
    }
}

impl<E: fmt::Debug> fmt::Display for SunriseError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "encoding failed: {}", e),
            Self::Transport(e) => write!(f, "transport failed: {}", e),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for SunriseError<E> {}

/// Handle to one Sunrise sign on an RS-485 bus
pub struct Sunrise<U, P, D> {
    transport: Rs485Transport<U, P, D>,
}

impl<U, P, D> Sunrise<U, P, D>
where
    U: UartTx,
    P: OutputPin,
    D: DelayNs,
{
    /// Create a sign handle over an owned transport
    pub fn new(transport: Rs485Transport<U, P, D>) -> Self {
        Self { transport }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &Rs485Transport<U, P, D> {
        &self.transport
    }

    /// Get the underlying transport mutably
    pub fn transport_mut(&mut self) -> &mut Rs485Transport<U, P, D> {
        &mut self.transport
    }

    /// Give back the transport
    pub fn release(self) -> Rs485Transport<U, P, D> {
        self.transport
    }

    /// Send the reset command
    pub fn reset(&mut self) -> Result<(), SunriseError<U::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Sunrise reset");

        self.transport.transmit(encode_reset().as_bytes())?;
        Ok(())
    }

    /// Show a text message of at most 180 bytes
    ///
    /// Returns the number of packets sent, fragments plus terminator.
    pub fn send_message(&mut self, message: &[u8]) -> Result<usize, SunriseError<U::Error>> {
        let packets = encode_message(message)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Sunrise message: {} bytes in {} fragments",
            message.len(),
            packets.fragments()
        );

        Ok(self.transport.transmit_all(packets)?)
    }

    /// Run the diagnostic test
    ///
    /// Shows the banner, 18 counter messages and a completion message,
    /// pausing after each step as the sequence prescribes.
    pub fn run_diagnostic(&mut self) -> Result<(), SunriseError<U::Error>> {
        #[cfg(feature = "defmt")]
        defmt::info!("Sunrise diagnostic test starting");

        for step in encode_diagnostic_sequence() {
            self.transport.transmit_all(step.packets())?;
            if let Some(delay) = step.delay_after() {
                self.transport.sleep(delay);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Sunrise diagnostic test complete");

        Ok(())
    }
}
