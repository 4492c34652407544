//! Half-duplex RS-485 transport
//!
//! The Sunrise sign shares a two-wire bus with its own transmitter, so the
//! local line driver may only be enabled while a packet is going out.
//! Every transmission runs the same session:
//!
//! ```text
//! DE ──┐                                              ┌── DE
//!  low │ high                                         │ low
//!      ├─ pre guard ─┬─ write ─┬─ drain + flush ─┬─ post guard
//! ```
//!
//! The post guard and the return to receive happen on every exit path,
//! including write and flush failures. A failed write is still followed by
//! a flush so the session's call sequence never changes shape.

use core::fmt;
use core::time::Duration;

use embedded_hal::delay::DelayNs;
use sunrise_hal::{OutputPin, UartConfig, UartTx};
use sunrise_protocol::MAX_PACKET_SIZE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Guard interval before and after each packet (10 ms)
pub const DEFAULT_GUARD_US: u32 = 10_000;

/// Slack added to the worst-case packet time when bounding the flush
pub const DEFAULT_FLUSH_MARGIN_US: u32 = 100_000;

/// Interval between transmitter-idle polls while draining
pub const DEFAULT_FLUSH_POLL_US: u32 = 1_000;

/// Transport timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransportConfig {
    /// Settling time after enabling the line driver
    pub pre_guard_us: u32,
    /// Turn-around time before releasing the bus
    pub post_guard_us: u32,
    /// Upper bound on waiting for the transmitter to go idle
    pub flush_timeout_us: u32,
    /// Interval between idle polls
    pub flush_poll_us: u32,
}

impl TransportConfig {
    /// Timing for a line with the given settings
    ///
    /// The flush bound covers a maximum-size packet at the line's baud rate
    /// plus [`DEFAULT_FLUSH_MARGIN_US`].
    pub fn for_uart(uart: &UartConfig) -> Self {
        let packet_time = uart.transmit_time_us(MAX_PACKET_SIZE);
        let flush_timeout = packet_time.saturating_add(DEFAULT_FLUSH_MARGIN_US as u64);

        Self {
            pre_guard_us: DEFAULT_GUARD_US,
            post_guard_us: DEFAULT_GUARD_US,
            flush_timeout_us: u32::try_from(flush_timeout).unwrap_or(u32::MAX),
            flush_poll_us: DEFAULT_FLUSH_POLL_US,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::for_uart(&UartConfig::sunrise())
    }
}

/// Transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// The UART rejected the packet bytes
    Write(E),
    /// The UART failed to drain
    Flush(E),
    /// The transmitter stayed busy past `flush_timeout_us`
    FlushTimeout,
    /// Another transmission holds the bus
    Busy,
}

impl<E: fmt::Debug> fmt::Display for TransportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(e) => write!(f, "UART write failed: {:?}", e),
            Self::Flush(e) => write!(f, "UART flush failed: {:?}", e),
            Self::FlushTimeout => f.write_str("UART did not drain before the flush timeout"),
            Self::Busy => f.write_str("bus is held by another transmission"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for TransportError<E> {}

/// Sleep for `duration` to microsecond resolution
///
/// Whole milliseconds go through `delay_ms` in chunks of at most
/// `u32::MAX`, so long durations are never cut short.
pub(crate) fn sleep<D: DelayNs>(delay: &mut D, duration: Duration) {
    let mut millis = duration.as_millis();
    while millis > 0 {
        let step = u32::try_from(millis).unwrap_or(u32::MAX);
        delay.delay_ms(step);
        millis -= u128::from(step);
    }

    let micros = duration.subsec_micros() % 1_000;
    if micros > 0 {
        delay.delay_us(micros);
    }
}

/// One packet's hold on the bus
///
/// Asserts the direction pin on creation. Dropping it waits out the post
/// guard and returns the transceiver to receive.
struct TxSession<'a, P: OutputPin, D: DelayNs> {
    direction: &'a mut P,
    delay: &'a mut D,
    post_guard_us: u32,
}

impl<'a, P: OutputPin, D: DelayNs> TxSession<'a, P, D> {
    fn begin(direction: &'a mut P, delay: &'a mut D, post_guard_us: u32) -> Self {
        direction.set_high();
        Self {
            direction,
            delay,
            post_guard_us,
        }
    }
}

impl<P: OutputPin, D: DelayNs> Drop for TxSession<'_, P, D> {
    fn drop(&mut self) {
        self.delay.delay_us(self.post_guard_us);
        self.direction.set_low();
    }
}

/// RS-485 transmitter with exclusive ownership of UART, direction pin and
/// delay source
pub struct Rs485Transport<U, P, D> {
    uart: U,
    direction: P,
    delay: D,
    config: TransportConfig,
}

impl<U, P, D> Rs485Transport<U, P, D>
where
    U: UartTx,
    P: OutputPin,
    D: DelayNs,
{
    /// Create a transport, leaving the bus in receive
    pub fn new(uart: U, mut direction: P, delay: D, config: TransportConfig) -> Self {
        direction.set_low();
        Self {
            uart,
            direction,
            delay,
            config,
        }
    }

    /// Get the timing configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Whether the line driver is currently enabled
    pub fn is_transmitting(&self) -> bool {
        self.direction.is_set_high()
    }

    /// Mutable access to the UART, e.g. to change line settings between
    /// transmissions
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Transmit one packet
    ///
    /// Blocks for both guard intervals plus the time to write and drain the
    /// bytes. The direction pin is low again when this returns, whatever
    /// the outcome.
    pub fn transmit(&mut self, packet: &[u8]) -> Result<(), TransportError<U::Error>> {
        let config = self.config;
        let session = TxSession::begin(
            &mut self.direction,
            &mut self.delay,
            config.post_guard_us,
        );
        session.delay.delay_us(config.pre_guard_us);

        if let Err(e) = self.uart.write_blocking(packet) {
            #[cfg(feature = "defmt")]
            defmt::warn!("RS-485 write of {} bytes failed", packet.len());
            // Push out whatever was accepted; the write error is the one reported
            let _ = self.uart.flush();
            return Err(TransportError::Write(e));
        }

        wait_until_idle(&self.uart, &mut *session.delay, &config)?;

        if let Err(e) = self.uart.flush() {
            #[cfg(feature = "defmt")]
            defmt::warn!("RS-485 flush failed");
            return Err(TransportError::Flush(e));
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("RS-485 sent {} bytes", packet.len());

        Ok(())
    }

    /// Transmit packets in order, stopping at the first failure
    ///
    /// Returns the number of packets sent.
    pub fn transmit_all<I>(&mut self, packets: I) -> Result<usize, TransportError<U::Error>>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut sent = 0;
        for packet in packets {
            self.transmit(packet.as_ref())?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Block the caller for `duration` using the transport's delay source
    pub fn sleep(&mut self, duration: Duration) {
        sleep(&mut self.delay, duration);
    }

    /// Give back the UART, direction pin and delay source
    pub fn release(self) -> (U, P, D) {
        (self.uart, self.direction, self.delay)
    }
}

/// Poll the transmitter until idle, bounded by `flush_timeout_us`
fn wait_until_idle<U: UartTx, D: DelayNs>(
    uart: &U,
    delay: &mut D,
    config: &TransportConfig,
) -> Result<(), TransportError<U::Error>> {
    let mut waited_us = 0u32;

    while uart.is_busy() {
        if waited_us >= config.flush_timeout_us {
            #[cfg(feature = "defmt")]
            defmt::warn!("RS-485 transmitter busy after {} us", waited_us);
            return Err(TransportError::FlushTimeout);
        }
        let step = config
            .flush_poll_us
            .max(1)
            .min(config.flush_timeout_us - waited_us);
        delay.delay_us(step);
        waited_us += step;
    }

    Ok(())
}
