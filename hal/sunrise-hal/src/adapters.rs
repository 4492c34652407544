//! Bridges from the `embedded-hal` / `embedded-io` ecosystem traits
//!
//! Chip HALs (embassy-rp, embassy-stm32, ...) implement the ecosystem
//! traits for their blocking UARTs and GPIO outputs. Wrapping them here lets
//! the RS-485 transport drive real peripherals without a per-chip crate.

use core::convert::Infallible;

use crate::gpio::OutputPin;
use crate::uart::UartTx;

/// [`UartTx`] over any blocking [`embedded_io::Write`] implementation
///
/// `embedded-io` has no way to ask whether the shift register is still
/// busy. Without a busy probe the adapter reports idle and the drain is
/// left to the inner `flush()`, which is then the only bound on it. Chip
/// HALs that expose a busy flag can supply it through
/// [`EmbeddedIoUart::with_busy`] so the transport's flush timeout applies.
pub struct EmbeddedIoUart<T> {
    inner: T,
    busy: Option<fn(&T) -> bool>,
}

impl<T: embedded_io::Write> EmbeddedIoUart<T> {
    /// Wrap a blocking UART transmitter
    pub fn new(inner: T) -> Self {
        Self { inner, busy: None }
    }

    /// Wrap a blocking UART transmitter with a transmitter-busy probe
    pub fn with_busy(inner: T, busy: fn(&T) -> bool) -> Self {
        Self {
            inner,
            busy: Some(busy),
        }
    }

    /// Get the wrapped transmitter back
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: embedded_io::Write> UartTx for EmbeddedIoUart<T> {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }

    fn is_busy(&self) -> bool {
        self.busy.is_some_and(|busy| busy(&self.inner))
    }
}

/// [`OutputPin`] over an infallible [`embedded_hal::digital::OutputPin`]
///
/// The last commanded level is tracked locally so callers can read it
/// back without requiring `StatefulOutputPin`.
pub struct EmbeddedHalPin<T> {
    inner: T,
    high: bool,
}

impl<T> EmbeddedHalPin<T>
where
    T: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    /// Wrap an output pin, driving it low (receive) immediately
    pub fn new(inner: T) -> Self {
        let mut pin = Self { inner, high: true };
        pin.set_low();
        pin
    }

    /// Get the wrapped pin back
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> OutputPin for EmbeddedHalPin<T>
where
    T: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.inner.set_high() {
            Ok(()) => self.high = true,
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.inner.set_low() {
            Ok(()) => self.high = false,
            Err(never) => match never {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
