//! Mutex-serialized transport
//!
//! The RS-485 bus is non-reentrant: one packet must finish its session
//! before the next may assert the direction pin. When the transport has to
//! be reachable from several places (a static shared between tasks, for
//! example), wrap it here. Use `CriticalSectionRawMutex` on hardware and
//! `NoopRawMutex` in single-context code.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::delay::DelayNs;
use sunrise_hal::{OutputPin, UartTx};

use crate::transport::{Rs485Transport, TransportError};

/// Transport shared behind a blocking mutex
pub struct SharedTransport<M: RawMutex, U, P, D> {
    inner: Mutex<M, RefCell<Rs485Transport<U, P, D>>>,
}

impl<M, U, P, D> SharedTransport<M, U, P, D>
where
    M: RawMutex,
    U: UartTx,
    P: OutputPin,
    D: DelayNs,
{
    /// Wrap a transport
    pub fn new(transport: Rs485Transport<U, P, D>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(transport)),
        }
    }

    /// Transmit one packet
    ///
    /// Fails with [`TransportError::Busy`] if called while another
    /// transmission on this transport is still in progress.
    pub fn transmit(&self, packet: &[u8]) -> Result<(), TransportError<U::Error>> {
        self.with_transport(|transport| transport.transmit(packet))
    }

    /// Transmit packets in order as one uninterrupted batch
    pub fn transmit_all<I>(&self, packets: I) -> Result<usize, TransportError<U::Error>>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.with_transport(|transport| transport.transmit_all(packets))
    }

    /// Run `f` with exclusive access to the transport
    pub fn with_transport<R>(
        &self,
        f: impl FnOnce(&mut Rs485Transport<U, P, D>) -> Result<R, TransportError<U::Error>>,
    ) -> Result<R, TransportError<U::Error>> {
        self.inner.lock(|cell| {
            let mut transport = cell.try_borrow_mut().map_err(|_| {
                #[cfg(feature = "defmt")]
                defmt::warn!("RS-485 transport re-entered while busy");
                TransportError::Busy
            })?;
            f(&mut transport)
        })
    }

    /// Unwrap the transport
    pub fn into_inner(self) -> Rs485Transport<U, P, D> {
        self.inner.into_inner().into_inner()
    }
}
