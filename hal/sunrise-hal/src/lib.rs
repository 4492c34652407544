//! Sunrise Hardware Abstraction Layer
//!
//! This crate defines the hardware seam of the Sunrise sign driver: the
//! UART transmitter that carries packets onto the RS-485 line and the GPIO
//! pin that switches the transceiver between transmit and receive.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sunrise-drivers (RS-485 transport)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sunrise-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embedded-io  │       │  embedded-hal │
//! │  UARTs        │       │  output pins  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Bus direction (driver enable) signal
//! - [`uart::UartTx`] - Serial transmit channel
//!
//! Delays use [`embedded_hal::delay::DelayNs`] directly.

#![no_std]
#![deny(unsafe_code)]

pub mod adapters;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adapters::{EmbeddedHalPin, EmbeddedIoUart};
pub use embedded_hal::delay::DelayNs;
pub use gpio::OutputPin;
pub use uart::{DataBits, Parity, StopBits, UartConfig, UartTx};
