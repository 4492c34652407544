//! Sunrise sign driver
//!
//! This crate puts packets from `sunrise-protocol` onto a half-duplex
//! RS-485 bus through the traits in `sunrise-hal`:
//!
//! - [`transport::Rs485Transport`] - direction-pin and guard-delay discipline
//! - [`shared::SharedTransport`] - mutex-serialized access to one transport
//! - [`sign::Sunrise`] - reset, text messages and the diagnostic test
//! - [`config::SunriseConfig`] - line and timing parameters fixed at startup

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod shared;
pub mod sign;
pub mod transport;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, SunriseConfig};
pub use shared::SharedTransport;
pub use sign::{Sunrise, SunriseError};
pub use transport::{Rs485Transport, TransportConfig, TransportError};
