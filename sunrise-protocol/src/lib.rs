//! Sunrise Sign Protocol
//!
//! This crate builds the vendor-defined binary packets understood by the
//! Sunrise gas-sensor display/controller on its RS-485 port. The protocol is
//! one-way: packets are encoded here and pushed onto the bus by the
//! transport in `sunrise-drivers`; the sign never answers.
//!
//! # Packet Overview
//!
//! ```text
//! ┌──────┬──────┬──────┬──────┬────────┬─────────────┬──────────┐
//! │ TYPE │ 0xC3 │ 0xFF │ 0xF5 │ LENGTH │ BODY        │ CHECKSUM │
//! │ 1B   │ 1B   │ 1B   │ 1B   │ 1B     │ 0–255B      │ 1B       │
//! └──────┴──────┴──────┴──────┴────────┴─────────────┴──────────┘
//! ```
//!
//! The checksum makes the byte sum of the whole packet a multiple of 256.
//!
//! Text longer than one packet is split into 12-byte fragments, each sent
//! as an `'M'` packet, followed by an empty `'T'` packet that tells the sign
//! the message is complete.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod message;
pub mod packet;

pub use commands::{
    encode_diagnostic_sequence, encode_reset, DiagnosticSequence, DiagnosticStep,
    DIAGNOSTIC_STEP_DELAY,
};
pub use message::{encode_message, EncodeError, MessagePackets, FRAGMENT_LEN, MAX_MESSAGE_LEN};
pub use packet::{
    encode_packet, Packet, PacketError, MAX_BODY_SIZE, MAX_PACKET_SIZE, PACKET_TYPE_MESSAGE,
    PACKET_TYPE_TERMINATOR, SYNC_BYTES,
};
