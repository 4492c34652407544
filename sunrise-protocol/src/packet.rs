//! Packet encoding for the Sunrise sign protocol.
//!
//! Packet format:
//! - TYPE (1 byte): `'M'` message/command, `'T'` message terminator
//! - SYNC (3 bytes): fixed `0xC3 0xFF 0xF5`
//! - LENGTH (1 byte): body length (0-255)
//! - BODY (0-255 bytes): type-specific data
//! - CHECKSUM (1 byte): two's complement of the byte sum of everything before it

use core::fmt;

/// Packet type for text fragments and commands
pub const PACKET_TYPE_MESSAGE: u8 = b'M';

/// Packet type closing a fragmented message
pub const PACKET_TYPE_TERMINATOR: u8 = b'T';

/// Fixed bytes between the type byte and the length byte
pub const SYNC_BYTES: [u8; 3] = [0xC3, 0xFF, 0xF5];

/// Maximum body size in bytes (the length field is one byte)
pub const MAX_BODY_SIZE: usize = u8::MAX as usize;

/// TYPE + SYNC + LENGTH
pub const HEADER_SIZE: usize = 1 + SYNC_BYTES.len() + 1;

/// Maximum complete packet size (HEADER + MAX_BODY + CHECKSUM)
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_BODY_SIZE + 1;

/// Errors that can occur during packet encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Body does not fit the one-byte length field
    BodyTooLarge { len: usize },
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BodyTooLarge { len } => {
                write!(f, "packet body of {} bytes exceeds {} bytes", len, MAX_BODY_SIZE)
            }
        }
    }
}

impl core::error::Error for PacketError {}

/// Checksum byte for the given packet bytes
///
/// Adding the returned byte to `data` makes the total byte sum ≡ 0 (mod 256).
pub fn checksum(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |sum, &byte| sum.wrapping_add(byte))
        .wrapping_neg()
}

/// A complete, checksummed packet ready for the wire
#[derive(Clone)]
pub struct Packet {
    bytes: [u8; MAX_PACKET_SIZE],
    len: usize,
}

impl Packet {
    /// Assemble a packet whose body is `prefix ++ data`
    ///
    /// The body is cut at [`MAX_BODY_SIZE`] bytes; public entry points
    /// reject longer input before getting here.
    pub(crate) fn assemble(packet_type: u8, prefix: &[u8], data: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_PACKET_SIZE];
        bytes[0] = packet_type;
        bytes[1..HEADER_SIZE - 1].copy_from_slice(&SYNC_BYTES);

        let mut len = HEADER_SIZE;
        for &byte in prefix.iter().chain(data).take(MAX_BODY_SIZE) {
            bytes[len] = byte;
            len += 1;
        }
        bytes[HEADER_SIZE - 1] = (len - HEADER_SIZE) as u8;

        bytes[len] = checksum(&bytes[..len]);
        len += 1;

        Self { bytes, len }
    }

    /// Packet type byte
    pub fn packet_type(&self) -> u8 {
        self.bytes[0]
    }

    /// Declared body length
    pub fn length(&self) -> u8 {
        self.bytes[HEADER_SIZE - 1]
    }

    /// Body bytes
    pub fn body(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..self.len - 1]
    }

    /// Trailing checksum byte
    pub fn checksum(&self) -> u8 {
        self.bytes[self.len - 1]
    }

    /// Wire representation
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Packet {}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("bytes", &self.as_bytes())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Packet {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Packet {{ bytes: {=[u8]:x} }}", self.as_bytes())
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode a packet with the given type byte and body
pub fn encode_packet(packet_type: u8, body: &[u8]) -> Result<Packet, PacketError> {
    if body.len() > MAX_BODY_SIZE {
        return Err(PacketError::BodyTooLarge { len: body.len() });
    }

    Ok(Packet::assemble(packet_type, &[], body))
}
