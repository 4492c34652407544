//! Text message fragmentation
//!
//! The sign accepts at most 12 bytes of text per packet. Longer messages
//! are cut into consecutive fragments, each carried in an `'M'` packet with
//! body:
//!
//! ```text
//! ┌──────┬──────┬──────────────┬──────────────────┐
//! │ 0x00 │ 0x01 │ index*16 + 1 │ up to 12 bytes   │
//! └──────┴──────┴──────────────┴──────────────────┘
//! ```
//!
//! where `index` is 1-based. An empty `'T'` packet follows the last
//! fragment.

use core::fmt;
use core::iter::FusedIterator;

use crate::packet::{Packet, PACKET_TYPE_MESSAGE, PACKET_TYPE_TERMINATOR};

/// Maximum text bytes carried by one fragment
pub const FRAGMENT_LEN: usize = 12;

/// Maximum message length accepted by the sign
pub const MAX_MESSAGE_LEN: usize = 180;

/// Maximum number of fragments in one message
pub const MAX_FRAGMENTS: usize = MAX_MESSAGE_LEN.div_ceil(FRAGMENT_LEN);

/// Leading body bytes of a text fragment, before the sub-type byte
const FRAGMENT_PREFIX: [u8; 2] = [0x00, 0x01];

/// Errors that can occur while encoding a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Message is longer than [`MAX_MESSAGE_LEN`]
    PayloadTooLarge { len: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTooLarge { len } => write!(
                f,
                "message of {} bytes exceeds {} bytes",
                len, MAX_MESSAGE_LEN
            ),
        }
    }
}

impl core::error::Error for EncodeError {}

/// Number of fragments needed for a message of `len` bytes
pub const fn fragment_count(len: usize) -> usize {
    len.div_ceil(FRAGMENT_LEN)
}

/// Sub-type byte tagging the fragment at 0-based `index`
pub const fn fragment_sub_type(index: usize) -> u8 {
    ((index + 1) * 16 + 1) as u8
}

/// Ordered packets encoding one message: fragments, then the terminator
///
/// Produced by [`encode_message`]. Packets are built lazily as the
/// iterator advances, so no more than one packet is held at a time.
#[derive(Debug, Clone)]
pub struct MessagePackets<'a> {
    message: &'a [u8],
    next_fragment: usize,
    terminated: bool,
}

impl<'a> MessagePackets<'a> {
    /// Callers guarantee `message.len() <= MAX_MESSAGE_LEN`.
    pub(crate) fn new_unchecked(message: &'a [u8]) -> Self {
        Self {
            message,
            next_fragment: 0,
            terminated: false,
        }
    }

    /// Number of text fragments in this message
    pub fn fragments(&self) -> usize {
        fragment_count(self.message.len())
    }

    fn fragment(&self, index: usize) -> Packet {
        let start = index * FRAGMENT_LEN;
        let end = (start + FRAGMENT_LEN).min(self.message.len());
        let prefix = [FRAGMENT_PREFIX[0], FRAGMENT_PREFIX[1], fragment_sub_type(index)];
        Packet::assemble(PACKET_TYPE_MESSAGE, &prefix, &self.message[start..end])
    }
}

impl Iterator for MessagePackets<'_> {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        if self.next_fragment < self.fragments() {
            let packet = self.fragment(self.next_fragment);
            self.next_fragment += 1;
            Some(packet)
        } else if !self.terminated {
            self.terminated = true;
            Some(Packet::assemble(PACKET_TYPE_TERMINATOR, &[], &[]))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.fragments() - self.next_fragment + usize::from(!self.terminated);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MessagePackets<'_> {}

impl FusedIterator for MessagePackets<'_> {}

/// Encode a text message as fragment packets followed by a terminator
///
/// Fails without producing any packet when the message exceeds
/// [`MAX_MESSAGE_LEN`]. An empty message yields the terminator alone.
pub fn encode_message(message: &[u8]) -> Result<MessagePackets<'_>, EncodeError> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(EncodeError::PayloadTooLarge { len: message.len() });
    }

    Ok(MessagePackets::new_unchecked(message))
}
