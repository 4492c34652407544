//! Property tests for packet framing and message fragmentation

use proptest::collection::vec;
use proptest::prelude::*;

use sunrise_protocol::message::fragment_count;
use sunrise_protocol::{
    encode_message, encode_packet, EncodeError, Packet, FRAGMENT_LEN, MAX_BODY_SIZE,
    MAX_MESSAGE_LEN, PACKET_TYPE_MESSAGE, PACKET_TYPE_TERMINATOR, SYNC_BYTES,
};

fn byte_sum(packet: &Packet) -> u32 {
    packet.as_bytes().iter().map(|&b| b as u32).sum()
}

proptest! {
    #[test]
    fn packet_checksum_zeroes_sum(packet_type in any::<u8>(), body in vec(any::<u8>(), 0..=MAX_BODY_SIZE)) {
        let packet = encode_packet(packet_type, &body).unwrap();
        prop_assert_eq!(byte_sum(&packet) % 256, 0);
    }

    #[test]
    fn packet_length_matches_body(packet_type in any::<u8>(), body in vec(any::<u8>(), 0..=MAX_BODY_SIZE)) {
        let packet = encode_packet(packet_type, &body).unwrap();

        prop_assert_eq!(packet.packet_type(), packet_type);
        prop_assert_eq!(&packet.as_bytes()[1..4], &SYNC_BYTES[..]);
        prop_assert_eq!(packet.length() as usize, body.len());
        prop_assert_eq!(packet.body(), &body[..]);
        prop_assert_eq!(packet.as_bytes().len(), body.len() + 6);
    }

    #[test]
    fn message_fragments_reassemble(message in vec(any::<u8>(), 0..=MAX_MESSAGE_LEN)) {
        let packets: Vec<Packet> = encode_message(&message).unwrap().collect();
        let fragments = message.len().div_ceil(FRAGMENT_LEN);

        prop_assert_eq!(fragment_count(message.len()), fragments);
        prop_assert_eq!(packets.len(), fragments + 1);

        let mut reassembled = Vec::new();
        for (index, packet) in packets[..fragments].iter().enumerate() {
            prop_assert_eq!(packet.packet_type(), PACKET_TYPE_MESSAGE);
            prop_assert_eq!(&packet.body()[..3], &[0x00, 0x01, ((index + 1) * 16 + 1) as u8][..]);
            prop_assert!(packet.body().len() <= 3 + FRAGMENT_LEN);
            prop_assert_eq!(byte_sum(packet) % 256, 0);
            reassembled.extend_from_slice(&packet.body()[3..]);
        }
        prop_assert_eq!(reassembled, message);

        let terminator = &packets[fragments];
        prop_assert_eq!(terminator.packet_type(), PACKET_TYPE_TERMINATOR);
        prop_assert_eq!(terminator.length(), 0);
        prop_assert_eq!(byte_sum(terminator) % 256, 0);
    }

    #[test]
    fn oversize_message_rejected(extra in 1usize..64) {
        let message = vec![b'A'; MAX_MESSAGE_LEN + extra];
        prop_assert_eq!(
            encode_message(&message).err(),
            Some(EncodeError::PayloadTooLarge { len: MAX_MESSAGE_LEN + extra })
        );
    }
}

#[test]
fn concrete_reset_vector() {
    let packet = encode_packet(b'M', &[0, 1, 0]).unwrap();
    let checksum =
        ((256 - (0x4D + 0xC3 + 0xFF + 0xF5 + 0x03 + 0x00 + 0x01 + 0x00) % 256) % 256) as u8;

    assert_eq!(
        packet.as_bytes(),
        &[0x4D, 0xC3, 0xFF, 0xF5, 0x03, 0x00, 0x01, 0x00, checksum][..]
    );
}

#[test]
fn empty_message_has_no_fragments() {
    let packets: Vec<Packet> = encode_message(b"").unwrap().collect();

    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].packet_type(), PACKET_TYPE_TERMINATOR);
}

#[test]
fn thirteen_byte_message_splits_twelve_and_one() {
    let packets: Vec<Packet> = encode_message(b"Hello, world!").unwrap().collect();

    assert_eq!(packets.len(), 3);
    assert_eq!(&packets[0].body()[3..], b"Hello, world");
    assert_eq!(&packets[1].body()[3..], b"!");
}
