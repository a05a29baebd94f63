//! Unit tests for packet reassembly.

use std::io::Cursor;

use nongofit::sensors::ifit::{parse_response, Response};
use nongofit::sensors::{FilePacketProducer, PacketReader, ProtocolError};

/// Two captured four-packet sequences; the second header carries the tag
/// announced by the first end packet.
const CAPTURE: &str = "\
fe02320402060406900208a46e0e005702b4002b
00120104022e042e0202a0002c0171005b0c0000
011200000001023203421700007a641f02b4002b
ff0e01790058028a760e008a760e003a02b4002b
fe0232040058028a760e008a760e003a02b4002b
00120104022e042e0202a0002c0171005c0c0000
011200000001023203431700007a641f02b4002b
ff0e01790058028a760e008a760e003a02b4002b
";

fn packet(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

#[test]
fn test_assembles_four_packet_sequence() {
    let mut producer = FilePacketProducer::from_reader(Cursor::new(CAPTURE));
    let mut reader = PacketReader::new();

    let data = reader.next_response(&mut producer).unwrap().unwrap();

    // 18 + 18 + 13 data bytes
    assert_eq!(data.len(), 49);
    assert!(hex::encode(&data).starts_with("0104022e042e0202a0002c0171005b0c0000"));
}

#[test]
fn test_decodes_captured_states() {
    let mut producer = FilePacketProducer::from_reader(Cursor::new(CAPTURE));
    let mut reader = PacketReader::new();

    let mut states = Vec::new();
    while let Some(data) = reader.next_response(&mut producer).unwrap() {
        if let Response::TreadmillState(response) = parse_response(&data).unwrap() {
            states.push(response.state);
        }
    }

    assert_eq!(states.len(), 2);
    assert_eq!(states[0].pace, 1.0);
    assert_eq!(states[0].incline, 3.0);
    assert_eq!(states[0].distance, 1.964);
    assert_eq!(states[0].timer, 5954);
    assert!(states[0].pulse_enabled);
    assert_eq!(states[1].timer, 5955);
}

#[test]
fn test_tag_mismatch_drops_sequence() {
    let mut reader = PacketReader::new();
    reader.push(&packet("fe020102")).unwrap();
    reader.push(&packet("ff0201aa0102")).unwrap();

    let err = reader.push(&packet("fe0201020304")).unwrap_err();
    assert_eq!(
        err,
        ProtocolError::SequenceMismatch {
            expected: "0102".to_string(),
            actual: "0304".to_string(),
        }
    );
}

#[test]
fn test_recovers_after_malformed_sequence() {
    // Intermediate index 1 where 0 was expected, then a clean sequence.
    let capture = "fe020503\n0102aabb\nff03ccdd\nfe020102\nff0309aa\n";
    let mut producer = FilePacketProducer::from_reader(Cursor::new(capture));
    let mut reader = PacketReader::new();

    let data = reader.next_response(&mut producer).unwrap();
    assert_eq!(data, Some(vec![0x09, 0xaa]));
    assert_eq!(reader.next_response(&mut producer).unwrap(), None);
}

#[test]
fn test_exhausted_producer() {
    let mut producer = FilePacketProducer::from_reader(Cursor::new(""));
    let mut reader = PacketReader::new();
    assert_eq!(reader.next_response(&mut producer).unwrap(), None);
}
