//! Unit tests for iFit request encoding and response decoding.

use nongofit::sensors::ifit::{
    parse_response, to_request_packets, Response, TreadmillStateRequest, TreadmillStateResponse,
    MAX_PACKET_DATA,
};
use nongofit::sensors::ProtocolError;

/// Captured state response: device info, type tag, then the state payload.
const STATE_RESPONSE: &str = concat!(
    "0104022e042e02",
    "02a0002c0171001400000000000000023100310000009a630300b4003f",
);

fn hexed(packets: &[Vec<u8>]) -> Vec<String> {
    packets.iter().map(hex::encode).collect()
}

#[test]
fn test_single_byte_request() {
    let packets = to_request_packets(&[0x01]).unwrap();
    assert_eq!(
        hexed(&packets),
        vec!["fe020102", "ff01010000000000000000000000000000000000"]
    );
}

#[test]
fn test_three_packet_request() {
    let mut data = vec![0x01; MAX_PACKET_DATA];
    data.push(0x02);

    let packets = to_request_packets(&data).unwrap();
    assert_eq!(
        hexed(&packets),
        vec![
            "fe021303",
            "0012010101010101010101010101010101010101",
            "ff01020000000000000000000000000000000000",
        ]
    );
}

#[test]
fn test_four_packet_request() {
    let mut data = vec![0x01; MAX_PACKET_DATA];
    data.extend(vec![0x02; MAX_PACKET_DATA]);
    data.extend(vec![0x03; MAX_PACKET_DATA]);

    let packets = to_request_packets(&data).unwrap();
    assert_eq!(
        hexed(&packets),
        vec![
            "fe023604",
            "0012010101010101010101010101010101010101",
            "0112020202020202020202020202020202020202",
            "ff12030303030303030303030303030303030303",
        ]
    );
}

#[test]
fn test_treadmill_state_request() {
    assert_eq!(
        hexed(&TreadmillStateRequest.to_packets().unwrap()),
        vec![
            "fe021403",
            "001202040210041002000a1b9430000040500080",
            "ff02182700000000000000000000000000000000",
        ]
    );
}

#[test]
fn test_empty_request() {
    assert_eq!(to_request_packets(&[]), Err(ProtocolError::EmptyRequest));
}

#[test]
fn test_every_packet_fits_ble_mtu() {
    let data: Vec<u8> = (0..=200).map(|b| b as u8).collect();
    let packets = to_request_packets(&data).unwrap();

    assert!(packets.iter().all(|p| p.len() <= 20));
    assert_eq!(packets[0][3] as usize, packets.len());
}

#[test]
fn test_parse_treadmill_state() {
    let data = hex::decode(STATE_RESPONSE).unwrap();

    let Response::TreadmillState(response) = parse_response(&data).unwrap() else {
        panic!("Expected a treadmill state response");
    };

    let state = response.state;
    assert_eq!(state.pace, 1.0);
    assert_eq!(state.incline, 3.0);
    assert_eq!(state.distance, 0.012);
    assert_eq!(state.timer, 49);
    assert_eq!(state.pulse, 0);
    assert!(!state.pulse_enabled);
}

#[test]
fn test_state_debug_string() {
    let data = hex::decode(STATE_RESPONSE).unwrap();
    let response = parse_response(&data).unwrap();

    assert_eq!(
        response.debug_string(),
        concat!(
            "(TreadmillState)    1.0 mph    3.0% incline    0.012 miles      49 seconds    ",
            "Pulse:  0 bpm    02        7100    0000  0000  023100    00009a630300b4003f",
        )
    );
}

#[test]
fn test_state_payload_too_short() {
    let data = hex::decode("0104022e042e0202a000").unwrap();
    assert!(matches!(
        parse_response(&data),
        Err(ProtocolError::TruncatedResponse { .. })
    ));
}

#[test]
fn test_state_response_keeps_raw_payload() {
    let payload = hex::decode("02a0002c0171001400000000000000023100310000009a630300b4003f").unwrap();
    let response = TreadmillStateResponse::parse(&payload).unwrap();
    assert_eq!(response.raw, payload);
}
