//! iFit treadmill BLE protocol.
//!
//! Requests and responses are split into packets of at most 20 bytes. A
//! sequence starts with a header packet (`FE 02 …`), carries data in indexed
//! intermediate packets and ends with an `FF` packet. This module builds
//! request sequences and decodes assembled response data; see
//! [`crate::sensors::reader`] for reassembling incoming packets.

use uuid::Uuid;

use crate::sensors::types::{ProtocolError, TreadmillState};

/// Characteristic the treadmill notifies value updates on (handle 0x000B).
pub const VALUE_UPDATE_UUID: Uuid = Uuid::from_u128(0x0000_1535_1412_efde_1523_785f_eabc_d123);

/// Characteristic that accepts request packets (handle 0x000E).
pub const VALUE_REQUEST_UUID: Uuid = Uuid::from_u128(0x0000_1534_1412_efde_1523_785f_eabc_d123);

/// Marker starting a header packet.
pub const HEADER_MARKER: [u8; 2] = [0xFE, 0x02];

/// Marker starting the final packet of a sequence.
pub const END_MARKER: u8 = 0xFF;

/// Maximum data bytes carried by one packet.
pub const MAX_PACKET_DATA: usize = 0x12;

/// Response type tag for treadmill state.
pub const TREADMILL_STATE_TYPE: u32 = 0x022E_042E;

/// Kilometers to miles, as used by the treadmill console.
const KM_TO_MILES: f64 = 0.621;

/// A sequence of packets ready to write to the device.
pub type PacketData = Vec<Vec<u8>>;

/// Split `data` into a request packet sequence.
///
/// The header holds the data size and the packet count (including the
/// header). Intermediate packets are `[index, size, data…]`; the final packet
/// is `[0xFF, size, data…]` zero-padded to a full packet.
pub fn to_request_packets(data: &[u8]) -> Result<PacketData, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::EmptyRequest);
    }

    let data_size =
        u8::try_from(data.len()).map_err(|_| ProtocolError::RequestTooLarge(data.len()))?;
    let chunks: Vec<&[u8]> = data.chunks(MAX_PACKET_DATA).collect();
    // At most 15 chunks for a u8-sized request, so this always fits.
    let num_packets = chunks.len() as u8;

    let mut packets = Vec::with_capacity(chunks.len() + 1);
    packets.push(vec![
        HEADER_MARKER[0],
        HEADER_MARKER[1],
        data_size,
        num_packets + 1,
    ]);

    for (index, chunk) in chunks.iter().enumerate() {
        let is_last = index + 1 == chunks.len();
        let first_byte = if is_last { END_MARKER } else { index as u8 };

        let mut packet = Vec::with_capacity(2 + MAX_PACKET_DATA);
        packet.push(first_byte);
        packet.push(chunk.len() as u8);
        packet.extend_from_slice(chunk);

        if is_last {
            packet.resize(2 + MAX_PACKET_DATA, 0x00);
        }
        packets.push(packet);
    }

    Ok(packets)
}

/// Request for the current state of the treadmill.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreadmillStateRequest;

impl TreadmillStateRequest {
    /// Raw request bytes (meaning unknown, captured from the console app).
    pub const RAW_BYTES: [u8; 20] = [
        0x02, 0x04, 0x02, 0x10, 0x04, 0x10, 0x02, 0x00, 0x0a, 0x1b, 0x94, 0x30, 0x00, 0x00, 0x40,
        0x50, 0x00, 0x80, 0x18, 0x27,
    ];

    /// Encode the request as packets.
    pub fn to_packets(&self) -> Result<PacketData, ProtocolError> {
        to_request_packets(&Self::RAW_BYTES)
    }
}

/// A decoded response.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Current treadmill state
    TreadmillState(TreadmillStateResponse),
    /// Anything not understood yet, with the raw response data
    Unknown(Vec<u8>),
}

impl Response {
    /// Representation suitable for logging/debugging.
    pub fn debug_string(&self) -> String {
        match self {
            Response::TreadmillState(state) => state.debug_string(),
            Response::Unknown(raw) => hex::encode(raw),
        }
    }
}

/// Byte ranges of known fields within a state payload.
mod layout {
    use std::ops::Range;

    pub const PACE: Range<usize> = 1..3;
    pub const INCLINE: Range<usize> = 3..5;
    pub const DISTANCE: Range<usize> = 7..9;
    pub const PULSE: Range<usize> = 11..12;
    pub const PULSE_ENABLED: Range<usize> = 14..15;
    pub const TIMER: Range<usize> = 18..20;

    pub const ALL: [Range<usize>; 6] = [PACE, INCLINE, DISTANCE, PULSE, PULSE_ENABLED, TIMER];

    /// Payload length needed to read every field.
    pub const MIN_LEN: usize = TIMER.end;
}

/// Treadmill state response with its raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TreadmillStateResponse {
    /// Decoded values
    pub state: TreadmillState,
    /// Payload the state was decoded from
    pub raw: Vec<u8>,
}

impl TreadmillStateResponse {
    /// Decode a state payload (response data with the 7-byte prefix removed).
    ///
    /// ```text
    /// 02 a000 2c01 7100 1400 0000 00 0000 00 02 3100 3100 …
    ///    PPPP IIII      DDDD      UU      EE         TTTT
    /// ```
    /// (P)ace, (I)ncline, (D)istance, P(U)lse, pulse (E)nabled, (T)imer.
    pub fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        if payload.len() < layout::MIN_LEN {
            return Err(ProtocolError::TruncatedResponse {
                needed: layout::MIN_LEN,
                actual: payload.len(),
            });
        }

        let state = TreadmillState {
            pace: extract_pace(payload),
            incline: extract_incline(payload),
            distance: extract_distance(payload),
            timer: read_u16(payload, layout::TIMER.start),
            pulse: payload[layout::PULSE.start],
            pulse_enabled: payload[layout::PULSE_ENABLED.start] != 0,
        };

        Ok(Self {
            state,
            raw: payload.to_vec(),
        })
    }

    /// Decoded values followed by the payload with known bytes blanked out.
    pub fn debug_string(&self) -> String {
        let masked: String = self
            .raw
            .iter()
            .enumerate()
            .map(|(index, byte)| {
                if layout::ALL.iter().any(|range| range.contains(&index)) {
                    "  ".to_string()
                } else {
                    format!("{:02x}", byte)
                }
            })
            .collect();

        let spacer = "    ";
        let state = &self.state;
        format!(
            "(TreadmillState){spacer}{:?} mph{spacer}{:?}% incline{spacer}{:.3} miles{spacer}{:4} seconds{spacer}Pulse:{:>3} bpm{spacer}{}",
            state.pace, state.incline, state.distance, state.timer, state.pulse, masked,
        )
    }
}

/// Parse assembled response data.
///
/// The data starts with three bytes of device info and a four-byte
/// little-endian response type; the remainder is the typed payload.
pub fn parse_response(data: &[u8]) -> Result<Response, ProtocolError> {
    if data.len() < 7 {
        return Ok(Response::Unknown(data.to_vec()));
    }

    let response_type = u32::from_le_bytes([data[3], data[4], data[5], data[6]]);
    if response_type == TREADMILL_STATE_TYPE {
        TreadmillStateResponse::parse(&data[7..]).map(Response::TreadmillState)
    } else {
        Ok(Response::Unknown(data[7..].to_vec()))
    }
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Pace is stored in 1/100 km/h; reported in mph with one decimal.
fn extract_pace(payload: &[u8]) -> f64 {
    let kmh = read_u16(payload, layout::PACE.start) as f64 / 100.0;
    round_to(kmh * KM_TO_MILES, 1)
}

/// Incline is stored in 1/100 percent; reported with one decimal.
fn extract_incline(payload: &[u8]) -> f64 {
    round_to(read_u16(payload, layout::INCLINE.start) as f64 / 100.0, 1)
}

/// Distance is stored in meters; reported in miles with three decimals.
fn extract_distance(payload: &[u8]) -> f64 {
    let km = read_u16(payload, layout::DISTANCE.start) as f64 / 1000.0;
    round_to(km * KM_TO_MILES, 3)
}
