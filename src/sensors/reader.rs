//! Response reassembly.
//!
//! [`PacketReader`] strips framing from a stream of packets and yields the
//! concatenated data of each complete sequence. It knows nothing about what
//! the data means; see [`crate::sensors::ifit::parse_response`] for that.

use crate::sensors::ifit::{END_MARKER, HEADER_MARKER};
use crate::sensors::producer::PacketProducer;
use crate::sensors::types::{ProtocolError, SensorError};

/// Assembles packet sequences into response data.
///
/// Given the packets
///
/// ```text
/// fe02320402060406900208a46e0e005702b4002b
/// 00120104022e042e0202a0002c0171005b0c0000
/// 011200000001023203421700007a641f02b4002b
/// ff0e01790058028a760e008a760e003a02b4002b
/// ```
///
/// the reader yields `0104022e042e0202a0002c0171005b0c0000…`.
///
/// A framing violation drops the sequence in progress; everything up to the
/// next header packet is then ignored.
#[derive(Debug)]
pub struct PacketReader {
    packets_remaining: i16,
    last_packet_index: i16,
    current_data: Vec<u8>,
    /// Tag announced by the previous end packet; survives between sequences.
    sequence_tag: Option<Vec<u8>>,
    resyncing: bool,
}

impl Default for PacketReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketReader {
    pub fn new() -> Self {
        Self {
            packets_remaining: 0,
            last_packet_index: -1,
            current_data: Vec::new(),
            sequence_tag: None,
            resyncing: false,
        }
    }

    /// Whether packets are being skipped until the next header.
    pub fn is_resyncing(&self) -> bool {
        self.resyncing
    }

    /// Feed one packet.
    ///
    /// Returns the assembled data when `packet` completes a sequence.
    pub fn push(&mut self, packet: &[u8]) -> Result<Option<Vec<u8>>, ProtocolError> {
        let result = if packet.starts_with(&HEADER_MARKER) {
            self.resyncing = false;
            self.handle_header(packet).map(|_| None)
        } else if self.resyncing {
            tracing::trace!("Skipping packet while resyncing: {}", hex::encode(packet));
            return Ok(None);
        } else if packet.first() == Some(&END_MARKER) {
            self.handle_end(packet).map(Some)
        } else {
            self.handle_intermediate(packet).map(|_| None)
        };

        if result.is_err() {
            self.reset();
            self.sequence_tag = None;
            self.resyncing = true;
        }
        result
    }

    /// Pull packets from `producer` until a full response is assembled.
    ///
    /// Framing errors are logged and skipped. Returns `Ok(None)` once the
    /// producer is exhausted.
    pub fn next_response<P: PacketProducer + ?Sized>(
        &mut self,
        producer: &mut P,
    ) -> Result<Option<Vec<u8>>, SensorError> {
        while let Some(packet) = producer.next_packet()? {
            match self.push(&packet) {
                Ok(Some(data)) => return Ok(Some(data)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Dropping malformed sequence: {}", e),
            }
        }
        Ok(None)
    }

    fn reset(&mut self) {
        self.packets_remaining = 0;
        self.last_packet_index = -1;
        self.current_data.clear();
    }

    /// `FE 02 <size> <count> <tag…>`; carries no data.
    fn handle_header(&mut self, packet: &[u8]) -> Result<(), ProtocolError> {
        if packet.len() < 4 {
            return Err(ProtocolError::TruncatedPacket(packet.len()));
        }

        self.reset();
        self.packets_remaining = packet[3] as i16 - 1;

        let tag = &packet[4..];
        if let Some(expected) = &self.sequence_tag {
            if expected.as_slice() != tag {
                return Err(ProtocolError::SequenceMismatch {
                    expected: hex::encode(expected),
                    actual: hex::encode(tag),
                });
            }
        }
        Ok(())
    }

    /// `<index> <size> <data…>`; indices count up from zero.
    fn handle_intermediate(&mut self, packet: &[u8]) -> Result<(), ProtocolError> {
        if packet.len() < 2 {
            return Err(ProtocolError::TruncatedPacket(packet.len()));
        }

        let index = packet[0];
        let expected = self.last_packet_index + 1;
        if index as i16 != expected {
            return Err(ProtocolError::OutOfOrder {
                expected,
                actual: index,
            });
        }
        self.last_packet_index = expected;

        self.current_data.extend_from_slice(&packet[2..]);
        self.packets_remaining -= 1;
        Ok(())
    }

    /// `FF <size> <data…>`; bytes from offset 4 double as the next tag.
    fn handle_end(&mut self, packet: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        if packet.len() < 2 {
            return Err(ProtocolError::TruncatedPacket(packet.len()));
        }

        let end = (packet[1] as usize + 1).clamp(2, packet.len());
        self.current_data.extend_from_slice(&packet[2..end]);
        let next_tag = packet.get(4..).unwrap_or_default().to_vec();

        if self.packets_remaining != 1 {
            return Err(ProtocolError::UnexpectedPacketCount(self.packets_remaining));
        }

        self.sequence_tag = Some(next_tag);
        let data = std::mem::take(&mut self.current_data);
        self.reset();
        Ok(data)
    }
}
