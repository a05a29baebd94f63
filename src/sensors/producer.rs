//! Packet sources.
//!
//! A producer yields raw treadmill packets one at a time, in arrival order.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::sensors::types::SensorError;

/// Source of raw packets.
pub trait PacketProducer {
    /// Block until the next packet is available.
    ///
    /// Returns `Ok(None)` once the source is exhausted or closed.
    fn next_packet(&mut self) -> Result<Option<Vec<u8>>, SensorError>;
}

impl<P: PacketProducer + ?Sized> PacketProducer for Box<P> {
    fn next_packet(&mut self) -> Result<Option<Vec<u8>>, SensorError> {
        (**self).next_packet()
    }
}

/// Replays packets from a capture with one hex-encoded packet per line:
///
/// ```text
/// fe023204002c4600000000000000000000010000
/// 00120104022e042e020200000000000000000000
/// ```
///
/// Blank lines are skipped.
pub struct FilePacketProducer<R> {
    lines: io::Lines<R>,
    line_number: usize,
}

impl FilePacketProducer<BufReader<File>> {
    /// Open a capture file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SensorError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::info!("Reading packets from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> FilePacketProducer<R> {
    /// Read packets from any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> PacketProducer for FilePacketProducer<R> {
    fn next_packet(&mut self) -> Result<Option<Vec<u8>>, SensorError> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let packet = hex::decode(trimmed).map_err(|source| SensorError::InvalidHex {
                line: self.line_number,
                source,
            })?;
            return Ok(Some(packet));
        }
        Ok(None)
    }
}
