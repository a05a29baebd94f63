//! Treadmill communication over the iFit Bluetooth LE protocol.

pub mod ble;
pub mod ifit;
pub mod producer;
pub mod reader;
pub mod types;

pub use ble::{BluetoothPacketProducer, StopHandle};
pub use ifit::{parse_response, to_request_packets, Response, TreadmillStateRequest};
pub use producer::{FilePacketProducer, PacketProducer};
pub use reader::PacketReader;
pub use types::{ProtocolError, SensorError, TreadmillState};
