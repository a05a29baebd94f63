//! Treadmill data types and errors.

use thiserror::Error;

/// Treadmill state decoded from a state response.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TreadmillState {
    /// Belt speed in mph (one decimal)
    pub pace: f64,
    /// Incline in percent (one decimal)
    pub incline: f64,
    /// Distance in miles (three decimals)
    pub distance: f64,
    /// Workout timer in seconds
    pub timer: u16,
    /// Pulse in bpm
    pub pulse: u8,
    /// Whether the pulse grips are reporting
    pub pulse_enabled: bool,
}

/// Framing and decoding errors for the treadmill wire protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Tried to encode an empty request
    #[error("Cannot send empty request data")]
    EmptyRequest,

    /// Request does not fit the one-byte size field
    #[error("Request data too large: {0} bytes")]
    RequestTooLarge(usize),

    /// Packet shorter than its framing requires
    #[error("Packet too short: {0} bytes")]
    TruncatedPacket(usize),

    /// Header tag differs from the one announced by the previous sequence
    #[error("Sequence number mismatch: expected {expected}, got {actual}")]
    SequenceMismatch { expected: String, actual: String },

    /// Intermediate packet index out of order
    #[error("Packet out of order: expected index {expected}, got {actual}")]
    OutOfOrder { expected: i16, actual: u8 },

    /// End packet arrived with the wrong number of packets outstanding
    #[error("Unexpected number of packets: {0} remaining")]
    UnexpectedPacketCount(i16),

    /// Response payload too short for the fields it must contain
    #[error("Response too short: need {needed} bytes, got {actual}")]
    TruncatedResponse { needed: usize, actual: usize },
}

/// Errors from treadmill connections and packet sources.
#[derive(Debug, Error)]
pub enum SensorError {
    /// BLE adapter not found or unavailable
    #[error("Bluetooth adapter not found")]
    AdapterNotFound,

    /// Failed to start BLE scanning
    #[error("Failed to start scanning: {0}")]
    ScanFailed(String),

    /// Treadmill not found with given address
    #[error("Treadmill not found: {0}")]
    SensorNotFound(String),

    /// Connection to treadmill failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A required characteristic was not advertised
    #[error("Characteristic not found: {0}")]
    CharacteristicNotFound(uuid::Uuid),

    /// Failed to subscribe to notifications
    #[error("Failed to subscribe to notifications: {0}")]
    SubscriptionFailed(String),

    /// Failed to write to a characteristic
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Generic BLE error
    #[error("BLE error: {0}")]
    BleError(String),

    /// Malformed hex line in a packet capture
    #[error("Invalid hex on line {line}: {source}")]
    InvalidHex {
        line: usize,
        #[source]
        source: hex::FromHexError,
    },

    /// Wire protocol violation
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// IO failure reading a capture
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
