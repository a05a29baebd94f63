//! Recording of treadmill state to disk.

pub mod exporter_csv;
pub mod types;

pub use exporter_csv::{recording_file_name, TreadmillCsvWriter, CSV_HEADER};
pub use types::ExportError;
