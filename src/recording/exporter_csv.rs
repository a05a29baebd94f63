//! CSV recording of treadmill state.
//!
//! One row per state response, in the column order
//! `incline,pace,distance,timer`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::recording::types::ExportError;
use crate::sensors::types::TreadmillState;

/// Column header written first in every file.
pub const CSV_HEADER: &str = "incline,pace,distance,timer";

/// File name for a recording started at `started_at`, e.g. `20240131_184502.csv`.
pub fn recording_file_name(started_at: DateTime<Local>) -> String {
    format!("{}.csv", started_at.format("%Y%m%d_%H%M%S"))
}

/// Writes treadmill states as CSV rows.
pub struct TreadmillCsvWriter<W: Write> {
    output: W,
    rows: usize,
}

impl TreadmillCsvWriter<BufWriter<File>> {
    /// Create a new timestamped file in `dir`.
    ///
    /// Returns the writer and the path of the created file.
    pub fn create_in_dir(dir: &Path) -> Result<(Self, PathBuf), ExportError> {
        if !dir.is_dir() {
            return Err(ExportError::DirectoryNotFound(dir.display().to_string()));
        }

        let path = dir.join(recording_file_name(Local::now()));
        let file =
            File::create(&path).map_err(|e| ExportError::FileCreationFailed(e.to_string()))?;

        tracing::info!("Recording treadmill state to {}", path.display());
        Ok((Self::new(BufWriter::new(file))?, path))
    }
}

impl<W: Write> TreadmillCsvWriter<W> {
    /// Wrap `output` and write the header row.
    pub fn new(mut output: W) -> Result<Self, ExportError> {
        writeln!(output, "{}", CSV_HEADER).map_err(|e| ExportError::WriteFailed(e.to_string()))?;
        Ok(Self { output, rows: 0 })
    }

    /// Append one state row and flush it.
    pub fn write_state(&mut self, state: &TreadmillState) -> Result<(), ExportError> {
        writeln!(
            self.output,
            "{:?},{:?},{:?},{}",
            state.incline, state.pace, state.distance, state.timer
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

        // Rows must survive the process being interrupted.
        self.output
            .flush()
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

        self.rows += 1;
        Ok(())
    }

    /// Number of rows written, excluding the header.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Consume the writer, returning the underlying output.
    pub fn into_inner(self) -> W {
        self.output
    }
}
