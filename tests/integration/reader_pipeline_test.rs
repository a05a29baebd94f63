//! Integration tests for the capture → response → CSV pipeline.

use std::fs;

use nongofit::recording::{TreadmillCsvWriter, CSV_HEADER};
use nongofit::sensors::ifit::{parse_response, Response};
use nongofit::sensors::{FilePacketProducer, PacketReader, SensorError};
use tempfile::TempDir;

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

#[test]
fn test_capture_file_to_csv() {
    let dir = TempDir::new().unwrap();
    let capture_path = dir.path().join("packets.txt");
    fs::write(&capture_path, CAPTURE).unwrap();

    let mut producer = FilePacketProducer::open(&capture_path).unwrap();
    let mut reader = PacketReader::new();
    let (mut writer, csv_path) = TreadmillCsvWriter::create_in_dir(dir.path()).unwrap();

    while let Some(data) = reader.next_response(&mut producer).unwrap() {
        if let Response::TreadmillState(response) = parse_response(&data).unwrap() {
            writer.write_state(&response.state).unwrap();
        }
    }
    assert_eq!(writer.rows_written(), 2);
    drop(writer);

    let file_name = csv_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.ends_with(".csv"));
    assert_eq!(file_name.len(), "20240131_184502.csv".len());

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec![CSV_HEADER, "3.0,1.0,1.964,5954", "3.0,1.0,1.965,5955"]);
}

#[test]
fn test_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(TreadmillCsvWriter::create_in_dir(&missing).is_err());
}

#[test]
fn test_missing_capture_file() {
    let dir = TempDir::new().unwrap();
    let result = FilePacketProducer::open(dir.path().join("missing.txt"));
    assert!(matches!(result, Err(SensorError::Io(_))));
}
