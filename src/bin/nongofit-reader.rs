//! NongoFit reader.
//!
//! Reads the Bluetooth LE output of an iFit treadmill (NordicTrack T series)
//! and writes decoded treadmill state as CSV.
//!
//! ```text
//! nongofit-reader --treadmill-address <MAC> --output-directory /some/path
//! nongofit-reader --input-file packets.txt --debug
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nongofit::recording::TreadmillCsvWriter;
use nongofit::sensors::{
    parse_response, BluetoothPacketProducer, FilePacketProducer, PacketProducer, PacketReader,
    Response,
};
use nongofit::storage::config;

#[derive(Debug, Parser)]
#[command(
    name = "nongofit-reader",
    version,
    about = "Process the Bluetooth LE output of a NordicTrack T Series treadmill"
)]
#[command(group(ArgGroup::new("input").required(true).args(["treadmill_address", "input_file"])))]
struct Args {
    /// MAC address of the treadmill to connect to
    #[arg(long)]
    treadmill_address: Option<String>,

    /// File of hex-encoded packets, one per line; mostly useful for debugging
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Directory for the output file, named YYYYmmdd_HHMMSS.csv; nothing is written if unset
    #[arg(long)]
    output_directory: Option<PathBuf>,

    /// Print each treadmill state to stdout
    #[arg(long)]
    debug: bool,

    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load_config().unwrap_or_else(|e| {
            tracing::warn!("Using default configuration: {}", e);
            config::AppConfig::default()
        }),
    };

    let mut csv = match &args.output_directory {
        Some(dir) => Some(TreadmillCsvWriter::create_in_dir(dir)?.0),
        None => None,
    };

    if let Some(path) = &args.input_file {
        let mut producer = FilePacketProducer::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        return process(&mut producer, csv.as_mut(), args.debug);
    }

    let address = args
        .treadmill_address
        .as_deref()
        .context("Either --treadmill-address or --input-file is required")?;

    let runtime = tokio::runtime::Runtime::new()?;
    let mut producer =
        runtime.block_on(BluetoothPacketProducer::connect(address, &settings.treadmill))?;

    let stop = producer.stop_handle();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received stop command - workout complete!");
            stop.stop();
        }
    });

    let result = process(&mut producer, csv.as_mut(), args.debug);
    runtime.block_on(producer.shutdown());
    result
}

/// Read responses until the producer is exhausted, recording treadmill states.
fn process<P, W>(
    producer: &mut P,
    mut csv: Option<&mut TreadmillCsvWriter<W>>,
    debug: bool,
) -> anyhow::Result<()>
where
    P: PacketProducer + ?Sized,
    W: std::io::Write,
{
    let mut reader = PacketReader::new();

    while let Some(data) = reader.next_response(producer)? {
        let response = match parse_response(&data) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Skipping response: {}", e);
                continue;
            }
        };

        match response {
            Response::TreadmillState(state) => {
                if debug {
                    println!("{}", state.debug_string());
                }
                if let Some(csv) = csv.as_deref_mut() {
                    csv.write_state(&state.state)?;
                }
            }
            Response::Unknown(raw) => {
                tracing::debug!("Unknown response: {}", hex::encode(raw));
            }
        }
    }

    Ok(())
}
