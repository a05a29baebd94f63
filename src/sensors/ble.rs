//! Bluetooth LE packet producer for iFit treadmills.
//!
//! Connects to the treadmill, subscribes to value updates and keeps asking
//! for the current state. Notifications are forwarded over a channel in
//! arrival order and consumed through [`PacketProducer`].

use std::time::Duration;

use btleplug::api::{
    Central, CentralEvent, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use crossbeam::channel::{Receiver, Sender};
use futures::stream::StreamExt;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::sensors::ifit::{TreadmillStateRequest, VALUE_REQUEST_UUID, VALUE_UPDATE_UUID};
use crate::sensors::producer::PacketProducer;
use crate::sensors::types::SensorError;
use crate::storage::config::TreadmillSettings;

/// Stops a [`BluetoothPacketProducer`] from another thread.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    /// Make the producer report end of stream on its next read.
    pub fn stop(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Packet producer backed by a live treadmill connection.
///
/// Must be created inside a tokio runtime; the notification and request
/// loops run as tasks on it. [`PacketProducer::next_packet`] blocks, so call
/// it from a thread that is not driving the runtime.
pub struct BluetoothPacketProducer {
    peripheral: Peripheral,
    packets: Receiver<Vec<u8>>,
    stop_tx: Sender<()>,
    stop_rx: Receiver<()>,
    notification_task: JoinHandle<()>,
    request_task: JoinHandle<()>,
}

impl BluetoothPacketProducer {
    /// Scan for the treadmill at `address`, connect and start polling it.
    ///
    /// `address` is matched against the peripheral's Bluetooth address and
    /// its platform id, ignoring case.
    pub async fn connect(address: &str, settings: &TreadmillSettings) -> Result<Self, SensorError> {
        tracing::info!("Connecting to treadmill: {}", address);

        let adapter = Self::first_adapter().await?;
        let peripheral = Self::find_peripheral(&adapter, address, settings.scan_timeout()).await?;

        peripheral
            .connect()
            .await
            .map_err(|e| SensorError::ConnectionFailed(e.to_string()))?;
        peripheral
            .discover_services()
            .await
            .map_err(|e| SensorError::ConnectionFailed(e.to_string()))?;

        let update_char = Self::characteristic(&peripheral, VALUE_UPDATE_UUID)?;
        let request_char = Self::characteristic(&peripheral, VALUE_REQUEST_UUID)?;

        peripheral
            .subscribe(&update_char)
            .await
            .map_err(|e| SensorError::SubscriptionFailed(e.to_string()))?;
        tracing::debug!("Subscribed to characteristic: {}", update_char.uuid);

        let requests = TreadmillStateRequest.to_packets()?;

        let (packet_tx, packets) = crossbeam::channel::unbounded();
        let (stop_tx, stop_rx) = crossbeam::channel::bounded(1);

        let notification_task = {
            let peripheral = peripheral.clone();
            tokio::spawn(async move {
                Self::forward_notifications(peripheral, packet_tx).await;
            })
        };

        let request_task = {
            let peripheral = peripheral.clone();
            let interval = settings.request_interval();
            tokio::spawn(async move {
                Self::request_updates(peripheral, request_char, requests, interval).await;
            })
        };

        tracing::info!("Connected to treadmill: {}", address);

        Ok(Self {
            peripheral,
            packets,
            stop_tx,
            stop_rx,
            notification_task,
            request_task,
        })
    }

    /// Handle for ending the stream from elsewhere (e.g. a Ctrl-C handler).
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.stop_tx.clone(),
        }
    }

    /// Stop polling and disconnect.
    pub async fn shutdown(self) {
        tracing::info!("Disconnecting from treadmill");

        self.request_task.abort();
        self.notification_task.abort();

        if let Err(e) = self.peripheral.disconnect().await {
            tracing::warn!("Failed to disconnect cleanly: {}", e);
        }
    }

    async fn first_adapter() -> Result<Adapter, SensorError> {
        let manager = Manager::new()
            .await
            .map_err(|e| SensorError::BleError(e.to_string()))?;

        let adapters = manager
            .adapters()
            .await
            .map_err(|e| SensorError::BleError(e.to_string()))?;

        adapters
            .into_iter()
            .next()
            .ok_or(SensorError::AdapterNotFound)
    }

    async fn find_peripheral(
        adapter: &Adapter,
        address: &str,
        scan_timeout: Duration,
    ) -> Result<Peripheral, SensorError> {
        let mut events = adapter
            .events()
            .await
            .map_err(|e| SensorError::BleError(e.to_string()))?;

        adapter
            .start_scan(ScanFilter::default())
            .await
            .map_err(|e| SensorError::ScanFailed(e.to_string()))?;

        let search = async {
            // Already known to the adapter from an earlier scan.
            if let Ok(peripherals) = adapter.peripherals().await {
                for peripheral in peripherals {
                    if Self::matches(&peripheral, address).await {
                        return Some(peripheral);
                    }
                }
            }

            while let Some(event) = events.next().await {
                let id = match event {
                    CentralEvent::DeviceDiscovered(id) | CentralEvent::DeviceUpdated(id) => id,
                    _ => continue,
                };
                if let Ok(peripheral) = adapter.peripheral(&id).await {
                    if Self::matches(&peripheral, address).await {
                        return Some(peripheral);
                    }
                }
            }
            None
        };

        let found = tokio::time::timeout(scan_timeout, search).await;

        if let Err(e) = adapter.stop_scan().await {
            tracing::warn!("Failed to stop scan: {}", e);
        }

        match found {
            Ok(Some(peripheral)) => Ok(peripheral),
            Ok(None) | Err(_) => Err(SensorError::SensorNotFound(address.to_string())),
        }
    }

    async fn matches(peripheral: &Peripheral, address: &str) -> bool {
        if peripheral.id().to_string().eq_ignore_ascii_case(address) {
            return true;
        }
        match peripheral.properties().await {
            Ok(Some(properties)) => properties.address.to_string().eq_ignore_ascii_case(address),
            _ => false,
        }
    }

    fn characteristic(peripheral: &Peripheral, uuid: Uuid) -> Result<Characteristic, SensorError> {
        peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.uuid == uuid)
            .ok_or(SensorError::CharacteristicNotFound(uuid))
    }

    async fn forward_notifications(peripheral: Peripheral, packet_tx: Sender<Vec<u8>>) {
        let mut notifications = match peripheral.notifications().await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!("Failed to get notification stream: {}", e);
                return;
            }
        };

        while let Some(notification) = notifications.next().await {
            if notification.uuid != VALUE_UPDATE_UUID {
                continue;
            }
            tracing::trace!("Packet: {}", hex::encode(&notification.value));
            if packet_tx.send(notification.value).is_err() {
                break;
            }
        }

        // Dropping the sender ends the stream for the reader.
        tracing::info!("Treadmill notification stream ended");
    }

    async fn request_updates(
        peripheral: Peripheral,
        request_char: Characteristic,
        packets: Vec<Vec<u8>>,
        period: Duration,
    ) {
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;
            for packet in &packets {
                if let Err(e) = peripheral
                    .write(&request_char, packet, WriteType::WithResponse)
                    .await
                {
                    tracing::warn!("{}", SensorError::WriteFailed(e.to_string()));
                    break;
                }
            }
        }
    }
}

impl PacketProducer for BluetoothPacketProducer {
    fn next_packet(&mut self) -> Result<Option<Vec<u8>>, SensorError> {
        crossbeam::channel::select! {
            recv(self.packets) -> packet => Ok(packet.ok()),
            recv(self.stop_rx) -> _ => Ok(None),
        }
    }
}

impl Drop for BluetoothPacketProducer {
    fn drop(&mut self) {
        self.request_task.abort();
        self.notification_task.abort();
    }
}
