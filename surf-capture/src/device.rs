//! Capture device wrapper around pcap
//!
//! One `EapolDevice` owns one pcap handle for the lifetime of a session:
//! opened by the controller at start, polled by the worker, closed exactly
//! once at teardown.

use pcap::{Active, Capture, Device, Direction};
use surf_core::{Error, Link, MacAddr, Result};
use tracing::{debug, info};

use crate::interface;

/// Maximum bytes to capture per packet
const DEFAULT_SNAPLEN: i32 = 65535;

/// Receive poll timeout (milliseconds); the worker loop wakes at least
/// this often to check cancellation and the watchdog
const DEFAULT_TIMEOUT_MS: i32 = 1000;

/// A pcap capture handle restricted to inbound traffic.
pub struct EapolDevice {
    name: String,
    mac: MacAddr,
    capture: Option<Capture<Active>>,
}

impl EapolDevice {
    /// Open the named device for inbound-only capture.
    ///
    /// Fails if the device does not exist (the error carries the available
    /// device table) or carries no hardware address.
    pub fn open(name: &str) -> Result<Self> {
        let info = interface::get_interface(name)?;
        let mac = info.mac.ok_or_else(|| {
            Error::capture(format!("interface '{}' has no hardware address", name))
        })?;

        let device = Device::from(name);
        let capture = Capture::from_device(device)
            .map_err(|e| Error::capture(format!("failed to create capture: {}", e)))?
            .snaplen(DEFAULT_SNAPLEN)
            .timeout(DEFAULT_TIMEOUT_MS)
            .immediate_mode(true)
            .open()
            .map_err(|e| Error::capture(format!("failed to open capture: {}", e)))?;

        // Inbound only; frames we inject must not echo back into the worker
        capture
            .direction(Direction::In)
            .map_err(|e| Error::capture(format!("failed to set capture direction: {}", e)))?;

        info!(device = %name, mac = %mac, "opened capture device");

        Ok(Self {
            name: name.to_string(),
            mac,
            capture: Some(capture),
        })
    }

    /// Apply a BPF filter to the open capture
    pub fn set_filter(&mut self, bpf: &str) -> Result<()> {
        let capture = self.capture.as_mut().ok_or_else(Self::closed)?;
        capture
            .filter(bpf, true)
            .map_err(|e| Error::capture(format!("invalid BPF filter '{}': {}", bpf, e)))?;
        debug!(filter = %bpf, "applied BPF filter");
        Ok(())
    }

    /// Release the pcap handle. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(capture) = self.capture.take() {
            drop(capture);
            debug!(device = %self.name, "closed capture device");
        }
    }

    /// Whether the pcap handle is still held
    pub fn is_open(&self) -> bool {
        self.capture.is_some()
    }

    /// Device name this capture was opened on
    pub fn name(&self) -> &str {
        &self.name
    }

    fn closed() -> Error {
        Error::capture("capture device is closed")
    }
}

impl Link for EapolDevice {
    fn mac_address(&self) -> MacAddr {
        self.mac
    }

    fn send(&mut self, frame: &[u8]) -> Result<()> {
        let capture = self.capture.as_mut().ok_or_else(Self::closed)?;
        capture
            .sendpacket(frame)
            .map_err(|e| Error::Send(format!("failed to send frame: {}", e)))
    }

    fn receive_next(&mut self) -> Result<Option<Vec<u8>>> {
        let capture = self.capture.as_mut().ok_or_else(Self::closed)?;
        match capture.next_packet() {
            Ok(packet) => Ok(Some(packet.data.to_vec())),
            // Timeout is the normal idle case, the worker polls again
            Err(pcap::Error::TimeoutExpired) => Ok(None),
            Err(e) => Err(Error::capture(format!("receive failed: {}", e))),
        }
    }
}

impl Drop for EapolDevice {
    fn drop(&mut self) {
        self.close();
    }
}
