//! Link boundary between the protocol engine and the capture device

use crate::{MacAddr, Result};

/// A raw Ethernet link the authentication worker drives.
///
/// Sends are fire-and-forget: a successful return means the frame was
/// handed to the device, not that it was delivered. Receives are polled;
/// `Ok(None)` means nothing arrived within the device timeout.
pub trait Link: Send {
    /// Hardware address frames are sent from
    fn mac_address(&self) -> MacAddr;

    /// Transmit a raw frame, Ethernet header included
    fn send(&mut self, frame: &[u8]) -> Result<()>;

    /// Poll for the next inbound frame
    fn receive_next(&mut self) -> Result<Option<Vec<u8>>>;
}
