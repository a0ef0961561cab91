//! H3C (SYSU campus) session controller
//!
//! Thin start/stop surface over the authentication worker: `start` opens
//! the link inbound-only, installs the capture filter and launches the
//! supervisor on a blocking task; `stop` marks log-off, fires the
//! EAPOL-LogOff frame and signals cancellation. The link handle is
//! released exactly once, after the worker is gone.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use surf_capture::{filters, EapolDevice};
use surf_core::{config::H3cConfig, Error, Link, Result};

use crate::challenge::H3cResponder;
use crate::constants::{EAPOL_ETHERTYPE, ETHERNET_HEADER_SIZE, PAE_GROUP_ADDRESS};
use crate::packet::{self, EapolCode};
use crate::supplicant::Supplicant;
use crate::worker::{self, WorkerConfig, WorkerControl};

/// Session controller for the H3C dialect.
pub struct H3cSupplicant {
    options: H3cConfig,
    control: WorkerControl,
    device: Mutex<Option<Arc<Mutex<EapolDevice>>>>,
    header: Mutex<Option<[u8; ETHERNET_HEADER_SIZE]>>,
    handle: tokio::sync::Mutex<Option<JoinHandle<Result<()>>>>,
}

impl H3cSupplicant {
    /// Create the controller, failing fast if the configured device does
    /// not exist (before any worker is launched).
    pub fn new(options: H3cConfig) -> Result<Self> {
        surf_capture::get_interface(&options.device)?;

        Ok(Self {
            options,
            control: WorkerControl::new(),
            device: Mutex::new(None),
            header: Mutex::new(None),
            handle: tokio::sync::Mutex::new(None),
        })
    }
}

#[async_trait]
impl Supplicant for H3cSupplicant {
    fn dialect(&self) -> &'static str {
        "h3c"
    }

    async fn start(&self) -> Result<()> {
        let mut device = EapolDevice::open(&self.options.device)?;
        device.set_filter(&filters::eapol_filter())?;

        let header = packet::ethernet_header(
            device.mac_address(),
            PAE_GROUP_ADDRESS,
            EAPOL_ETHERTYPE,
        );
        let responder = H3cResponder::new(
            &self.options.username,
            &self.options.password,
            self.options.md5_method,
        );

        let link = Arc::new(Mutex::new(device));
        *self.device.lock() = Some(link.clone());
        *self.header.lock() = Some(header);

        let control = self.control.clone();
        let handle = tokio::task::spawn_blocking(move || {
            worker::run_supervisor(link, responder, header, control, WorkerConfig::default())
        });
        *self.handle.lock().await = Some(handle);

        info!(device = %self.options.device, "authentication session started");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.control.mark_log_off();

        let link = self.device.lock().clone();
        let header = *self.header.lock();
        if let (Some(link), Some(header)) = (link, header) {
            info!("send EAPOL log off");
            let mut frame = header.to_vec();
            frame.extend_from_slice(&packet::eapol_frame(EapolCode::LogOff, &[]));
            // Fire and forget; the peer confirms with a Failure the
            // worker observes on its own path
            if let Err(e) = link.lock().send(&frame) {
                warn!(error = %e, "failed to send EAPOL log off");
            }
        }

        self.control.cancel();
        Ok(())
    }

    async fn wait(&self) -> Result<()> {
        let mut guard = self.handle.lock().await;
        let result = match guard.as_mut() {
            Some(handle) => {
                let joined = handle.await;
                *guard = None;
                match joined {
                    Ok(inner) => inner,
                    Err(e) => Err(Error::Worker(format!("worker task failed: {}", e))),
                }
            }
            None => Ok(()),
        };
        drop(guard);

        if let Some(link) = self.device.lock().take() {
            link.lock().close();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(device: &str) -> H3cConfig {
        H3cConfig {
            username: "u".to_string(),
            password: "p".to_string(),
            device: device.to_string(),
            md5_method: Default::default(),
        }
    }

    #[test]
    fn test_new_rejects_missing_device() {
        let result = H3cSupplicant::new(options("surely-no-such-device-0"));
        assert!(matches!(result, Err(Error::DeviceNotFound { .. })));
    }
}
