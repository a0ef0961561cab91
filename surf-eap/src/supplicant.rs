//! Dialect-independent session lifecycle contract

use async_trait::async_trait;

use surf_core::{Result, SurfConfig};

use crate::h3c::H3cSupplicant;
use crate::ruijie::RuijieSupplicant;

/// One authentication dialect driven through a common lifecycle.
///
/// External lifecycle code only sees this trait; which frame-building and
/// challenge-response strategy runs underneath is decided at
/// configuration-load time by [`for_config`].
#[async_trait]
pub trait Supplicant: Send + Sync {
    /// Dialect name used in log output
    fn dialect(&self) -> &'static str;

    /// Open the link, install the capture filter and launch the
    /// authentication worker. Fails if the link cannot be opened.
    async fn start(&self) -> Result<()>;

    /// Mark log-off, send EAPOL-LogOff best-effort and signal the worker
    /// to stop. Does not wait for the worker to drain.
    async fn stop(&self) -> Result<()>;

    /// Wait for the worker to finish and release the link
    async fn wait(&self) -> Result<()>;
}

/// Select the dialect implementation for a loaded configuration.
pub fn for_config(config: SurfConfig) -> Result<Box<dyn Supplicant>> {
    match config {
        SurfConfig::H3c(options) => Ok(Box::new(H3cSupplicant::new(options)?)),
        SurfConfig::Ruijie(options) => Ok(Box::new(RuijieSupplicant::new(options))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surf_core::Error;

    #[test]
    fn test_h3c_missing_device_fails_at_construction() {
        let config: SurfConfig = serde_json::from_str(
            r#"{"dialect": "h3c", "username": "u", "password": "p", "device": "surely-no-such-device-0"}"#,
        )
        .unwrap();

        match for_config(config) {
            Err(Error::DeviceNotFound { name, .. }) => {
                assert_eq!(name, "surely-no-such-device-0");
            }
            other => panic!("expected DeviceNotFound, got {:?}", other.map(|s| s.dialect())),
        }
    }

    #[tokio::test]
    async fn test_ruijie_stub_rejects_start() {
        let config: SurfConfig = serde_json::from_str(
            r#"{"dialect": "ruijie", "username": "u", "password": "p", "device": "eth0"}"#,
        )
        .unwrap();

        let supplicant = for_config(config).unwrap();
        assert_eq!(supplicant.dialect(), "ruijie");
        assert!(matches!(
            supplicant.start().await,
            Err(Error::NotSupported(_))
        ));
        // Stop and wait stay harmless on the stub
        assert!(supplicant.stop().await.is_ok());
        assert!(supplicant.wait().await.is_ok());
    }
}
