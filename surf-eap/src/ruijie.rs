//! Ruijie dialect stub
//!
//! Kept as a selectable dialect so configuration and the controller
//! contract stay uniform; the protocol engine itself is not implemented.

use async_trait::async_trait;

use surf_core::{config::RuijieConfig, Error, Result};

use crate::supplicant::Supplicant;

/// Placeholder Ruijie session controller.
pub struct RuijieSupplicant {
    _options: RuijieConfig,
}

impl RuijieSupplicant {
    pub fn new(options: RuijieConfig) -> Self {
        Self { _options: options }
    }
}

#[async_trait]
impl Supplicant for RuijieSupplicant {
    fn dialect(&self) -> &'static str {
        "ruijie"
    }

    async fn start(&self) -> Result<()> {
        Err(Error::NotSupported(
            "Ruijie authentication is not implemented yet".to_string(),
        ))
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    async fn wait(&self) -> Result<()> {
        Ok(())
    }
}
