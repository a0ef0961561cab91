//! Supplicant configuration model
//!
//! Loaded once from a JSON file at startup and immutable for the process
//! lifetime. The dialect tag selects which authentication implementation
//! the session controller is built from.

use serde::Deserialize;

use crate::{Error, Result};

/// How the H3C MD5-Challenge response digest is computed.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Md5ChallengeMethod {
    /// XOR the zero-padded password with the server challenge
    #[default]
    Xor,
    /// Standard MD5 over identifier, password and challenge
    Md5,
}

/// Ruijie multicast addressing variant.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuijieGroupcastMode {
    #[default]
    Standard,
    Private,
    Saier,
}

/// When the Ruijie dialect renews its DHCP lease relative to authentication.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuijieDhcpMode {
    #[default]
    None,
    SecondAuth,
    AfterAuth,
    BeforeAuth,
}

/// Options for the H3C (SYSU campus) dialect.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct H3cConfig {
    pub username: String,
    pub password: String,
    /// Capture device name, e.g. "eth0"
    pub device: String,
    #[serde(default)]
    pub md5_method: Md5ChallengeMethod,
}

/// Options for the Ruijie dialect.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RuijieConfig {
    pub username: String,
    pub password: String,
    pub device: String,
    #[serde(default)]
    pub groupcast_mode: RuijieGroupcastMode,
    #[serde(default)]
    pub dhcp_mode: RuijieDhcpMode,
}

/// Top-level configuration, tagged by authentication dialect.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "dialect", rename_all = "lowercase")]
pub enum SurfConfig {
    H3c(H3cConfig),
    Ruijie(RuijieConfig),
}

impl SurfConfig {
    pub fn username(&self) -> &str {
        match self {
            SurfConfig::H3c(o) => &o.username,
            SurfConfig::Ruijie(o) => &o.username,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            SurfConfig::H3c(o) => &o.password,
            SurfConfig::Ruijie(o) => &o.password,
        }
    }

    pub fn device(&self) -> &str {
        match self {
            SurfConfig::H3c(o) => &o.device,
            SurfConfig::Ruijie(o) => &o.device,
        }
    }

    /// Reject configurations with missing credential fields before any
    /// worker is launched.
    pub fn validate(&self) -> Result<()> {
        if self.username().is_empty() {
            return Err(Error::config("username must not be empty"));
        }
        if self.password().is_empty() {
            return Err(Error::config("password must not be empty"));
        }
        if self.device().is_empty() {
            return Err(Error::config("device must not be empty"));
        }
        Ok(())
    }
}
