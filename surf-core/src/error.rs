//! Error types for SysuSurf

use thiserror::Error;

/// Result type alias for supplicant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SysuSurf
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network device not found
    #[error("Network device '{name}' doesn't exist.\n{available}")]
    DeviceNotFound { name: String, available: String },

    /// Packet capture error
    #[error("Packet capture error: {0}")]
    Capture(String),

    /// Packet transmit error
    #[error("Packet send error: {0}")]
    Send(String),

    /// Protocol-level error
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Worker task error
    #[error("Worker error: {0}")]
    Worker(String),

    /// Authentication dialect not supported
    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl Error {
    /// Create a configuration error with a custom message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a capture error with a custom message
    pub fn capture<S: Into<String>>(msg: S) -> Self {
        Error::Capture(msg.into())
    }

    /// Create a protocol error with a custom message
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        Error::Protocol(msg.into())
    }
}
