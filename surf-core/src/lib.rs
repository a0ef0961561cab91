//! SysuSurf Core Library
//!
//! This crate provides the shared types, error handling, configuration
//! model and the link boundary trait for the SysuSurf 802.1X supplicant.

pub mod config;
pub mod error;
pub mod link;
pub mod types;

// Re-export commonly used types
pub use config::{Md5ChallengeMethod, SurfConfig};
pub use error::{Error, Result};
pub use link::Link;
pub use types::MacAddr;
