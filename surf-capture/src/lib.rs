//! Packet capture library for SysuSurf
//!
//! This crate wraps pcap into the single-owner link device the
//! authentication worker polls, and exposes interface enumeration for
//! device selection and diagnostics.

pub mod device;
pub mod filters;
pub mod interface;

// Re-export main types
pub use device::EapolDevice;
pub use interface::{get_interface, list_interfaces, InterfaceInfo};
