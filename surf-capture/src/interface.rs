//! Network interface enumeration and information

use pnet_datalink::NetworkInterface;
use surf_core::{Error, MacAddr, Result};

/// Information about a network interface
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface name (e.g., "eth0", "en0")
    pub name: String,
    /// Human-readable description (empty on most Unix platforms)
    pub description: String,
    /// MAC address if available
    pub mac: Option<MacAddr>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether the interface is a loopback
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for InterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        let mac = iface
            .mac
            .map(|mac| MacAddr([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]));

        InterfaceInfo {
            name: iface.name.clone(),
            description: iface.description.clone(),
            mac,
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

/// List all available network interfaces
pub fn list_interfaces() -> Vec<InterfaceInfo> {
    pnet_datalink::interfaces()
        .iter()
        .map(InterfaceInfo::from)
        .collect()
}

/// Get an interface by name
///
/// The error message carries the available device table so a mistyped
/// device name is diagnosable straight from the log.
pub fn get_interface(name: &str) -> Result<InterfaceInfo> {
    let interfaces = list_interfaces();
    interfaces
        .iter()
        .find(|i| i.name == name)
        .cloned()
        .ok_or_else(|| Error::DeviceNotFound {
            name: name.to_string(),
            available: available_devices_message(&interfaces),
        })
}

/// Render the device table shown in `DeviceNotFound` errors and by the
/// `interfaces` command.
pub fn available_devices_message(interfaces: &[InterfaceInfo]) -> String {
    if interfaces.is_empty() {
        return "No available network devices.".to_string();
    }

    let mut message = String::from("Available devices:\nDevice Name (Device Description)");
    for iface in interfaces {
        let mac = iface
            .mac
            .map(|m| m.to_string())
            .unwrap_or_else(|| "no mac".to_string());
        message.push_str(&format!("\n{} ({}) [{}]", iface.name, iface.description, mac));
    }
    message
}
