//! EAPOL/EAP protocol engine for SysuSurf
//!
//! This crate implements the supplicant side of the vendor-extended
//! 802.1X dialect spoken by H3C campus authenticators: raw frame
//! encoding/decoding, challenge responses, and the retry/restart state
//! machine that drives an authentication session over an unreliable link.
//!
//! ## Frame layout
//!
//! ```text
//! Ethernet Header (14 bytes)
//!   Dst: 01:80:C2:00:00:03 (PAE group address)
//!   Src: supplicant MAC
//!   EtherType: 0x888E
//! EAPOL Header (4 bytes)
//!   Version: 0x01
//!   Code: Packet/Start/LogOff/...
//!   Body Length: 2 bytes (network order)
//! EAP Frame (4+ bytes, only when EAPOL code = Packet)
//!   Code: Request/Response/Success/Failure/LoginMessage
//!   Identifier: 1 byte (echoed in responses)
//!   Length: 2 bytes (network order)
//!   Method + Data: variable (Request/Response only)
//! ```

pub mod challenge;
pub mod constants;
pub mod h3c;
pub mod packet;
pub mod ruijie;
pub mod session;
pub mod supplicant;
pub mod worker;

// Re-export commonly used types
pub use challenge::H3cResponder;
pub use h3c::H3cSupplicant;
pub use packet::{EapCode, EapMethod, EapolCode};
pub use session::SessionState;
pub use supplicant::{for_config, Supplicant};
pub use worker::{WorkerConfig, WorkerControl};
