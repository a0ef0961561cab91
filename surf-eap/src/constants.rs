//! Protocol constants for the H3C EAPOL dialect

use std::time::Duration;
use surf_core::MacAddr;

/// 802.1X PAE (Port Access Entity) group MAC address, the destination of
/// every frame the supplicant sends
pub const PAE_GROUP_ADDRESS: MacAddr = MacAddr([0x01, 0x80, 0xC2, 0x00, 0x00, 0x03]);

/// EtherType for EAPOL frames
pub const EAPOL_ETHERTYPE: u16 = 0x888E;

/// EAPOL protocol version used on the wire
pub const EAPOL_VERSION: u8 = 0x01;

/// Ethernet header size (dst + src + EtherType)
pub const ETHERNET_HEADER_SIZE: usize = 14;

/// EAPOL header size (version + code + body length)
pub const EAPOL_HEADER_SIZE: usize = 4;

/// EAP header size (code + identifier + length)
pub const EAP_HEADER_SIZE: usize = 4;

/// Shortest frame the parser will look at: Ethernet header plus the
/// EAPOL and EAP headers. Anything shorter is silently discarded.
pub const MIN_FRAME_SIZE: usize = ETHERNET_HEADER_SIZE + EAPOL_HEADER_SIZE + EAP_HEADER_SIZE;

/// Server MD5 challenges are always exactly this long
pub const MD5_CHALLENGE_LEN: usize = 16;

/// The dialect caps passwords at 16 bytes; longer ones are truncated
pub const MAX_PASSWORD_LEN: usize = 16;

/// Client version identification blob sent ahead of the username in
/// Identity responses. Opaque to us; the authenticator checks it verbatim.
pub const VERSION_INFO: &[u8] = b"\x06\x07bjQ7SE8BZ3MqHhs3clMregcDY3Y=\x20\x20";

// ===== Retry policy defaults =====
//
// Empirically tuned against SYSU campus authenticators; see WorkerConfig.

/// Failures tolerated before a full session restart
pub const DEFAULT_RETRY_CEILING: u32 = 3;

/// Pause before restarting after exhausted retries
pub const DEFAULT_RESTART_BACKOFF: Duration = Duration::from_secs(5);

/// Silence from the authenticator after which the session is considered
/// stalled and restarted
pub const DEFAULT_WATCHDOG_TIMEOUT: Duration = Duration::from_secs(60);
