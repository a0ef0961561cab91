//! BPF (Berkeley Packet Filter) filter builders

/// Filter for the authentication session: everything that is not
/// IP-stack traffic. EAPOL frames ride untagged outside the IP stack,
/// and some authenticators send them with non-standard EtherTypes, so
/// this is deliberately wider than a strict 0x888e match.
pub fn eapol_filter() -> String {
    "not (tcp or udp or arp or rarp or ip or ip6)".to_string()
}

/// Strict 802.1X (Port-based Network Access Control) filter
pub fn dot1x_filter() -> String {
    "ether proto 0x888e".to_string()
}
