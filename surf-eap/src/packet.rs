//! EAPOL and EAP frame construction and parsing
//!
//! Pure encode/decode, no protocol intelligence. Builders produce the
//! exact byte layout the H3C authenticator expects; the parser fails soft
//! (returns `None`) on anything short, truncated or unrecognised, because
//! on a shared segment stray frames are normal and never an error.

use bytes::{BufMut, BytesMut};
use surf_core::MacAddr;

use crate::constants::*;

/// EAPOL packet code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EapolCode {
    /// Carries an EAP frame in the body
    Packet,
    /// Supplicant initiates authentication
    Start,
    /// Supplicant logs off
    LogOff,
    /// Key exchange
    Key,
    /// Encapsulated ASF alert
    Asf,
    /// Ruijie proprietary keep-alive
    VendorKeepAlive,
}

impl EapolCode {
    pub fn to_byte(self) -> u8 {
        match self {
            EapolCode::Packet => 0x00,
            EapolCode::Start => 0x01,
            EapolCode::LogOff => 0x02,
            EapolCode::Key => 0x03,
            EapolCode::Asf => 0x04,
            EapolCode::VendorKeepAlive => 0xBF,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(EapolCode::Packet),
            0x01 => Some(EapolCode::Start),
            0x02 => Some(EapolCode::LogOff),
            0x03 => Some(EapolCode::Key),
            0x04 => Some(EapolCode::Asf),
            0xBF => Some(EapolCode::VendorKeepAlive),
            _ => None,
        }
    }
}

/// EAP code, including the vendor LoginMessage extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EapCode {
    Request,
    Response,
    Success,
    Failure,
    /// Vendor extension: free-text message from the authenticator
    LoginMessage,
}

impl EapCode {
    pub fn to_byte(self) -> u8 {
        match self {
            EapCode::Request => 0x01,
            EapCode::Response => 0x02,
            EapCode::Success => 0x03,
            EapCode::Failure => 0x04,
            EapCode::LoginMessage => 0x0A,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(EapCode::Request),
            0x02 => Some(EapCode::Response),
            0x03 => Some(EapCode::Success),
            0x04 => Some(EapCode::Failure),
            0x0A => Some(EapCode::LoginMessage),
            _ => None,
        }
    }
}

/// EAP method type carried in Request/Response frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EapMethod {
    Identity,
    Notification,
    Nak,
    Md5,
    Otp,
    Gtc,
    /// Private method used by the H3C/SYSU authenticator to carry
    /// password and username directly
    H3c,
    Expanded,
    Experimental,
}

impl EapMethod {
    pub fn to_byte(self) -> u8 {
        match self {
            EapMethod::Identity => 0x01,
            EapMethod::Notification => 0x02,
            EapMethod::Nak => 0x03,
            EapMethod::Md5 => 0x04,
            EapMethod::Otp => 0x05,
            EapMethod::Gtc => 0x06,
            EapMethod::H3c => 0x07,
            EapMethod::Expanded => 0xFE,
            EapMethod::Experimental => 0xFF,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(EapMethod::Identity),
            0x02 => Some(EapMethod::Notification),
            0x03 => Some(EapMethod::Nak),
            0x04 => Some(EapMethod::Md5),
            0x05 => Some(EapMethod::Otp),
            0x06 => Some(EapMethod::Gtc),
            0x07 => Some(EapMethod::H3c),
            0xFE => Some(EapMethod::Expanded),
            0xFF => Some(EapMethod::Experimental),
            _ => None,
        }
    }
}

/// Build the 14-byte Ethernet header: dst, src, EtherType (network order)
pub fn ethernet_header(src: MacAddr, dst: MacAddr, ether_type: u16) -> [u8; ETHERNET_HEADER_SIZE] {
    let mut header = [0u8; ETHERNET_HEADER_SIZE];
    header[0..6].copy_from_slice(dst.as_bytes());
    header[6..12].copy_from_slice(src.as_bytes());
    header[12..14].copy_from_slice(&ether_type.to_be_bytes());
    header
}

/// Build an EAPOL frame: version, code, body length, body
pub fn eapol_frame(code: EapolCode, payload: &[u8]) -> Vec<u8> {
    let mut buffer = BytesMut::with_capacity(EAPOL_HEADER_SIZE + payload.len());
    buffer.put_u8(EAPOL_VERSION);
    buffer.put_u8(code.to_byte());
    buffer.put_u16(payload.len() as u16);
    buffer.put_slice(payload);
    buffer.to_vec()
}

/// Build an EAP frame.
///
/// Success and Failure are fixed 4-byte frames; `method` and `data` are
/// ignored for them. Everything else carries the method byte and data,
/// with the length field covering the whole frame.
pub fn eap_frame(code: EapCode, identifier: u8, method: EapMethod, data: &[u8]) -> Vec<u8> {
    match code {
        EapCode::Success | EapCode::Failure => {
            let mut buffer = BytesMut::with_capacity(EAP_HEADER_SIZE);
            buffer.put_u8(code.to_byte());
            buffer.put_u8(identifier);
            buffer.put_u16(EAP_HEADER_SIZE as u16);
            buffer.to_vec()
        }
        _ => {
            let length = EAP_HEADER_SIZE + 1 + data.len();
            let mut buffer = BytesMut::with_capacity(length);
            buffer.put_u8(code.to_byte());
            buffer.put_u8(identifier);
            buffer.put_u16(length as u16);
            buffer.put_u8(method.to_byte());
            buffer.put_slice(data);
            buffer.to_vec()
        }
    }
}

/// A successfully parsed inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedFrame {
    pub eapol_code: EapolCode,
    /// Present only when `eapol_code` is `Packet`
    pub eap: Option<EapFrame>,
}

/// The EAP frame embedded in an EAPOL-Packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EapFrame {
    pub code: EapCode,
    pub identifier: u8,
    /// Declared length from the EAP header
    pub length: u16,
    /// `None` for codes without a method byte, or when the method value
    /// is unknown (such frames are ignored by the worker)
    pub method: Option<EapMethod>,
    /// Method data. For Request/Response this is clamped to the declared
    /// EAP length; for LoginMessage it is the raw payload from the method
    /// offset onward (the message text starts four bytes in).
    pub data: Vec<u8>,
}

/// Parse a raw captured frame.
///
/// Returns `None` for anything that should be silently dropped: frames
/// shorter than Ethernet + EAPOL + EAP headers, unknown EAPOL or EAP
/// codes, or a Request/Response with no room for its method byte.
pub fn parse_received(raw: &[u8]) -> Option<ReceivedFrame> {
    if raw.len() < MIN_FRAME_SIZE {
        return None;
    }

    let buffer = &raw[ETHERNET_HEADER_SIZE..];
    let eapol_code = EapolCode::from_byte(buffer[1])?;
    if eapol_code != EapolCode::Packet {
        return Some(ReceivedFrame {
            eapol_code,
            eap: None,
        });
    }

    let code = EapCode::from_byte(buffer[4])?;
    let identifier = buffer[5];
    let length = u16::from_be_bytes([buffer[6], buffer[7]]);

    let (method, data) = match code {
        EapCode::Request | EapCode::Response => {
            let method = EapMethod::from_byte(*buffer.get(8)?);
            // Clamp to both the declared EAP length and the actual buffer
            let end = buffer.len().min(EAPOL_HEADER_SIZE + length as usize);
            let data = if end > 9 {
                buffer[9..end].to_vec()
            } else {
                Vec::new()
            };
            (method, data)
        }
        EapCode::LoginMessage => (None, buffer[8..].to_vec()),
        EapCode::Success | EapCode::Failure => (None, Vec::new()),
    };

    Some(ReceivedFrame {
        eapol_code,
        eap: Some(EapFrame {
            code,
            identifier,
            length,
            method,
            data,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_header(eapol: Vec<u8>) -> Vec<u8> {
        let src = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let header = ethernet_header(src, PAE_GROUP_ADDRESS, EAPOL_ETHERTYPE);
        let mut raw = header.to_vec();
        raw.extend_from_slice(&eapol);
        raw
    }

    #[test]
    fn test_ethernet_header_layout() {
        let src = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let header = ethernet_header(src, PAE_GROUP_ADDRESS, EAPOL_ETHERTYPE);

        assert_eq!(&header[0..6], PAE_GROUP_ADDRESS.as_bytes());
        assert_eq!(&header[6..12], src.as_bytes());
        assert_eq!(u16::from_be_bytes([header[12], header[13]]), 0x888E);
    }

    #[test]
    fn test_eapol_start_frame() {
        let bytes = eapol_frame(EapolCode::Start, &[]);
        assert_eq!(bytes, vec![0x01, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_eapol_logoff_frame() {
        let bytes = eapol_frame(EapolCode::LogOff, &[]);
        assert_eq!(bytes, vec![0x01, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_eapol_packet_length_field() {
        let payload = vec![0xAA; 7];
        let bytes = eapol_frame(EapolCode::Packet, &payload);
        assert_eq!(bytes[1], 0x00);
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), 7);
        assert_eq!(&bytes[4..], &payload[..]);
    }

    #[test]
    fn test_eap_success_fixed_shape() {
        // Success is always [3, id, 0, 4], method and data are discarded
        let bytes = eap_frame(EapCode::Success, 9, EapMethod::Identity, b"ignored");
        assert_eq!(bytes, vec![0x03, 0x09, 0x00, 0x04]);
    }

    #[test]
    fn test_eap_failure_fixed_shape() {
        let bytes = eap_frame(EapCode::Failure, 1, EapMethod::Md5, &[1, 2, 3]);
        assert_eq!(bytes, vec![0x04, 0x01, 0x00, 0x04]);
    }

    #[test]
    fn test_eap_response_layout() {
        let bytes = eap_frame(EapCode::Response, 5, EapMethod::Identity, b"user");
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 5);
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), 9); // 5 + 4
        assert_eq!(bytes[4], 0x01);
        assert_eq!(&bytes[5..], b"user");
    }

    #[test]
    fn test_parse_roundtrip_request() {
        let eap = eap_frame(EapCode::Request, 42, EapMethod::Md5, &[0x10, 0xAB, 0xCD]);
        let raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));

        let received = parse_received(&raw).unwrap();
        assert_eq!(received.eapol_code, EapolCode::Packet);

        let frame = received.eap.unwrap();
        assert_eq!(frame.code, EapCode::Request);
        assert_eq!(frame.identifier, 42);
        assert_eq!(frame.method, Some(EapMethod::Md5));
        assert_eq!(frame.data, vec![0x10, 0xAB, 0xCD]);
    }

    #[test]
    fn test_parse_success_discards_payload() {
        let eap = eap_frame(EapCode::Success, 7, EapMethod::Identity, &[]);
        let raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));

        let frame = parse_received(&raw).unwrap().eap.unwrap();
        assert_eq!(frame.code, EapCode::Success);
        assert_eq!(frame.identifier, 7);
        assert_eq!(frame.method, None);
        assert!(frame.data.is_empty());
    }

    #[test]
    fn test_parse_short_frame_discarded() {
        assert_eq!(parse_received(&[]), None);
        assert_eq!(parse_received(&[0u8; 10]), None);
        assert_eq!(parse_received(&[0u8; MIN_FRAME_SIZE - 1]), None);
    }

    #[test]
    fn test_parse_unknown_eapol_code_discarded() {
        let mut raw = frame_with_header(eapol_frame(EapolCode::Start, &[]));
        raw.resize(MIN_FRAME_SIZE, 0);
        raw[15] = 0x77; // unknown EAPOL code
        assert_eq!(parse_received(&raw), None);
    }

    #[test]
    fn test_parse_unknown_eap_code_discarded() {
        let mut eap = eap_frame(EapCode::Request, 1, EapMethod::Identity, &[]);
        eap[0] = 0x66; // unknown EAP code
        let raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));
        assert_eq!(parse_received(&raw), None);
    }

    #[test]
    fn test_parse_non_packet_has_no_eap() {
        let mut raw = frame_with_header(eapol_frame(EapolCode::Start, &[]));
        raw.resize(MIN_FRAME_SIZE, 0);

        let received = parse_received(&raw).unwrap();
        assert_eq!(received.eapol_code, EapolCode::Start);
        assert_eq!(received.eap, None);
    }

    #[test]
    fn test_parse_clamps_to_declared_length() {
        // Declared EAP length of 8 = method byte + 3 data bytes, but the
        // capture buffer carries trailing padding beyond it
        let mut eap = eap_frame(EapCode::Request, 3, EapMethod::Md5, &[0xAA, 0xBB, 0xCC]);
        eap.extend_from_slice(&[0xFF; 16]);
        let raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));

        let frame = parse_received(&raw).unwrap().eap.unwrap();
        assert_eq!(frame.length, 8);
        assert_eq!(frame.data, vec![0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_parse_clamps_to_buffer() {
        // Declared length larger than what was actually captured
        let mut eap = eap_frame(EapCode::Request, 3, EapMethod::Md5, &[0xAA, 0xBB]);
        eap[3] = 200; // lie about the length
        let raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));

        let frame = parse_received(&raw).unwrap().eap.unwrap();
        assert_eq!(frame.data, vec![0xAA, 0xBB]);
    }

    #[test]
    fn test_parse_request_without_method_discarded() {
        // A Request whose frame ends right after the EAP header has no
        // room for the method byte
        let eap = vec![0x01, 0x05, 0x00, 0x04];
        let raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));
        assert_eq!(raw.len(), MIN_FRAME_SIZE);
        assert_eq!(parse_received(&raw), None);
    }

    #[test]
    fn test_parse_unknown_method_kept() {
        let eap = eap_frame(EapCode::Request, 2, EapMethod::Experimental, &[]);
        let mut raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));
        raw[ETHERNET_HEADER_SIZE + 8] = 0x55; // not a known method

        let frame = parse_received(&raw).unwrap().eap.unwrap();
        assert_eq!(frame.method, None);
    }

    #[test]
    fn test_parse_login_message_payload() {
        // LoginMessage text starts four bytes into the payload; built
        // through eap_frame that is the method byte plus three filler bytes
        let mut payload = vec![0x00, 0x00, 0x00];
        payload.extend_from_slice("welcome".as_bytes());
        let eap = eap_frame(EapCode::LoginMessage, 5, EapMethod::Notification, &payload);
        let raw = frame_with_header(eapol_frame(EapolCode::Packet, &eap));

        let frame = parse_received(&raw).unwrap().eap.unwrap();
        assert_eq!(frame.code, EapCode::LoginMessage);
        assert_eq!(&frame.data[4..], "welcome".as_bytes());
    }

    #[test]
    fn test_code_byte_roundtrip() {
        for code in [
            EapolCode::Packet,
            EapolCode::Start,
            EapolCode::LogOff,
            EapolCode::Key,
            EapolCode::Asf,
            EapolCode::VendorKeepAlive,
        ] {
            assert_eq!(EapolCode::from_byte(code.to_byte()), Some(code));
        }

        for code in [
            EapCode::Request,
            EapCode::Response,
            EapCode::Success,
            EapCode::Failure,
            EapCode::LoginMessage,
        ] {
            assert_eq!(EapCode::from_byte(code.to_byte()), Some(code));
        }

        for method in [
            EapMethod::Identity,
            EapMethod::Notification,
            EapMethod::Nak,
            EapMethod::Md5,
            EapMethod::Otp,
            EapMethod::Gtc,
            EapMethod::H3c,
            EapMethod::Expanded,
            EapMethod::Experimental,
        ] {
            assert_eq!(EapMethod::from_byte(method.to_byte()), Some(method));
        }
    }
}
