//! Credential-bearing response payloads for the H3C dialect
//!
//! Stateless given the configured credentials: each method takes the
//! server-provided inputs and yields the payload the Frame Codec wraps
//! into an EAP Response.

use md5::{Digest, Md5};
use surf_core::{Error, Md5ChallengeMethod, Result};

use crate::constants::{MAX_PASSWORD_LEN, MD5_CHALLENGE_LEN, VERSION_INFO};

/// Builds Identity, H3C and MD5-Challenge response payloads.
#[derive(Debug, Clone)]
pub struct H3cResponder {
    username: Vec<u8>,
    /// Truncated to at most 16 bytes, as the dialect requires
    password: Vec<u8>,
    /// Password zero-padded to exactly 16 bytes, the XOR key
    padded_password: [u8; MAX_PASSWORD_LEN],
    md5_method: Md5ChallengeMethod,
}

impl H3cResponder {
    pub fn new(username: &str, password: &str, md5_method: Md5ChallengeMethod) -> Self {
        let username = username.as_bytes().to_vec();
        let mut password = password.as_bytes().to_vec();
        password.truncate(MAX_PASSWORD_LEN);

        let mut padded_password = [0u8; MAX_PASSWORD_LEN];
        padded_password[..password.len()].copy_from_slice(&password);

        Self {
            username,
            password,
            padded_password,
            md5_method,
        }
    }

    /// Identity response payload: version blob followed by the username
    pub fn identity_response(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(VERSION_INFO.len() + self.username.len());
        payload.extend_from_slice(VERSION_INFO);
        payload.extend_from_slice(&self.username);
        payload
    }

    /// H3C vendor response payload: password length, password, username
    pub fn h3c_response(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(1 + self.password.len() + self.username.len());
        payload.push(self.password.len() as u8);
        payload.extend_from_slice(&self.password);
        payload.extend_from_slice(&self.username);
        payload
    }

    /// MD5-Challenge response payload: digest length, digest, username.
    ///
    /// The server challenge must be exactly 16 bytes; anything else means
    /// the exchange is desynchronised and the caller must drop the frame.
    pub fn md5_response(&self, identifier: u8, challenge: &[u8]) -> Result<Vec<u8>> {
        if challenge.len() != MD5_CHALLENGE_LEN {
            return Err(Error::protocol(format!(
                "MD5 challenge must be {} bytes, got {}",
                MD5_CHALLENGE_LEN,
                challenge.len()
            )));
        }

        let digest: Vec<u8> = match self.md5_method {
            Md5ChallengeMethod::Xor => self
                .padded_password
                .iter()
                .zip(challenge)
                .map(|(p, c)| p ^ c)
                .collect(),
            Md5ChallengeMethod::Md5 => {
                let mut hasher = Md5::new();
                hasher.update([identifier]);
                hasher.update(&self.password);
                hasher.update(challenge);
                hasher.finalize().to_vec()
            }
        };

        let mut payload = Vec::with_capacity(1 + digest.len() + self.username.len());
        payload.push(digest.len() as u8);
        payload.extend_from_slice(&digest);
        payload.extend_from_slice(&self.username);
        Ok(payload)
    }
}
