//! Session token formatting and parsing.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionTokenSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionTokenSecret(**redacted**)")
    }
}

impl Drop for SessionTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_token_secret() -> SessionTokenSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionTokenSecret::from_bytes(secret)
}

/// Render a token as `sf_<version>_<session uuid>.<secret hex>`.
#[must_use]
pub fn format_session_token(
    session_uuid: Uuid,
    version: SessionTokenVersion,
    secret: &SessionTokenSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.simple(),
        encode_secret_hex(secret.as_bytes())
    )
}

/// Read the session identifier out of a bearer token, checking its shape.
///
/// The secret is only checked for length and hex encoding; the session row's
/// stored digest of the whole token is what authenticates it.
///
/// # Errors
///
/// Returns an error when the prefix, version, identifier or secret is malformed.
pub fn parse_session_uuid(token: &str) -> Result<Uuid, SessionTokenError> {
    let (prefix_and_id, secret_hex) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let session_uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    SessionTokenVersion::from_str(version_segment)?;

    let Ok(session_uuid) = Uuid::try_parse(session_uuid_segment) else {
        return Err(SessionTokenError::InvalidFormat);
    };

    if secret_hex.len() != SESSION_TOKEN_SECRET_HEX_CHARS
        || !secret_hex.bytes().all(|byte| byte.is_ascii_hexdigit())
    {
        return Err(SessionTokenError::InvalidSecretEncoding);
    }

    Ok(session_uuid)
}

/// SHA-256 hex digest of the full token, as persisted.
#[must_use]
pub fn hash_session_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

fn encode_secret_hex(secret: &[u8; SESSION_TOKEN_SECRET_BYTES]) -> String {
    secret.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_token_yields_its_session_uuid() {
        let session_uuid = Uuid::now_v7();
        let secret = SessionTokenSecret::from_bytes([0xAB; SESSION_TOKEN_SECRET_BYTES]);
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);

        assert!(token.starts_with("sf_v1_"), "unexpected token {token}");

        let parsed = parse_session_uuid(&token).expect("token should parse");

        assert_eq!(parsed, session_uuid);
        assert!(token.ends_with(&"ab".repeat(SESSION_TOKEN_SECRET_BYTES)));
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let result = parse_session_uuid("lt_v1_00000000000000000000000000000000.aa");

        assert!(
            matches!(result, Err(SessionTokenError::InvalidFormat)),
            "expected InvalidFormat, got {result:?}"
        );
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format!("sf_v9_{}.{}", Uuid::nil().simple(), "0".repeat(64));

        assert!(matches!(
            parse_session_uuid(&token),
            Err(SessionTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_or_non_hex_secret() {
        let short = format!("sf_v1_{}.abcd", Uuid::nil().simple());
        let non_hex = format!("sf_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        assert!(matches!(
            parse_session_uuid(&short),
            Err(SessionTokenError::InvalidSecretEncoding)
        ));
        assert!(matches!(
            parse_session_uuid(&non_hex),
            Err(SessionTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn parse_accepts_uppercase_hex_secret() {
        let token = format!("sf_v1_{}.{}", Uuid::nil().simple(), "AB".repeat(32));

        assert_eq!(parse_session_uuid(&token).ok(), Some(Uuid::nil()));
    }

    #[test]
    fn hash_is_stable_sha256_hex() {
        let hash = hash_session_token("sf_v1_token");

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_session_token("sf_v1_token"));
        assert_ne!(hash, hash_session_token("sf_v1_other"));
    }
}
