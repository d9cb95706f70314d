//! Auth Config

use clap::Args;
use jiff::SignedDuration;
use thiserror::Error;

/// Session lifetime was zero or too large.
#[derive(Debug, Error)]
#[error("session ttl must be a positive number of seconds, got {0}")]
pub struct SessionTtlError(u64);

/// Session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// How long an issued session token stays valid, in seconds
    #[arg(long, env = "SESSION_TTL_SECONDS", default_value_t = 86_400_u64)]
    pub session_ttl_seconds: u64,
}

impl AuthConfig {
    /// Session lifetime as a signed duration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is zero or does not fit.
    pub fn session_ttl(&self) -> Result<SignedDuration, SessionTtlError> {
        match i64::try_from(self.session_ttl_seconds) {
            Ok(seconds) if seconds > 0 => Ok(SignedDuration::from_secs(seconds)),
            _ => Err(SessionTtlError(self.session_ttl_seconds)),
        }
    }
}
