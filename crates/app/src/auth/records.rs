//! Session records.

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// A login session persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: SessionRecord,
}

/// Stored credentials looked up during login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user_uuid: UserUuid,
    pub password_hash: String,
}
