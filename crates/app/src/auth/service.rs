//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        AuthServiceError, IssuedSession, SessionTokenVersion, SessionUuid, format_session_token,
        generate_session_token_secret, hash_session_token, parse_session_uuid,
        check_credentials, repository::PgAuthRepository, run_blocking,
    },
    database::Db,
    domain::users::{data::normalise_email, records::UserUuid},
};

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            session_ttl,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(name = "auth.service.login", skip_all, err)]
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_email(&mut tx, &normalise_email(email))
            .await?;

        let verified = run_blocking({
            let password = password.to_string();
            let stored_hash = credentials
                .as_ref()
                .map(|credentials| credentials.password_hash.clone());
            move || check_credentials(&password, stored_hash.as_deref())
        })
        .await?;

        let Some(credentials) = credentials.filter(|_| verified) else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        let session_uuid = SessionUuid::new();
        let secret = generate_session_token_secret();
        let token = format_session_token(
            session_uuid.into_uuid(),
            SessionTokenVersion::V1,
            &secret,
        );

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::InvalidExpiry)?;

        let session = self
            .repository
            .create_session(
                &mut tx,
                session_uuid,
                credentials.user_uuid,
                &hash_session_token(&token),
                expires_at,
            )
            .await?;

        tx.commit().await?;

        info!(
            user_uuid = %session.user_uuid,
            session_uuid = %session.uuid,
            "issued session"
        );

        Ok(IssuedSession { token, session })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let Ok(session_uuid) = parse_session_uuid(bearer_token) else {
            return Err(AuthServiceError::NotFound);
        };

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .touch_active_session(
                &mut tx,
                SessionUuid::from_uuid(session_uuid),
                &hash_session_token(bearer_token),
            )
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Ok(session.user_uuid)
    }

    #[tracing::instrument(name = "auth.service.logout", skip_all, err)]
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let Ok(session_uuid) = parse_session_uuid(bearer_token) else {
            return Err(AuthServiceError::NotFound);
        };

        let session = SessionUuid::from_uuid(session_uuid);

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .revoke_session(&mut tx, session, &hash_session_token(bearer_token))
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        info!(session_uuid = %session, "revoked session");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges an email and password for a new session token.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolves a bearer token to the user that owns its session.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;

    /// Revokes the session behind a bearer token.
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError>;
}
