//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{hash_password, run_blocking},
    database::Db,
    domain::users::{
        data::{MIN_PASSWORD_CHARS, NewUser, normalise_email},
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    #[tracing::instrument(
        name = "users.service.register",
        skip(self, user),
        fields(user_uuid = %user.uuid),
        err
    )]
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let email = normalise_email(&user.email);

        if !email.contains('@') || user.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(UsersServiceError::InvalidData);
        }

        let password_hash = run_blocking({
            let password = user.password.clone();
            move || hash_password(&password)
        })
        .await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, user.uuid, &email, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %created.uuid, "registered user");

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Registers a customer account with a hashed password.
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;
}
