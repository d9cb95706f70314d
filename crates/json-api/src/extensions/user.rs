//! Authenticated user depot helpers.

use salvo::prelude::{Depot, StatusError};
use storefront_app::domain::users::records::UserUuid;

/// Stores and retrieves the user resolved by the bearer middleware.
pub(crate) trait UserDepotExt {
    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl UserDepotExt for Depot {
    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.inject(user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.obtain::<UserUuid>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.user_uuid_or_401().err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn inserted_user_round_trips() {
        let user = UserUuid::from_uuid(Uuid::nil());
        let mut depot = Depot::new();

        depot.insert_user_uuid(user);

        assert_eq!(depot.user_uuid_or_401().ok(), Some(user));
    }
}
