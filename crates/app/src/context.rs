//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        promotions::{PgPromotionsService, PromotionsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Database options for [`AppContext::connect`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub session_ttl: SignedDuration,
}

#[derive(Clone)]
pub struct AppContext {
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub carts: Arc<dyn CartsService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context, optionally migrating the schema first.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn connect(options: &AppOptions) -> Result<Self, AppInitError> {
        let pool = database::connect(&options.database_url, options.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if options.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::from_db(Db::new(pool), options.session_ttl))
    }

    #[must_use]
    pub fn from_db(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone(), session_ttl)),
            carts: Arc::new(PgCartsService::new(db.clone())),
            promotions: Arc::new(PgPromotionsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
        }
    }
}
