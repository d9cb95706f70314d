//! Storefront Domain Concerns

pub mod carts;
pub mod categories;
pub(crate) mod columns;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod users;
