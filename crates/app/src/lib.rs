//! Storefront domain services, persistence and authentication.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;

#[cfg(test)]
mod test;

pub mod uuids;
