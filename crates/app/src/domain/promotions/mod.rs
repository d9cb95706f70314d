//! Promotions

pub mod data;
pub mod discounts;
mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::PromotionsServiceError;
pub use service::*;
