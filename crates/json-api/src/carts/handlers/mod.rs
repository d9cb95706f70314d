//! Cart Handlers

pub(crate) mod abandon;
pub(crate) mod active;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
