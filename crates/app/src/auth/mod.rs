//! Authentication

mod errors;
mod password;
mod records;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use password::*;
pub use records::*;
pub use service::*;
pub use token::*;
