//! Repository functions: domain models over the SeaORM adapters.

pub mod sessions;
pub mod squares;
pub mod themes;
pub mod users;
