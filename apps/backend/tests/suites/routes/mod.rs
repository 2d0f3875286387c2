pub mod cards;
pub mod error_shape;
pub mod healthcheck;
pub mod squares;
pub mod themes;
pub mod trace;
pub mod users;
