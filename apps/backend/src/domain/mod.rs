//! Domain layer: pure card-dealing types and helpers.

pub mod card;
