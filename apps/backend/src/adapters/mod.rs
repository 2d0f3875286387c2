//! SeaORM adapters. Functions return `DbErr`; repos translate.

pub mod sessions_sea;
pub mod squares_sea;
pub mod themes_sea;
pub mod users_sea;
