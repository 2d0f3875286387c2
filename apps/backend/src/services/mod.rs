pub mod cards;
pub mod squares;
pub mod themes;
pub mod users;
