pub mod sessions;
pub mod squares;
pub mod squares_themes;
pub mod themes;
pub mod users;

pub use sessions::Entity as Sessions;
pub use squares::Entity as Squares;
pub use squares_themes::Entity as SquaresThemes;
pub use themes::Entity as Themes;
pub use users::Entity as Users;
