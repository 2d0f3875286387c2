pub mod auth_token;
pub mod card_query;
pub mod current_user;
pub mod path_id;
pub mod validated_json;

pub use auth_token::{AuthToken, SESSION_COOKIE};
pub use card_query::CardQuery;
pub use current_user::CurrentUser;
pub use path_id::PathId;
pub use validated_json::ValidatedJson;
