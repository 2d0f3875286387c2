//! DTOs for users_sea adapter.

/// DTO for registering a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

impl UserCreate {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            password_hash: password_hash.into(),
        }
    }
}
