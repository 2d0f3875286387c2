//! Session repository functions.

use sea_orm::ConnectionTrait;

use super::users::User;
use crate::adapters::sessions_sea as sessions_adapter;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    token: &str,
) -> Result<Session, DomainError> {
    let session = sessions_adapter::create(conn, user_id, token.to_string()).await?;
    Ok(Session::from(session))
}

pub async fn find_user_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<(Session, User)>, DomainError> {
    let row = sessions_adapter::find_with_user(conn, token).await?;
    Ok(row.map(|(session, user)| (Session::from(session), User::from(user))))
}

pub async fn delete_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<bool, DomainError> {
    Ok(sessions_adapter::delete_by_token(conn, token).await?)
}

impl From<crate::entities::sessions::Model> for Session {
    fn from(model: crate::entities::sessions::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            token: model.token,
            created_at: model.created_at,
        }
    }
}
