//! SeaORM adapter for login sessions.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::{sessions, users};

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    token: String,
) -> Result<sessions::Model, sea_orm::DbErr> {
    sessions::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        token: Set(token),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

/// Session row for `token` together with its owner.
pub async fn find_with_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<(sessions::Model, users::Model)>, sea_orm::DbErr> {
    let row = sessions::Entity::find()
        .filter(sessions::Column::Token.eq(token))
        .find_also_related(users::Entity)
        .one(conn)
        .await?;
    Ok(row.and_then(|(session, user)| user.map(|u| (session, u))))
}

pub async fn delete_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<bool, sea_orm::DbErr> {
    let res = sessions::Entity::delete_many()
        .filter(sessions::Column::Token.eq(token))
        .exec(conn)
        .await?;
    Ok(res.rows_affected > 0)
}
