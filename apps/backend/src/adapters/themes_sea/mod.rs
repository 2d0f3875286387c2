//! SeaORM adapter for themes.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::squares_sea::contains_pattern;
use crate::entities::{squares_themes, themes};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<themes::Model>, sea_orm::DbErr> {
    themes::Entity::find_by_id(id).one(conn).await
}

/// Themes whose id is in `ids`; missing ids are simply absent.
pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<themes::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    themes::Entity::find()
        .filter(themes::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(themes::Column::Id)
        .all(conn)
        .await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name_contains: Option<&str>,
) -> Result<Vec<themes::Model>, sea_orm::DbErr> {
    let mut query = themes::Entity::find();
    if let Some(needle) = name_contains {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(themes::Column::Name)))
                .like(LikeExpr::new(contains_pattern(needle)).escape('\\')),
        );
    }
    query.order_by_asc(themes::Column::Id).all(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
) -> Result<themes::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    themes::ActiveModel {
        id: NotSet,
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn rename<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    name: String,
) -> Result<Option<themes::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, id).await? else {
        return Ok(None);
    };
    let mut active: themes::ActiveModel = existing.into();
    active.name = Set(name);
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(conn).await.map(Some)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, sea_orm::DbErr> {
    squares_themes::Entity::delete_many()
        .filter(squares_themes::Column::ThemeId.eq(id))
        .exec(conn)
        .await?;
    let res = themes::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected > 0)
}
