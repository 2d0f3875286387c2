//! SeaORM adapter for squares and their theme links.

use sea_orm::sea_query::{Expr, Func, LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{squares, squares_themes, themes};

pub mod dto;

pub use dto::{SquareCreate, SquareUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// `%needle%` for a case-insensitive LIKE, with `\`, `%` and `_` escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<squares::Model>, sea_orm::DbErr> {
    squares::Entity::find_by_id(id).one(conn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    text_contains: Option<&str>,
) -> Result<Vec<squares::Model>, sea_orm::DbErr> {
    let mut query = squares::Entity::find();
    if let Some(needle) = text_contains {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(squares::Column::Text)))
                .like(LikeExpr::new(contains_pattern(needle)).escape('\\')),
        );
    }
    query.order_by_asc(squares::Column::Id).all(conn).await
}

/// Up to `count` distinct squares in database-random order.
///
/// With `theme_ids`, only squares linked to at least one of them qualify.
/// The `IN (subquery)` filter keeps each square once however many of the
/// requested themes it carries.
pub async fn find_random<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    count: u64,
    theme_ids: Option<&[i64]>,
) -> Result<Vec<squares::Model>, sea_orm::DbErr> {
    let mut query = squares::Entity::find();
    if let Some(ids) = theme_ids {
        let linked = Query::select()
            .column(squares_themes::Column::SquareId)
            .from(squares_themes::Entity)
            .and_where(squares_themes::Column::ThemeId.is_in(ids.iter().copied()))
            .to_owned();
        query = query.filter(squares::Column::Id.in_subquery(linked));
    }
    query
        .order_by(Expr::cust("RANDOM()"), Order::Asc)
        .limit(count)
        .all(conn)
        .await
}

/// `(square_id, theme)` pairs for every link of the given squares.
pub async fn themes_for_squares<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    square_ids: &[i64],
) -> Result<Vec<(i64, themes::Model)>, sea_orm::DbErr> {
    if square_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = squares_themes::Entity::find()
        .filter(squares_themes::Column::SquareId.is_in(square_ids.iter().copied()))
        .find_also_related(themes::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(link, theme)| theme.map(|t| (link.square_id, t)))
        .collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SquareCreate,
) -> Result<squares::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let square = squares::ActiveModel {
        id: NotSet,
        text: Set(dto.text),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    insert_links(conn, square.id, &dto.theme_ids).await?;
    Ok(square)
}

/// Apply `dto`; `Ok(None)` when the square does not exist.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SquareUpdate,
) -> Result<Option<squares::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, dto.id).await? else {
        return Ok(None);
    };

    let mut active: squares::ActiveModel = existing.into();
    if let Some(text) = dto.text {
        active.text = Set(text);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    let updated = active.update(conn).await?;

    if let Some(theme_ids) = dto.theme_ids {
        delete_links(conn, updated.id).await?;
        insert_links(conn, updated.id, &theme_ids).await?;
    }
    Ok(Some(updated))
}

/// `true` when a row was removed.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, sea_orm::DbErr> {
    // Links go first so the delete does not depend on FK cascade being enabled.
    delete_links(conn, id).await?;
    let res = squares::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected > 0)
}

async fn delete_links<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    square_id: i64,
) -> Result<(), sea_orm::DbErr> {
    squares_themes::Entity::delete_many()
        .filter(squares_themes::Column::SquareId.eq(square_id))
        .exec(conn)
        .await?;
    Ok(())
}

async fn insert_links<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    square_id: i64,
    theme_ids: &[i64],
) -> Result<(), sea_orm::DbErr> {
    if theme_ids.is_empty() {
        return Ok(());
    }
    let links = theme_ids.iter().map(|&theme_id| squares_themes::ActiveModel {
        id: NotSet,
        square_id: Set(square_id),
        theme_id: Set(theme_id),
    });
    squares_themes::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
