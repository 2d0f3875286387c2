use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Link row between a square and one of its themes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "squares_themes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub square_id: i64,
    pub theme_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::squares::Entity",
        from = "Column::SquareId",
        to = "super::squares::Column::Id",
        on_delete = "Cascade"
    )]
    Square,
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::ThemeId",
        to = "super::themes::Column::Id",
        on_delete = "Cascade"
    )]
    Theme,
}

impl Related<super::squares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Square.def()
    }
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
