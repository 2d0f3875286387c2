use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "themes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::squares_themes::Entity")]
    SquaresThemes,
}

impl Related<super::squares_themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SquaresThemes.def()
    }
}

impl Related<super::squares::Entity> for Entity {
    fn to() -> RelationDef {
        super::squares_themes::Relation::Square.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::squares_themes::Relation::Theme.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
