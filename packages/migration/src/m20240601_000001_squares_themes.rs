use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Squares {
    Table,
    Id,
    Text,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Themes {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SquaresThemes {
    Table,
    Id,
    SquareId,
    ThemeId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Squares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Squares::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Squares::Text).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Squares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Squares::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Themes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Themes::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Themes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Themes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Themes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SquaresThemes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SquaresThemes::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(SquaresThemes::SquareId).big_integer().not_null())
                    .col(ColumnDef::new(SquaresThemes::ThemeId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_squares_themes_square_id")
                            .from(SquaresThemes::Table, SquaresThemes::SquareId)
                            .to(Squares::Table, Squares::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_squares_themes_theme_id")
                            .from(SquaresThemes::Table, SquaresThemes::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A square carries each theme at most once
        manager
            .create_index(
                Index::create()
                    .name("ux_squares_themes_square_theme")
                    .table(SquaresThemes::Table)
                    .col(SquaresThemes::SquareId)
                    .col(SquaresThemes::ThemeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Theme-filtered sampling scans links by theme
        manager
            .create_index(
                Index::create()
                    .name("idx_squares_themes_theme_id")
                    .table(SquaresThemes::Table)
                    .col(SquaresThemes::ThemeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SquaresThemes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Themes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Squares::Table).to_owned())
            .await?;
        Ok(())
    }
}
