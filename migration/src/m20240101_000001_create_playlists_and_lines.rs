use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Playlists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Playlists::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Playlists::UserId).string().not_null())
                    .col(ColumnDef::new(Playlists::Name).string().not_null())
                    .col(
                        ColumnDef::new(Playlists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The fitness engine loads every line of a user at once
        manager
            .create_index(
                Index::create()
                    .name("idx_playlists_user_id")
                    .table(Playlists::Table)
                    .col(Playlists::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Lines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lines::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Lines::PlaylistId).string().not_null())
                    .col(ColumnDef::new(Lines::Name).string().not_null())
                    .col(ColumnDef::new(Lines::Moves).text().not_null())
                    .col(ColumnDef::new(Lines::Orientation).string().not_null())
                    .col(ColumnDef::new(Lines::Slot).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Lines::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lines_playlist_id")
                            .from(Lines::Table, Lines::PlaylistId)
                            .to(Playlists::Table, Playlists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lines_playlist_id")
                    .table(Lines::Table)
                    .col(Lines::PlaylistId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Playlists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Playlists {
    Table,
    Id,
    UserId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Lines {
    Table,
    Id,
    PlaylistId,
    Name,
    Moves,
    Orientation,
    Slot,
    CreatedAt,
}
