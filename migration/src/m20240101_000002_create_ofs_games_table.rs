use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_playlists_and_lines::Lines;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OfsGames::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OfsGames::UserId).string().not_null())
                    .col(ColumnDef::new(OfsGames::Id).string().not_null())
                    .col(ColumnDef::new(OfsGames::BestMatchLineId).string().null())
                    .col(ColumnDef::new(OfsGames::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(OfsGames::Color).string().not_null())
                    .col(ColumnDef::new(OfsGames::You).string().not_null().default(""))
                    .col(ColumnDef::new(OfsGames::Opponent).string().not_null())
                    .col(ColumnDef::new(OfsGames::TimeControl).string().not_null())
                    .col(ColumnDef::new(OfsGames::DidYouLose).integer().not_null())
                    .col(ColumnDef::new(OfsGames::DidYouWin).integer().not_null())
                    .col(ColumnDef::new(OfsGames::Ucis).text().not_null())
                    .col(ColumnDef::new(OfsGames::Ofs).double().not_null())
                    .col(ColumnDef::new(OfsGames::Depth).double().not_null())
                    .col(ColumnDef::new(OfsGames::DidYouDeviated).integer().not_null())
                    .col(ColumnDef::new(OfsGames::NbDeviation).integer().not_null())
                    .col(ColumnDef::new(OfsGames::Deviator).string().not_null())
                    // One cached result per game and user
                    .primary_key(
                        Index::create()
                            .name("pk_ofs_games")
                            .col(OfsGames::UserId)
                            .col(OfsGames::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ofs_games_best_match_line_id")
                            .from(OfsGames::Table, OfsGames::BestMatchLineId)
                            .to(Lines::Table, Lines::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ofs_games_user_created_at")
                    .table(OfsGames::Table)
                    .col(OfsGames::UserId)
                    .col(OfsGames::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OfsGames::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OfsGames {
    Table,
    UserId,
    Id,
    BestMatchLineId,
    CreatedAt,
    Color,
    You,
    Opponent,
    TimeControl,
    DidYouLose,
    DidYouWin,
    Ucis,
    Ofs,
    Depth,
    DidYouDeviated,
    NbDeviation,
    Deviator,
}
