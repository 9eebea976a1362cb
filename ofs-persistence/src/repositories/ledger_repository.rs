use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

use crate::entities::{ofs_games, prelude::*};
use crate::repositories::LineRepository;
use ofs_core::LedgerStore;
use ofs_types::{
    Color, Deviator, GameId, LedgerEntry, LineId, MatchOutcome, PlayedGame, ReferenceLine,
    ResolvedLine, TimeControl,
};

/// SQL-backed daily ledger. Evictions and inserts share one transaction.
pub struct LedgerRepository {
    db: DatabaseConnection,
    lines: LineRepository,
}

fn flag(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

impl LedgerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            lines: LineRepository::new(db.clone()),
            db,
        }
    }

    fn model_to_entry(model: ofs_games::Model) -> Result<LedgerEntry> {
        Ok(LedgerEntry {
            game: PlayedGame {
                id: model.id,
                created_at: model.created_at,
                color: model.color.parse::<Color>().map_err(anyhow::Error::msg)?,
                you: model.you,
                opponent: model.opponent,
                time_control: model
                    .time_control
                    .parse::<TimeControl>()
                    .map_err(anyhow::Error::msg)?,
                did_you_win: model.did_you_win == 1,
                did_you_lose: model.did_you_lose == 1,
                ucis: model.ucis,
            },
            outcome: MatchOutcome {
                best_match_line_id: model.best_match_line_id,
                nb_deviation: u32::try_from(model.nb_deviation)?,
                did_you_deviated: model.did_you_deviated == 1,
                deviator: model.deviator.parse::<Deviator>().map_err(anyhow::Error::msg)?,
            },
            ofs: model.ofs,
            depth: model.depth,
        })
    }

    fn entry_to_model(user_id: &str, entry: &LedgerEntry) -> Result<ofs_games::ActiveModel> {
        let game = &entry.game;
        let outcome = &entry.outcome;

        Ok(ofs_games::ActiveModel {
            user_id: sea_orm::ActiveValue::Set(user_id.to_string()),
            id: sea_orm::ActiveValue::Set(game.id.clone()),
            best_match_line_id: sea_orm::ActiveValue::Set(outcome.best_match_line_id.clone()),
            created_at: sea_orm::ActiveValue::Set(game.created_at),
            color: sea_orm::ActiveValue::Set(game.color.as_str().to_string()),
            you: sea_orm::ActiveValue::Set(game.you.clone()),
            opponent: sea_orm::ActiveValue::Set(game.opponent.clone()),
            time_control: sea_orm::ActiveValue::Set(game.time_control.as_str().to_string()),
            did_you_lose: sea_orm::ActiveValue::Set(flag(game.did_you_lose)),
            did_you_win: sea_orm::ActiveValue::Set(flag(game.did_you_win)),
            ucis: sea_orm::ActiveValue::Set(game.ucis.clone()),
            ofs: sea_orm::ActiveValue::Set(entry.ofs),
            depth: sea_orm::ActiveValue::Set(entry.depth),
            did_you_deviated: sea_orm::ActiveValue::Set(flag(outcome.did_you_deviated)),
            nb_deviation: sea_orm::ActiveValue::Set(i32::try_from(outcome.nb_deviation)?),
            deviator: sea_orm::ActiveValue::Set(outcome.deviator.as_str().to_string()),
        })
    }

    pub async fn find_entries_for_user(&self, user_id: &str) -> Result<Vec<LedgerEntry>> {
        let models = OfsGames::find()
            .filter(ofs_games::Column::UserId.eq(user_id))
            .order_by_asc(ofs_games::Column::CreatedAt)
            .order_by_asc(ofs_games::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::model_to_entry).collect()
    }

    /// Delete `stale` and insert `processed` atomically. Dropping the
    /// transaction on any error rolls both back.
    pub async fn replace_day(
        &self,
        user_id: &str,
        stale: &[GameId],
        processed: &[LedgerEntry],
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        if !stale.is_empty() {
            let deleted = OfsGames::delete_many()
                .filter(ofs_games::Column::UserId.eq(user_id))
                .filter(ofs_games::Column::Id.is_in(stale.iter().cloned()))
                .exec(&txn)
                .await?;
            debug!(user_id, rows = deleted.rows_affected, "evicted stale entries");
        }

        for entry in processed {
            OfsGames::insert(Self::entry_to_model(user_id, entry)?)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn load_entries(&self, user_id: &str) -> Result<Vec<LedgerEntry>> {
        self.find_entries_for_user(user_id).await
    }

    async fn load_corpus(&self, user_id: &str) -> Result<Vec<ReferenceLine>> {
        self.lines.find_corpus_for_user(user_id).await
    }

    async fn commit_day(
        &self,
        user_id: &str,
        stale: &[GameId],
        processed: &[LedgerEntry],
    ) -> Result<()> {
        self.replace_day(user_id, stale, processed).await
    }

    async fn resolve_lines(&self, line_ids: &[LineId]) -> Result<Vec<ResolvedLine>> {
        self.lines.find_resolved_by_ids(line_ids).await
    }
}
