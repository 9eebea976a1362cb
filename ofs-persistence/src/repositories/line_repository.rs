use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait};
use uuid::Uuid;

use crate::entities::{lines, playlists, prelude::*};
use ofs_types::{Color, LineId, PlaylistId, ReferenceLine, ResolvedLine};

/// Read access to the playlist/line store, plus the seeding used by tests.
pub struct LineRepository {
    db: DatabaseConnection,
}

impl LineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_line(model: lines::Model) -> Result<ReferenceLine> {
        Ok(ReferenceLine {
            id: model.id,
            playlist_id: model.playlist_id,
            name: model.name,
            moves: model.moves,
            orientation: model.orientation.parse::<Color>().map_err(anyhow::Error::msg)?,
            slot: model.slot,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    pub async fn create_playlist(&self, user_id: &str, name: &str) -> Result<PlaylistId> {
        let id = format!("opi{}", Uuid::new_v4().simple());

        let playlist = playlists::ActiveModel {
            id: sea_orm::ActiveValue::Set(id.clone()),
            user_id: sea_orm::ActiveValue::Set(user_id.to_string()),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        Playlists::insert(playlist).exec_without_returning(&self.db).await?;
        Ok(id)
    }

    pub async fn create_line(
        &self,
        playlist_id: &str,
        name: &str,
        moves: &str,
        orientation: Color,
        slot: i32,
    ) -> Result<ReferenceLine> {
        let id = format!("oli{}", Uuid::new_v4().simple());

        let line = lines::ActiveModel {
            id: sea_orm::ActiveValue::Set(id.clone()),
            playlist_id: sea_orm::ActiveValue::Set(playlist_id.to_string()),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            moves: sea_orm::ActiveValue::Set(moves.to_string()),
            orientation: sea_orm::ActiveValue::Set(orientation.as_str().to_string()),
            slot: sea_orm::ActiveValue::Set(slot),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        Lines::insert(line).exec_without_returning(&self.db).await?;

        let created = Lines::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created line"))?;

        Self::model_to_line(created)
    }

    /// Every line in every playlist the user owns, in creation order.
    pub async fn find_corpus_for_user(&self, user_id: &str) -> Result<Vec<ReferenceLine>> {
        let models = Lines::find()
            .join(sea_orm::JoinType::InnerJoin, lines::Relation::Playlists.def())
            .filter(playlists::Column::UserId.eq(user_id))
            .order_by_asc(lines::Column::CreatedAt)
            .order_by_asc(lines::Column::Slot)
            .order_by_asc(lines::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::model_to_line).collect()
    }

    /// Lines by id, each with the name of its playlist. Unknown ids are skipped.
    pub async fn find_resolved_by_ids(&self, line_ids: &[LineId]) -> Result<Vec<ResolvedLine>> {
        if line_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Lines::find()
            .filter(lines::Column::Id.is_in(line_ids.iter().cloned()))
            .find_also_related(Playlists)
            .all(&self.db)
            .await?;

        let mut resolved = Vec::with_capacity(rows.len());
        for (line, playlist) in rows {
            let Some(playlist) = playlist else {
                continue;
            };
            resolved.push(ResolvedLine {
                line: Self::model_to_line(line)?,
                playlist_name: playlist.name,
            });
        }

        Ok(resolved)
    }
}
