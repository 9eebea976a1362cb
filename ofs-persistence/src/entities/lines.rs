use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub playlist_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub moves: String,
    pub orientation: String,
    pub slot: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::playlists::Entity",
        from = "Column::PlaylistId",
        to = "super::playlists::Column::Id",
        on_delete = "Cascade"
    )]
    Playlists,
    #[sea_orm(has_many = "super::ofs_games::Entity")]
    OfsGames,
}

impl Related<super::playlists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Playlists.def()
    }
}

impl Related<super::ofs_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OfsGames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
