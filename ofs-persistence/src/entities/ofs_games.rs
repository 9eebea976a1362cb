use sea_orm::entity::prelude::*;

/// One cached game result. Booleans are stored as 0/1.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ofs_games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub best_match_line_id: Option<String>,
    pub created_at: i64, // epoch millis
    pub color: String,
    pub you: String,
    pub opponent: String,
    pub time_control: String,
    pub did_you_lose: i32,
    pub did_you_win: i32,
    #[sea_orm(column_type = "Text")]
    pub ucis: String,
    pub ofs: f64,
    pub depth: f64,
    pub did_you_deviated: i32,
    pub nb_deviation: i32,
    pub deviator: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lines::Entity",
        from = "Column::BestMatchLineId",
        to = "super::lines::Column::Id",
        on_delete = "SetNull"
    )]
    Lines,
}

impl Related<super::lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
