use crate::{Color, LineId, PlaylistId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A saved opening line. Read-only as far as matching is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReferenceLine {
    #[serde(rename = "_id")]
    pub id: LineId,
    #[serde(rename = "_playlist_id")]
    pub playlist_id: PlaylistId,
    pub name: String,
    pub moves: String, // space separated half-moves
    pub orientation: Color,
    pub slot: i32,
    pub created_at: String, // ISO 8601 string
}

impl ReferenceLine {
    pub fn plies(&self) -> Vec<&str> {
        self.moves.split_whitespace().collect()
    }
}

/// A reference line together with the name of the playlist that owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolvedLine {
    #[serde(flatten)]
    #[ts(flatten)]
    pub line: ReferenceLine,
    pub playlist_name: String,
}
