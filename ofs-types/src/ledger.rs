use crate::{LineId, PlayedGame};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Deviator {
    User,     // the user left the line first
    Opponent, // the opponent left the line first
    None,     // the whole line was played out
}

impl Deviator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Deviator::User => "user",
            Deviator::Opponent => "opponent",
            Deviator::None => "none",
        }
    }
}

impl std::str::FromStr for Deviator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Deviator::User),
            "opponent" => Ok(Deviator::Opponent),
            "none" => Ok(Deviator::None),
            other => Err(format!("unknown deviator: {other}")),
        }
    }
}

/// How a played game lines up against the best reference line found for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchOutcome {
    pub best_match_line_id: Option<LineId>,
    pub nb_deviation: u32,
    pub did_you_deviated: bool,
    pub deviator: Deviator,
}

impl MatchOutcome {
    /// Outcome for a game that shares nothing with any reference line.
    pub fn unmatched() -> Self {
        Self {
            best_match_line_id: None,
            nb_deviation: 0,
            did_you_deviated: true,
            deviator: Deviator::User,
        }
    }
}

/// All components of an opening fitness score, percentages on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub depth: f64,
    pub deficit: f64,
    pub win: f64,
    pub user_deviation_penalty: f64,
    pub opponent_deviation_penalty: f64,
    pub raw: f64,
    pub ofs: f64,
}

/// A processed game as cached for the day. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerEntry {
    #[serde(flatten)]
    #[ts(flatten)]
    pub game: PlayedGame,
    #[serde(flatten)]
    #[ts(flatten)]
    pub outcome: MatchOutcome,
    pub ofs: f64,
    pub depth: f64,
}

impl LedgerEntry {
    pub fn id(&self) -> &str {
        &self.game.id
    }
}
