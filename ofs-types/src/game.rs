use crate::GameId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Color::White),
            "black" => Ok(Color::Black),
            other => Err(format!("unknown color: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TimeControl {
    Bullet,
    Blitz,
    Rapid,
    Classical,
}

impl TimeControl {
    pub const ALL: [TimeControl; 4] = [
        TimeControl::Bullet,
        TimeControl::Blitz,
        TimeControl::Rapid,
        TimeControl::Classical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeControl::Bullet => "bullet",
            TimeControl::Blitz => "blitz",
            TimeControl::Rapid => "rapid",
            TimeControl::Classical => "classical",
        }
    }
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeControl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bullet" => Ok(TimeControl::Bullet),
            "blitz" => Ok(TimeControl::Blitz),
            "rapid" => Ok(TimeControl::Rapid),
            "classical" => Ok(TimeControl::Classical),
            other => Err(format!("unknown time control: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GameResult {
    Win,
    Draw,
    Loss,
}

/// A finished game as reported by the external game source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayedGame {
    pub id: GameId,
    #[ts(type = "number")]
    pub created_at: i64, // epoch millis
    pub color: Color,
    #[serde(default)]
    pub you: String,
    pub opponent: String,
    pub time_control: TimeControl,
    pub did_you_win: bool,
    pub did_you_lose: bool,
    pub ucis: String, // space separated half-moves
}

impl PlayedGame {
    /// Both flags false means the game was drawn.
    pub fn result(&self) -> GameResult {
        if self.did_you_win {
            GameResult::Win
        } else if self.did_you_lose {
            GameResult::Loss
        } else {
            GameResult::Draw
        }
    }

    pub fn plies(&self) -> Vec<&str> {
        self.ucis.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(win: bool, lose: bool) -> PlayedGame {
        PlayedGame {
            id: "g1".to_string(),
            created_at: 0,
            color: Color::White,
            you: "me".to_string(),
            opponent: "them".to_string(),
            time_control: TimeControl::Blitz,
            did_you_win: win,
            did_you_lose: lose,
            ucis: "e2e4  e7e5 ".to_string(),
        }
    }

    #[test]
    fn test_result_from_flags() {
        assert_eq!(game(true, false).result(), GameResult::Win);
        assert_eq!(game(false, true).result(), GameResult::Loss);
        assert_eq!(game(false, false).result(), GameResult::Draw);
    }

    #[test]
    fn test_plies_ignore_extra_whitespace() {
        assert_eq!(game(false, false).plies(), vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn test_deserialize_without_you() {
        let json = r#"{
            "id": "abc",
            "created_at": 1700000000000,
            "color": "black",
            "opponent": "magnus",
            "time_control": "rapid",
            "did_you_win": false,
            "did_you_lose": true,
            "ucis": "d2d4 g8f6"
        }"#;

        let game: PlayedGame = serde_json::from_str(json).unwrap();
        assert_eq!(game.color, Color::Black);
        assert_eq!(game.time_control, TimeControl::Rapid);
        assert_eq!(game.you, "");
        assert_eq!(game.result(), GameResult::Loss);
    }

    #[test]
    fn test_unknown_time_control_rejected() {
        assert!("correspondence".parse::<TimeControl>().is_err());
        assert_eq!("classical".parse::<TimeControl>(), Ok(TimeControl::Classical));
        assert_eq!(Color::Black.to_string(), "black");
    }
}
