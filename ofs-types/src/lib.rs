pub mod game;
pub mod ledger;
pub mod line;
pub mod messages;

pub type UserId = String;
pub type GameId = String;
pub type LineId = String;
pub type PlaylistId = String;

// Re-export all types
pub use game::*;
pub use ledger::*;
pub use line::*;
pub use messages::*;
