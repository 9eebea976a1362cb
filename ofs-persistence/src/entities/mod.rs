pub mod prelude;

pub mod lines;
pub mod ofs_games;
pub mod playlists;
