pub use super::lines::Entity as Lines;
pub use super::ofs_games::Entity as OfsGames;
pub use super::playlists::Entity as Playlists;
