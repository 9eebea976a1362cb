pub mod day;
pub mod errors;
pub mod ledger;
pub mod matcher;
pub mod scoring;
pub mod summary;

// Re-export main components
pub use day::*;
pub use errors::*;
pub use ledger::*;
pub use matcher::*;
pub use scoring::*;
pub use summary::*;
