pub mod ledger_repository;
pub mod line_repository;

pub use ledger_repository::LedgerRepository;
pub use line_repository::LineRepository;
