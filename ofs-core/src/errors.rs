use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or oversized submission, rejected before touching storage.
    #[error("invalid submission: {0}")]
    Validation(String),
    /// Storage failed; nothing from the call was applied and it is safe to retry.
    #[error("ledger storage failure: {0:#}")]
    Infrastructure(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}
