use pramaan_crypto::CanonicalError;
use pramaan_ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input rejected locally, before any ledger interaction.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("canonicalization error: {0}")]
    Canonical(#[from] CanonicalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
