/// Errors produced by ledger client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The ledger could not be reached or did not answer in time.
    ///
    /// Retryable. For a submission this leaves the transaction's fate
    /// unknown; the caller should re-query affected hashes via lookup
    /// rather than assume failure.
    #[error("ledger unavailable during {op}: {reason}")]
    Unavailable { op: &'static str, reason: String },

    /// The ledger executed the submission and refused it.
    ///
    /// Not retryable without intervention: re-estimate the cost or fix the
    /// input before submitting again.
    #[error("submission rejected by ledger: {0}")]
    SubmissionRejected(String),

    /// The ledger answered, but with something this client cannot parse.
    #[error("malformed ledger response during {op}: {reason}")]
    BadResponse { op: &'static str, reason: String },

    /// No identities are authorized to submit batches.
    #[error("ledger reports no authorized signers")]
    NoSigners,

    #[error("configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Whether retrying the same call may succeed without caller changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
