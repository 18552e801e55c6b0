/// Errors from parsing or constructing foundation types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, actual {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("missing record field: {0}")]
    MissingField(&'static str),

    #[error("unknown record field: {0}")]
    UnknownField(String),
}
