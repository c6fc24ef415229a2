use thiserror::Error as ThisError;

/// Validation and store errors
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid plan type: {0}")]
    InvalidPlan(String),

    #[error("invalid payment status: {0}")]
    InvalidStatus(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid age {0}, expected 1 to 120")]
    InvalidAge(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl Error {
    /// Is this a failure reported by the record store?
    pub fn is_store(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}
