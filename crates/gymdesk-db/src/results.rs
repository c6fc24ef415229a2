use sqlx::FromRow;
use thiserror::Error as ThisError;

/// Model errors
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum QueryError {
    #[error("Not found")]
    NotFound,
    #[error("Ambiguous results ({0:?}) for query")]
    Ambiguous(usize),
    #[error("Store unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}
