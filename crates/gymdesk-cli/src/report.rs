use std::fmt;

use inquire::InquireError;

use gymdesk_accounting::Error;

/// What the user is told about a failed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Rejected input, shown as is
    Invalid(String),
    /// The confirmation prompt did not complete
    Prompt(String),
    /// Any failure of the record store. Details are only logged.
    Store,
}

impl Failure {
    pub fn classify(err: &anyhow::Error) -> Self {
        if let Some(prompt) = err.downcast_ref::<InquireError>() {
            return Failure::Prompt(prompt.to_string());
        }
        match err.downcast_ref::<Error>() {
            Some(Error::Store(_)) | None => Failure::Store,
            Some(invalid) => Failure::Invalid(invalid.to_string()),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Invalid(message) => write!(f, "Error: {}", message),
            Failure::Prompt(message) => write!(f, "Aborted: {}", message),
            Failure::Store => write!(f, "Operation failed."),
        }
    }
}
