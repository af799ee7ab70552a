use thiserror::Error as ThisError;
use tracing::error;

use crate::words::DuplicateWordError;

/// Shown to clients in place of anything they should not see.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Duplicate(#[from] DuplicateWordError),

    #[error("no words available in category '{category}'")]
    NoWords { category: String },
}

/// A request rejected before it reached a store.
#[derive(Debug, ThisError, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields must be filled.")]
    MissingFields,

    #[error("Category and word must contain only a-z letters.")]
    NotLetters,

    #[error("Nickname must not be blank.")]
    BlankNickname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl Error {
    pub fn no_words(category: &str) -> Self {
        Self::NoWords {
            category: category.trim().to_owned(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Duplicate(_) => ErrorKind::InvalidInput,
            Self::NoWords { .. } => ErrorKind::NotFound,
        }
    }

    /// Every variant here is safe to show a client as is.
    pub fn public_message(&self) -> String {
        self.to_string()
    }
}

/// Logs an unexpected failure with its full source chain and hands back the
/// message a client gets instead.
pub fn report_unexpected(err: &(dyn std::error::Error + 'static)) -> &'static str {
    let mut chain = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }

    error!(%err, ?chain, "unexpected failure");

    GENERIC_FAILURE
}
