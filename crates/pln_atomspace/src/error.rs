//! Error types for the atom space.
//!
//! This module provides a unified `Error` type for all store operations.

use thiserror::Error;

use crate::AtomRef;

/// A specialized `Result` type for atom space operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines the errors that can occur while reading or writing atoms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The referenced atom is not known to this space.
    #[error("atom not found: {0}")]
    NotFound(AtomRef),

    /// The requested atom is malformed: a link type used for a node, or an
    /// outgoing set the type's arity does not admit.
    #[error("invalid atom: {0}")]
    InvalidAtom(String),

    /// The space itself failed (poisoned lock, unreachable backend).
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Returns `true` if the error was caused by the request rather than the space.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidAtom(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
