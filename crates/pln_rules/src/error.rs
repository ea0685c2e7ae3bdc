//! Error types for the PLN rule engine.

use thiserror::Error;

/// A specialized `Result` type for rule engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines the errors that can occur while rewriting patterns or computing
/// rule applicability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A structural or type mismatch. The caller skips the offending
    /// candidate and carries on.
    #[error("Type error: {0}")]
    TypeError(String),

    /// The atom store failed. Fatal for the current inference step; the
    /// store may hold partial writes, so the step must not be replayed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A combinatorial request was larger than the caller's bound. Raised
    /// before any enumeration work starts.
    #[error("Enumeration bound exceeded: {requested} subsets requested, limit is {limit}")]
    EnumerationBoundExceeded { requested: usize, limit: usize },

    /// An `EngineConfig` failed validation or could not be read.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An error occurred during data serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns `true` for errors the caller may recover from by skipping
    /// the current candidate.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::TypeError(_))
    }

    pub(crate) fn type_error(msg: impl Into<String>) -> Self {
        Error::TypeError(msg.into())
    }
}

impl From<pln_atomspace::Error> for Error {
    fn from(e: pln_atomspace::Error) -> Self {
        match e {
            pln_atomspace::Error::InvalidAtom(msg) => Error::TypeError(msg),
            other => Error::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pln_atomspace::AtomRef;

    #[test]
    fn test_error_display() {
        let err = Error::TypeError("NotLink takes one child".to_string());
        assert!(err.to_string().contains("NotLink takes one child"));
    }

    #[test]
    fn test_bound_error_display() {
        let err = Error::EnumerationBoundExceeded {
            requested: 1024,
            limit: 64,
        };
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn test_only_type_errors_are_recoverable() {
        assert!(Error::type_error("x").is_recoverable());
        assert!(!Error::StoreUnavailable("down".into()).is_recoverable());
        assert!(!Error::EnumerationBoundExceeded {
            requested: 2,
            limit: 1
        }
        .is_recoverable());
    }

    #[test]
    fn test_store_error_mapping() {
        let invalid: Error = pln_atomspace::Error::InvalidAtom("bad arity".into()).into();
        assert!(matches!(invalid, Error::TypeError(_)));

        let missing: Error = pln_atomspace::Error::NotFound(AtomRef::from_raw(3)).into();
        assert!(matches!(missing, Error::StoreUnavailable(_)));

        let storage: Error = pln_atomspace::Error::Storage("lock poisoned".into()).into();
        assert!(matches!(storage, Error::StoreUnavailable(_)));
    }
}
