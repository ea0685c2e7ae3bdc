//! Atom references.
//!
//! An `AtomRef` is the only thing the rule engine holds on to when it talks
//! about a stored atom. The space owns the atom; the reference is a plain,
//! copyable identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A process-wide unique identifier for a node or link in an atom space.
///
/// References are never reused within a process, even across different
/// spaces, so a reference issued by one space can never alias an atom of
/// another.
///
/// # Examples
///
/// ```
/// use pln_atomspace::AtomRef;
///
/// let a = AtomRef::next();
/// let b = AtomRef::next();
/// assert_ne!(a, b);
/// assert!(b.raw() > a.raw());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AtomRef(u64);

impl AtomRef {
    /// Issues a new, never-before-seen reference.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Wraps a raw identifier. Intended for stores that persist their own ids.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AtomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
