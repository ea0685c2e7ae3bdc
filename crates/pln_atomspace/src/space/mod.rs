//! The capability interface between the rule engine and the atom store.
//!
//! The engine never reaches into a store directly. It is handed an
//! [`AtomSpace`] and calls only the operations listed here:
//! - type lookup and type-lattice queries
//! - node lookup, node and link creation
//! - outgoing-set and node-name reads
//!
//! [`MemoryAtomSpace`] is the in-memory implementation shipped with this
//! crate.

pub mod memory;

use crate::{AtomRef, AtomType, Error, Result};

/// Operations a knowledge store must offer to the rule engine.
///
/// Implementations are responsible for their own synchronization. Callers
/// must not assume that two separate calls observe one consistent snapshot.
pub trait AtomSpace: Send + Sync {
    /// Returns the type of a stored atom.
    fn get_type(&self, atom: AtomRef) -> Result<AtomType>;

    /// Checks whether `child` is `ancestor` or one of its subtypes.
    fn inherits_type(&self, child: AtomType, ancestor: AtomType) -> bool {
        child.is_a(ancestor)
    }

    /// Adds a node, or returns the existing node with the same type and name.
    fn create_node(&self, kind: AtomType, name: &str) -> Result<AtomRef>;

    /// Looks up a node by type and name without creating it.
    fn get_node(&self, kind: AtomType, name: &str) -> Result<Option<AtomRef>>;

    /// Adds a link, or returns the existing link with the same type and outgoing set.
    fn create_link(&self, kind: AtomType, outgoing: &[AtomRef]) -> Result<AtomRef>;

    /// Returns the outgoing set of a link. Nodes have an empty outgoing set.
    fn outgoing(&self, atom: AtomRef) -> Result<Vec<AtomRef>>;

    /// Returns the name of a node, or `None` for links.
    fn node_name(&self, atom: AtomRef) -> Result<Option<String>>;

    /// Returns the `index`-th outgoing atom of a link.
    fn child(&self, atom: AtomRef, index: usize) -> Result<AtomRef> {
        self.outgoing(atom)?
            .get(index)
            .copied()
            .ok_or_else(|| Error::InvalidAtom(format!("{} has no child at index {}", atom, index)))
    }
}

// Re-exports
pub use memory::{AtomContent, AtomRecord, MemoryAtomSpace};
