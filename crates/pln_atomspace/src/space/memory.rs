//! In-memory atom space
//!
//! Provides fast, ephemeral storage for tests, benches and embedding
//! applications that do not need persistence.

use super::AtomSpace;
use crate::{AtomRef, AtomType, Error, Result};
use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// What a stored atom holds besides its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtomContent {
    /// A node's name.
    Node(String),
    /// A link's outgoing set, in order.
    Link(Vec<AtomRef>),
}

/// A stored atom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomRecord {
    /// The atom's type.
    pub atom_type: AtomType,
    /// Name or outgoing set.
    pub content: AtomContent,
}

#[derive(Default)]
struct SpaceInner {
    /// Atoms in creation order.
    atoms: IndexMap<AtomRef, AtomRecord>,
    nodes: HashMap<(AtomType, String), AtomRef>,
    links: HashMap<(AtomType, Vec<AtomRef>), AtomRef>,
}

/// In-memory atom space
///
/// Atoms are unique by content: adding a node with an existing type and name,
/// or a link with an existing type and outgoing set, returns the existing
/// reference. Outgoing order is preserved as given for every link type.
pub struct MemoryAtomSpace {
    inner: RwLock<SpaceInner>,
}

impl MemoryAtomSpace {
    /// Create a new empty space
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SpaceInner::default()),
        }
    }

    /// Create with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(SpaceInner {
                atoms: IndexMap::with_capacity(capacity),
                nodes: HashMap::with_capacity(capacity),
                links: HashMap::with_capacity(capacity),
            }),
        }
    }

    /// Number of stored atoms.
    pub fn count(&self) -> usize {
        self.inner.read().map(|i| i.atoms.len()).unwrap_or(0)
    }

    /// Returns `true` if no atom has been added.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns a copy of a stored atom.
    pub fn get(&self, atom: AtomRef) -> Result<AtomRecord> {
        let inner = self.read()?;
        inner.atoms.get(&atom).cloned().ok_or(Error::NotFound(atom))
    }

    /// All atoms whose type is `ty` or one of its subtypes, in creation order.
    pub fn atoms_of_type(&self, ty: AtomType) -> Result<Vec<AtomRef>> {
        let inner = self.read()?;
        Ok(inner
            .atoms
            .iter()
            .filter(|(_, record)| record.atom_type.is_a(ty))
            .map(|(atom, _)| *atom)
            .collect())
    }

    /// Dumps every atom, in creation order, as JSON.
    pub fn to_json(&self) -> Result<String> {
        let inner = self.read()?;
        Ok(serde_json::to_string(&inner.atoms)?)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, SpaceInner>> {
        self.inner
            .read()
            .map_err(|_| Error::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, SpaceInner>> {
        self.inner
            .write()
            .map_err(|_| Error::Storage("lock poisoned".into()))
    }
}

impl Default for MemoryAtomSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomSpace for MemoryAtomSpace {
    fn get_type(&self, atom: AtomRef) -> Result<AtomType> {
        let inner = self.read()?;
        inner
            .atoms
            .get(&atom)
            .map(|record| record.atom_type)
            .ok_or(Error::NotFound(atom))
    }

    fn create_node(&self, kind: AtomType, name: &str) -> Result<AtomRef> {
        if !kind.is_node() {
            return Err(Error::InvalidAtom(format!("{} is not a node type", kind)));
        }

        let mut inner = self.write()?;
        let key = (kind, name.to_string());
        if let Some(existing) = inner.nodes.get(&key) {
            return Ok(*existing);
        }

        let atom = AtomRef::next();
        inner.atoms.insert(
            atom,
            AtomRecord {
                atom_type: kind,
                content: AtomContent::Node(name.to_string()),
            },
        );
        inner.nodes.insert(key, atom);
        trace!("added {} {}({})", atom, kind, name);
        Ok(atom)
    }

    fn get_node(&self, kind: AtomType, name: &str) -> Result<Option<AtomRef>> {
        let inner = self.read()?;
        Ok(inner.nodes.get(&(kind, name.to_string())).copied())
    }

    fn create_link(&self, kind: AtomType, outgoing: &[AtomRef]) -> Result<AtomRef> {
        if !kind.is_link() {
            return Err(Error::InvalidAtom(format!("{} is not a link type", kind)));
        }
        if !kind.arity().admits(Some(outgoing.len())) {
            return Err(Error::InvalidAtom(format!(
                "{} takes {} atoms, got {}",
                kind,
                kind.arity(),
                outgoing.len()
            )));
        }

        let mut inner = self.write()?;
        if let Some(missing) = outgoing.iter().find(|a| !inner.atoms.contains_key(*a)) {
            return Err(Error::NotFound(*missing));
        }

        let key = (kind, outgoing.to_vec());
        if let Some(existing) = inner.links.get(&key) {
            return Ok(*existing);
        }

        let atom = AtomRef::next();
        inner.atoms.insert(
            atom,
            AtomRecord {
                atom_type: kind,
                content: AtomContent::Link(outgoing.to_vec()),
            },
        );
        inner.links.insert(key, atom);
        trace!("added {} {} over {} atoms", atom, kind, outgoing.len());
        Ok(atom)
    }

    fn outgoing(&self, atom: AtomRef) -> Result<Vec<AtomRef>> {
        let inner = self.read()?;
        match inner.atoms.get(&atom) {
            Some(AtomRecord {
                content: AtomContent::Link(out),
                ..
            }) => Ok(out.clone()),
            Some(_) => Ok(Vec::new()),
            None => Err(Error::NotFound(atom)),
        }
    }

    fn node_name(&self, atom: AtomRef) -> Result<Option<String>> {
        let inner = self.read()?;
        match inner.atoms.get(&atom) {
            Some(AtomRecord {
                content: AtomContent::Node(name),
                ..
            }) => Ok(Some(name.clone())),
            Some(_) => Ok(None),
            None => Err(Error::NotFound(atom)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_read_node() {
        let space = MemoryAtomSpace::new();
        let cat = space.create_node(AtomType::ConceptNode, "cat").unwrap();

        assert_eq!(space.get_type(cat).unwrap(), AtomType::ConceptNode);
        assert_eq!(space.node_name(cat).unwrap(), Some("cat".to_string()));
        assert!(space.outgoing(cat).unwrap().is_empty());
    }

    #[test]
    fn test_nodes_are_unique_by_content() {
        let space = MemoryAtomSpace::new();
        let a = space.create_node(AtomType::ConceptNode, "cat").unwrap();
        let b = space.create_node(AtomType::ConceptNode, "cat").unwrap();
        let c = space.create_node(AtomType::PredicateNode, "cat").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(space.count(), 2);
    }

    #[test]
    fn test_links_are_unique_by_content() {
        let space = MemoryAtomSpace::new();
        let a = space.create_node(AtomType::ConceptNode, "a").unwrap();
        let b = space.create_node(AtomType::ConceptNode, "b").unwrap();

        let ab = space.create_link(AtomType::AndLink, &[a, b]).unwrap();
        let ab2 = space.create_link(AtomType::AndLink, &[a, b]).unwrap();
        let ba = space.create_link(AtomType::AndLink, &[b, a]).unwrap();

        assert_eq!(ab, ab2);
        assert_ne!(ab, ba);
        assert_eq!(space.outgoing(ab).unwrap(), vec![a, b]);
        assert_eq!(space.node_name(ab).unwrap(), None);
    }

    #[test]
    fn test_rejects_wrong_kind() {
        let space = MemoryAtomSpace::new();
        assert!(matches!(
            space.create_node(AtomType::AndLink, "x"),
            Err(Error::InvalidAtom(_))
        ));
        assert!(matches!(
            space.create_link(AtomType::ConceptNode, &[]),
            Err(Error::InvalidAtom(_))
        ));
    }

    #[test]
    fn test_rejects_bad_arity() {
        let space = MemoryAtomSpace::new();
        let a = space.create_node(AtomType::ConceptNode, "a").unwrap();
        let b = space.create_node(AtomType::ConceptNode, "b").unwrap();

        assert!(space.create_link(AtomType::NotLink, &[a]).is_ok());
        assert!(matches!(
            space.create_link(AtomType::NotLink, &[a, b]),
            Err(Error::InvalidAtom(_))
        ));
        assert!(matches!(
            space.create_link(AtomType::ImplicationLink, &[a]),
            Err(Error::InvalidAtom(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_outgoing() {
        let space = MemoryAtomSpace::new();
        let a = space.create_node(AtomType::ConceptNode, "a").unwrap();
        let stranger = AtomRef::next();

        assert_eq!(
            space.create_link(AtomType::ListLink, &[a, stranger]),
            Err(Error::NotFound(stranger))
        );
        assert_eq!(space.get_type(stranger), Err(Error::NotFound(stranger)));
    }

    #[test]
    fn test_atoms_of_type() {
        let space = MemoryAtomSpace::new();
        let a = space.create_node(AtomType::ConceptNode, "a").unwrap();
        let b = space.create_node(AtomType::ConceptNode, "b").unwrap();
        let and = space.create_link(AtomType::AndLink, &[a, b]).unwrap();
        let simple = space.create_link(AtomType::SimpleAndLink, &[b, a]).unwrap();
        space.create_link(AtomType::OrLink, &[a, b]).unwrap();

        assert_eq!(space.atoms_of_type(AtomType::AndLink).unwrap(), vec![and, simple]);
        assert_eq!(space.atoms_of_type(AtomType::Node).unwrap(), vec![a, b]);
        assert_eq!(space.atoms_of_type(AtomType::Atom).unwrap().len(), 5);
    }

    #[test]
    fn test_json_dump() {
        let space = MemoryAtomSpace::new();
        space.create_node(AtomType::ConceptNode, "cat").unwrap();
        let json = space.to_json().unwrap();
        assert!(json.contains("ConceptNode"));
        assert!(json.contains("cat"));
    }
}
