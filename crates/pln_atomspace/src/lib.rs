//! PLN AtomSpace - hypergraph atom store capability
//!
//! The reasoning engine manipulates formulas whose leaves are atoms living in
//! an external hypergraph store. This crate defines the boundary to that
//! store and ships an in-memory implementation of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PLN AtomSpace                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │               AtomSpace capability                    │   │
//! │  │  get_type │ inherits_type │ create_node │ create_link │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                  Type lattice                         │   │
//! │  │  Node ─ Concept/Predicate/Variable                    │   │
//! │  │  Link ─ And/Or/Not │ Implication/Equivalence │ ∀/∃   │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │               MemoryAtomSpace                         │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use pln_atomspace::{AtomSpace, AtomType, MemoryAtomSpace};
//!
//! let space = MemoryAtomSpace::new();
//! let cat = space.create_node(AtomType::ConceptNode, "cat")?;
//! let animal = space.create_node(AtomType::ConceptNode, "animal")?;
//! let link = space.create_link(AtomType::InheritanceLink, &[cat, animal])?;
//!
//! assert_eq!(space.outgoing(link)?, vec![cat, animal]);
//! assert!(space.inherits_type(space.get_type(link)?, AtomType::Link));
//! # Ok::<(), pln_atomspace::Error>(())
//! ```

pub mod atom;
pub mod error;
pub mod space;
pub mod types;

// Re-exports
pub use atom::AtomRef;
pub use error::{Error, Result};
pub use space::{AtomContent, AtomRecord, AtomSpace, MemoryAtomSpace};
pub use types::{Arity, AtomType};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
