//! PLN Rules - pattern rewriting and rule applicability
//!
//! This crate manipulates the formulas a probabilistic reasoner works on.
//! Formulas are pattern trees whose leaves are atoms of a hypergraph store or
//! free variables. The crate rewrites them between dual logical forms and
//! decides which premise lists a rule needs to produce a given output.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Rule Applicability Engine                    │
//! │   unprovable filter │ premise partitions │ override flag    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌────────────────────────┐   ┌────────────────────────┐    │
//! │  │   Logical Transformer  │   │  Combinatorics         │    │
//! │  │  AND↔OR │ ∃↔∀ │ ↔ split│   │  power set │ generate  │    │
//! │  └────────────────────────┘   └────────────────────────┘    │
//! │              │                            │                  │
//! │  ┌────────────────────────┐   ┌────────────────────────┐    │
//! │  │   Pattern Trees        │   │  Variable Factory      │    │
//! │  │  shared │ copy-on-write│   │  process-unique ids    │    │
//! │  └────────────────────────┘   └────────────────────────┘    │
//! │                                                              │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ AtomSpace capability
//!                         ┌──────┴──────┐
//!                         │ atom store  │
//!                         └─────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//! use pln_atomspace::{AtomSpace, AtomType, MemoryAtomSpace};
//! use pln_rules::{MetaPattern, PatternTree, RuleApplicabilityEngine};
//!
//! let space = Arc::new(MemoryAtomSpace::new());
//! let engine = RuleApplicabilityEngine::with_defaults(space.clone());
//!
//! let a = space.create_node(AtomType::ConceptNode, "a")?;
//! let b = space.create_node(AtomType::ConceptNode, "b")?;
//! let and = space.create_link(AtomType::AndLink, &[a, b])?;
//! let output = MetaPattern::template(PatternTree::from_atom(&*space, and)?);
//!
//! let candidates: BTreeSet<_> = [AtomType::OrLink].into_iter().collect();
//! let outcome = engine.compute_premise_partitions(&output, &candidates)?;
//! assert_eq!(outcome.partitions.len(), 1);
//! assert!(outcome.override_input_filter);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod applicability;
pub mod combinatorics;
pub mod config;
pub mod error;
pub mod meta;
pub mod pattern;
pub mod transform;
pub mod variable;

// Re-exports
pub use applicability::{PartitionOutcome, RuleApplicabilityEngine};
pub use combinatorics::{bounded_generate, checked_power_set, power_set, BoundedSequence};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use meta::{MetaPattern, PremiseList, RuleMetaPatternSet};
pub use pattern::{PatternElement, PatternTree, Variable};
pub use transform::LogicalTransformer;
pub use variable::{VariableFactory, DEFAULT_VARIABLE_PREFIX};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
