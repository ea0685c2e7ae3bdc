//! The atom type lattice.
//!
//! Every atom carries an `AtomType`. Types form a single-inheritance tree
//! rooted at [`AtomType::Atom`]; a type inherits every ancestor on its path
//! to the root. The lattice also records how many outgoing atoms a link type
//! admits and which connectives are duals of each other.
//!
//! ```text
//! Atom
//! ├── Node
//! │   ├── ConceptNode
//! │   ├── PredicateNode
//! │   └── VariableNode
//! └── Link
//!     ├── OrderedLink
//!     │   ├── ListLink
//!     │   ├── EvaluationLink
//!     │   ├── InheritanceLink
//!     │   ├── NotLink
//!     │   ├── ImplicationLink
//!     │   │   └── ExtensionalImplicationLink
//!     │   ├── ForAllLink
//!     │   └── ExistLink
//!     └── UnorderedLink
//!         ├── AndLink
//!         │   └── SimpleAndLink
//!         ├── OrLink
//!         └── EquivalenceLink
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type tag of an atom, also used as the type tag of pattern tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AtomType {
    /// Root of the lattice.
    Atom,
    /// Any node.
    Node,
    /// Any link.
    Link,
    /// A named concept.
    ConceptNode,
    /// A named predicate.
    PredicateNode,
    /// A free variable placeholder.
    VariableNode,
    /// A link whose outgoing order is significant.
    OrderedLink,
    /// A link whose outgoing order carries no meaning.
    UnorderedLink,
    /// A plain list of atoms.
    ListLink,
    /// A predicate applied to a list of arguments.
    EvaluationLink,
    /// `A` inherits from `B`.
    InheritanceLink,
    /// Logical negation.
    NotLink,
    /// Logical conjunction.
    AndLink,
    /// Conjunction without dependency assumptions between its members.
    SimpleAndLink,
    /// Logical disjunction.
    OrLink,
    /// `A → B`.
    ImplicationLink,
    /// Implication evaluated over member sets.
    ExtensionalImplicationLink,
    /// `A ↔ B`.
    EquivalenceLink,
    /// Universal quantifier: `(variables, body)`.
    ForAllLink,
    /// Existential quantifier: `(variables, body)`.
    ExistLink,
}

/// How many outgoing atoms a type admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Nodes only; no outgoing set.
    Leaf,
    /// Links with exactly this many outgoing atoms.
    Exactly(usize),
    /// Links with at least this many outgoing atoms.
    AtLeast(usize),
    /// Either a node or a link of any size.
    Any,
}

impl Arity {
    /// Checks an outgoing set size against this arity.
    ///
    /// `None` stands for a leaf (no outgoing set at all), which is different
    /// from a link with zero outgoing atoms.
    pub fn admits(&self, outgoing: Option<usize>) -> bool {
        match (self, outgoing) {
            (Arity::Any, _) => true,
            (Arity::Leaf, None) => true,
            (Arity::Leaf, Some(_)) => false,
            (_, None) => false,
            (Arity::Exactly(n), Some(len)) => len == *n,
            (Arity::AtLeast(n), Some(len)) => len >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Leaf => write!(f, "leaf"),
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Any => write!(f, "any"),
        }
    }
}

impl AtomType {
    /// All types known to the lattice, root first.
    pub const ALL: [AtomType; 20] = [
        AtomType::Atom,
        AtomType::Node,
        AtomType::Link,
        AtomType::ConceptNode,
        AtomType::PredicateNode,
        AtomType::VariableNode,
        AtomType::OrderedLink,
        AtomType::UnorderedLink,
        AtomType::ListLink,
        AtomType::EvaluationLink,
        AtomType::InheritanceLink,
        AtomType::NotLink,
        AtomType::AndLink,
        AtomType::SimpleAndLink,
        AtomType::OrLink,
        AtomType::ImplicationLink,
        AtomType::ExtensionalImplicationLink,
        AtomType::EquivalenceLink,
        AtomType::ForAllLink,
        AtomType::ExistLink,
    ];

    /// Returns the direct parent of this type, or `None` for the root.
    pub fn parent(&self) -> Option<AtomType> {
        use AtomType::*;
        match self {
            Atom => None,
            Node | Link => Some(Atom),
            ConceptNode | PredicateNode | VariableNode => Some(Node),
            OrderedLink | UnorderedLink => Some(Link),
            ListLink | EvaluationLink | InheritanceLink | NotLink | ImplicationLink
            | ForAllLink | ExistLink => Some(OrderedLink),
            ExtensionalImplicationLink => Some(ImplicationLink),
            AndLink | OrLink | EquivalenceLink => Some(UnorderedLink),
            SimpleAndLink => Some(AndLink),
        }
    }

    /// Returns `true` if `self` is `ancestor` or descends from it.
    ///
    /// # Examples
    ///
    /// ```
    /// use pln_atomspace::AtomType;
    ///
    /// assert!(AtomType::SimpleAndLink.is_a(AtomType::AndLink));
    /// assert!(AtomType::SimpleAndLink.is_a(AtomType::Link));
    /// assert!(!AtomType::AndLink.is_a(AtomType::SimpleAndLink));
    /// ```
    pub fn is_a(&self, ancestor: AtomType) -> bool {
        let mut current = Some(*self);
        while let Some(ty) = current {
            if ty == ancestor {
                return true;
            }
            current = ty.parent();
        }
        false
    }

    /// Returns `true` for node types.
    pub fn is_node(&self) -> bool {
        self.is_a(AtomType::Node)
    }

    /// Returns `true` for link types.
    pub fn is_link(&self) -> bool {
        self.is_a(AtomType::Link)
    }

    /// The outgoing-set sizes this type admits.
    pub fn arity(&self) -> Arity {
        use AtomType::*;
        match self {
            Atom => Arity::Any,
            Node | ConceptNode | PredicateNode | VariableNode => Arity::Leaf,
            Link | OrderedLink | UnorderedLink | ListLink => Arity::AtLeast(0),
            NotLink => Arity::Exactly(1),
            AndLink | SimpleAndLink | OrLink => Arity::AtLeast(1),
            EvaluationLink | InheritanceLink | ImplicationLink | ExtensionalImplicationLink
            | EquivalenceLink | ForAllLink | ExistLink => Arity::Exactly(2),
        }
    }

    /// The De Morgan or quantifier dual of a connective type.
    ///
    /// Subtypes resolve through their nearest ancestor that has a dual, so
    /// `SimpleAndLink` is dual to `OrLink`.
    pub fn connective_dual(&self) -> Option<AtomType> {
        use AtomType::*;
        match self {
            AndLink => Some(OrLink),
            OrLink => Some(AndLink),
            ExistLink => Some(ForAllLink),
            ForAllLink => Some(ExistLink),
            other => other.parent().and_then(|p| p.connective_dual()),
        }
    }

    /// The lattice name of the type.
    pub fn name(&self) -> &'static str {
        use AtomType::*;
        match self {
            Atom => "Atom",
            Node => "Node",
            Link => "Link",
            ConceptNode => "ConceptNode",
            PredicateNode => "PredicateNode",
            VariableNode => "VariableNode",
            OrderedLink => "OrderedLink",
            UnorderedLink => "UnorderedLink",
            ListLink => "ListLink",
            EvaluationLink => "EvaluationLink",
            InheritanceLink => "InheritanceLink",
            NotLink => "NotLink",
            AndLink => "AndLink",
            SimpleAndLink => "SimpleAndLink",
            OrLink => "OrLink",
            ImplicationLink => "ImplicationLink",
            ExtensionalImplicationLink => "ExtensionalImplicationLink",
            EquivalenceLink => "EquivalenceLink",
            ForAllLink => "ForAllLink",
            ExistLink => "ExistLink",
        }
    }

    /// Looks a type up by its lattice name.
    pub fn from_name(name: &str) -> Option<AtomType> {
        Self::ALL.iter().copied().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_reaches_root() {
        for ty in AtomType::ALL {
            assert!(ty.is_a(AtomType::Atom), "{} is detached", ty);
        }
    }

    #[test]
    fn test_nodes_and_links_are_disjoint() {
        for ty in AtomType::ALL {
            if ty == AtomType::Atom {
                continue;
            }
            assert_ne!(ty.is_node(), ty.is_link(), "{}", ty);
        }
    }

    #[test]
    fn test_inheritance() {
        assert!(AtomType::ExtensionalImplicationLink.is_a(AtomType::ImplicationLink));
        assert!(AtomType::AndLink.is_a(AtomType::UnorderedLink));
        assert!(!AtomType::OrLink.is_a(AtomType::AndLink));
        assert!(!AtomType::Link.is_a(AtomType::NotLink));
    }

    #[test]
    fn test_arity() {
        assert!(AtomType::NotLink.arity().admits(Some(1)));
        assert!(!AtomType::NotLink.arity().admits(Some(2)));
        assert!(!AtomType::EquivalenceLink.arity().admits(None));
        assert!(AtomType::ConceptNode.arity().admits(None));
        assert!(!AtomType::ConceptNode.arity().admits(Some(0)));
        assert!(AtomType::AndLink.arity().admits(Some(5)));
        assert!(AtomType::Atom.arity().admits(None));
    }

    #[test]
    fn test_duals() {
        assert_eq!(AtomType::AndLink.connective_dual(), Some(AtomType::OrLink));
        assert_eq!(AtomType::SimpleAndLink.connective_dual(), Some(AtomType::OrLink));
        assert_eq!(AtomType::ExistLink.connective_dual(), Some(AtomType::ForAllLink));
        assert_eq!(AtomType::ImplicationLink.connective_dual(), None);
        assert_eq!(AtomType::ConceptNode.connective_dual(), None);
    }

    #[test]
    fn test_names_round_trip() {
        for ty in AtomType::ALL {
            assert_eq!(AtomType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(AtomType::from_name("NoSuchLink"), None);
    }
}
