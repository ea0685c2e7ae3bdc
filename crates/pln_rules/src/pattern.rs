//! Pattern trees
//!
//! A pattern tree describes the shape of a formula. Leaves are either
//! concrete atoms of the store or free variables; inner nodes are links.
//! Every node carries the type it is asserted to have.
//!
//! Trees are immutable. Nodes live behind an `Arc`, so cloning a tree is a
//! reference-count bump and any number of rules may hold the same sub-pattern.
//! Every operation that "changes" a tree builds a new root and reuses the
//! untouched branches of the old one.

use pln_atomspace::{AtomRef, AtomSpace, AtomType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A free variable.
///
/// Two variables are the same variable iff both their name and their
/// generation match. Generations are handed out by the
/// [`VariableFactory`](crate::VariableFactory) and never repeat within a
/// process, so two calls with the same name hint still yield distinct
/// variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    generation: u64,
}

impl Variable {
    /// Creates a variable with an explicit generation.
    pub fn new(name: impl Into<String>, generation: u64) -> Self {
        Self {
            name: name.into(),
            generation,
        }
    }

    /// The variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variable's generation id.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The name of the placeholder node registered for this variable.
    pub fn atom_name(&self) -> String {
        format!("{}#{}", self.name, self.generation)
    }

    /// Recovers a variable from a placeholder node name.
    ///
    /// Names without a `#<generation>` suffix come from outside the factory
    /// and get generation 0, which the factory never issues.
    pub fn from_atom_name(atom_name: &str) -> Self {
        match atom_name.rsplit_once('#') {
            Some((name, generation)) => match generation.parse() {
                Ok(generation) => Self::new(name, generation),
                Err(_) => Self::new(atom_name, 0),
            },
            None => Self::new(atom_name, 0),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.generation)
    }
}

/// A leaf of a pattern tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternElement {
    /// An atom of the store.
    Concrete(AtomRef),
    /// A free variable.
    Variable(Variable),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
enum Body {
    Leaf(PatternElement),
    Branch(Vec<PatternTree>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
struct PatternNode {
    atom_type: AtomType,
    body: Body,
}

/// A shared, immutable tree of pattern elements.
///
/// Equality, ordering and hashing are structural.
///
/// # Examples
///
/// ```
/// use pln_atomspace::{AtomRef, AtomType};
/// use pln_rules::{PatternTree, Variable};
///
/// let x = Variable::new("x", 1);
/// let cat = PatternTree::concrete(AtomRef::from_raw(1), AtomType::ConceptNode);
/// let not_x = PatternTree::link(AtomType::NotLink, vec![PatternTree::variable(x.clone())])?;
/// let and = PatternTree::link(AtomType::AndLink, vec![not_x, cat.clone()])?;
///
/// let replaced = and.substitute(&x, &cat);
/// assert!(!replaced.contains_variable(&x));
/// assert!(replaced.child(1).unwrap().ptr_eq(and.child(1).unwrap()));
/// # Ok::<(), pln_rules::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternTree(Arc<PatternNode>);

impl PatternTree {
    fn from_parts(atom_type: AtomType, body: Body) -> Self {
        Self(Arc::new(PatternNode { atom_type, body }))
    }

    /// A single concrete leaf with the given type tag.
    pub fn concrete(atom: AtomRef, atom_type: AtomType) -> Self {
        Self::from_parts(atom_type, Body::Leaf(PatternElement::Concrete(atom)))
    }

    /// A single variable leaf, tagged `VariableNode`.
    pub fn variable(var: Variable) -> Self {
        Self::from_parts(
            AtomType::VariableNode,
            Body::Leaf(PatternElement::Variable(var)),
        )
    }

    /// A concrete leaf typed by looking the atom up in the store.
    pub fn leaf_from_space(space: &dyn AtomSpace, atom: AtomRef) -> Result<Self> {
        Ok(Self::concrete(atom, space.get_type(atom)?))
    }

    /// A link node over `children`.
    ///
    /// # Errors
    ///
    /// `TypeError` if `atom_type` is not a link type admitting that many children.
    pub fn link(atom_type: AtomType, children: Vec<PatternTree>) -> Result<Self> {
        if !atom_type.is_link() || !atom_type.arity().admits(Some(children.len())) {
            return Err(Error::type_error(format!(
                "{} cannot hold {} children (arity {})",
                atom_type,
                children.len(),
                atom_type.arity()
            )));
        }
        Ok(Self::from_parts(atom_type, Body::Branch(children)))
    }

    /// Reads a stored atom as a tree.
    ///
    /// Links are expanded recursively. Variable nodes become variable leaves
    /// (see [`Variable::from_atom_name`]); every other node becomes a
    /// concrete leaf.
    pub fn from_atom(space: &dyn AtomSpace, atom: AtomRef) -> Result<Self> {
        let atom_type = space.get_type(atom)?;
        if atom_type.is_link() {
            let children = space
                .outgoing(atom)?
                .into_iter()
                .map(|child| Self::from_atom(space, child))
                .collect::<Result<Vec<_>>>()?;
            return Self::link(atom_type, children);
        }

        if space.inherits_type(atom_type, AtomType::VariableNode) {
            let name = space.node_name(atom)?.unwrap_or_default();
            return Ok(Self::variable(Variable::from_atom_name(&name)));
        }

        Ok(Self::concrete(atom, atom_type))
    }

    /// Reads a stored atom as a tree and retags its root.
    pub fn atom_with_new_type(
        space: &dyn AtomSpace,
        atom: AtomRef,
        atom_type: AtomType,
    ) -> Result<Self> {
        Self::from_atom(space, atom)?.with_new_type(atom_type)
    }

    /// The type tag of the root.
    pub fn atom_type(&self) -> AtomType {
        self.0.atom_type
    }

    /// Returns `true` for single-element trees.
    pub fn is_leaf(&self) -> bool {
        matches!(self.0.body, Body::Leaf(_))
    }

    /// The leaf element, if this is a leaf.
    pub fn element(&self) -> Option<&PatternElement> {
        match &self.0.body {
            Body::Leaf(element) => Some(element),
            Body::Branch(_) => None,
        }
    }

    /// The variable, if this is a variable leaf.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self.element() {
            Some(PatternElement::Variable(var)) => Some(var),
            _ => None,
        }
    }

    /// The children of the root. Empty for leaves.
    pub fn children(&self) -> &[PatternTree] {
        match &self.0.body {
            Body::Leaf(_) => &[],
            Body::Branch(children) => children,
        }
    }

    /// The `index`-th child of the root.
    pub fn child(&self, index: usize) -> Option<&PatternTree> {
        self.children().get(index)
    }

    /// Number of children of the root.
    pub fn arity(&self) -> usize {
        self.children().len()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(PatternTree::size).sum::<usize>()
    }

    /// Returns `true` if both handles point at the same shared node.
    pub fn ptr_eq(&self, other: &PatternTree) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Every distinct variable occurring in the tree.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match &self.0.body {
            Body::Leaf(PatternElement::Variable(var)) => {
                vars.insert(var.clone());
            }
            Body::Leaf(_) => {}
            Body::Branch(children) => children.iter().for_each(|c| c.collect_variables(vars)),
        }
    }

    /// Returns `true` if `var` occurs anywhere in the tree.
    pub fn contains_variable(&self, var: &Variable) -> bool {
        match &self.0.body {
            Body::Leaf(PatternElement::Variable(v)) => v == var,
            Body::Leaf(_) => false,
            Body::Branch(children) => children.iter().any(|c| c.contains_variable(var)),
        }
    }

    /// The same tree with the root retagged.
    ///
    /// Children are shared with `self`.
    ///
    /// # Errors
    ///
    /// `TypeError` if the new type does not fit the root's shape: a branch
    /// needs a link type admitting its child count, a leaf needs a non-link
    /// type, e.g. a binary link type for a leaf is refused.
    pub fn with_new_type(&self, atom_type: AtomType) -> Result<Self> {
        let shape = match &self.0.body {
            Body::Leaf(_) => None,
            Body::Branch(children) => Some(children.len()),
        };
        if atom_type.is_link() != shape.is_some() || !atom_type.arity().admits(shape) {
            return Err(Error::type_error(format!(
                "cannot retag {} as {}: arity {} does not admit {}",
                self.atom_type(),
                atom_type,
                atom_type.arity(),
                match shape {
                    Some(n) => format!("{} children", n),
                    None => "a leaf".to_string(),
                }
            )));
        }
        if atom_type == self.atom_type() {
            return Ok(self.clone());
        }
        Ok(Self::from_parts(atom_type, self.0.body.clone()))
    }

    /// Replaces every occurrence of `var` with `replacement`.
    ///
    /// Branches that do not contain `var` are shared with `self`; if `var`
    /// does not occur at all the result is `self` itself.
    pub fn substitute(&self, var: &Variable, replacement: &PatternTree) -> PatternTree {
        self.replace(var, replacement)
            .unwrap_or_else(|| self.clone())
    }

    /// `None` means "unchanged".
    fn replace(&self, var: &Variable, replacement: &PatternTree) -> Option<PatternTree> {
        match &self.0.body {
            Body::Leaf(PatternElement::Variable(v)) if v == var => Some(replacement.clone()),
            Body::Leaf(_) => None,
            Body::Branch(children) => {
                let mut rebuilt: Option<Vec<PatternTree>> = None;
                for (i, child) in children.iter().enumerate() {
                    if let Some(new_child) = child.replace(var, replacement) {
                        rebuilt.get_or_insert_with(|| children.clone())[i] = new_child;
                    }
                }
                rebuilt.map(|children| Self::from_parts(self.atom_type(), Body::Branch(children)))
            }
        }
    }

    /// Writes the tree into the store and returns the root atom.
    ///
    /// Concrete leaves are used as they are. Variable leaves resolve to their
    /// placeholder `VariableNode`, created if missing.
    pub fn instantiate(&self, space: &dyn AtomSpace) -> Result<AtomRef> {
        match &self.0.body {
            Body::Leaf(PatternElement::Concrete(atom)) => Ok(*atom),
            Body::Leaf(PatternElement::Variable(var)) => {
                Ok(space.create_node(AtomType::VariableNode, &var.atom_name())?)
            }
            Body::Branch(children) => {
                let outgoing = children
                    .iter()
                    .map(|child| child.instantiate(space))
                    .collect::<Result<Vec<_>>>()?;
                Ok(space.create_link(self.atom_type(), &outgoing)?)
            }
        }
    }
}

impl From<Variable> for PatternTree {
    fn from(var: Variable) -> Self {
        PatternTree::variable(var)
    }
}

impl fmt::Display for PatternTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.body {
            Body::Leaf(PatternElement::Concrete(atom)) => write!(f, "{}{}", self.atom_type(), atom),
            Body::Leaf(PatternElement::Variable(var)) => write!(f, "${}", var),
            Body::Branch(children) => {
                write!(f, "{}(", self.atom_type())?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
