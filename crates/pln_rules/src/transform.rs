//! Connective duality rewrites
//!
//! Each transform derives a new formula from an existing one and leaves the
//! input untouched:
//! - AND ↔ OR by De Morgan
//! - EXISTS ↔ FORALL by quantifier duality
//! - EQUIVALENCE → a pair of IMPLICATIONs
//!
//! The connective and quantifier duals return the dual of the input's
//! *negation*: `conjunction_to_disjunction(AND(a, b))` is `OR(¬a, ¬b)`, and
//! `NOT` of that result is logically equivalent to the input. Negation
//! collapses double negations, so `AND(¬x, ¬y)` becomes `OR(x, y)` and
//! applying the inverse transform restores the original structure.
//! [`LogicalTransformer::equivalent_dual`] wraps the result in `NOT` for
//! callers that need a formula equivalent to the input.
//!
//! The named duals only accept the exact connective they rewrite. The
//! lattice has no OR counterpart for `SimpleAndLink`, so dualizing it would
//! lose the subtype on the way back. Such inputs get a `TypeError`; callers
//! that know both types use [`LogicalTransformer::swap_connective`], which
//! accepts any subtype of `from` and is its own inverse when the types are
//! swapped back.

use std::sync::Arc;

use log::trace;
use pln_atomspace::{AtomRef, AtomSpace, AtomType};

use crate::error::{Error, Result};
use crate::pattern::PatternTree;

/// Rewrites formulas between dual logical forms.
#[derive(Clone)]
pub struct LogicalTransformer {
    space: Arc<dyn AtomSpace>,
}

impl LogicalTransformer {
    /// Creates a transformer consulting `space` for type queries and link construction.
    pub fn new(space: Arc<dyn AtomSpace>) -> Self {
        Self { space }
    }

    /// Fails with `TypeError` unless the root of `tree` inherits `expected`.
    pub fn ensure_type(&self, tree: &PatternTree, expected: AtomType) -> Result<()> {
        if self.space.inherits_type(tree.atom_type(), expected) {
            Ok(())
        } else {
            Err(Error::type_error(format!(
                "expected {}, found {}",
                expected,
                tree.atom_type()
            )))
        }
    }

    /// Like [`ensure_type`](Self::ensure_type), but subtypes of `expected` are rejected too.
    fn ensure_exact_type(&self, tree: &PatternTree, expected: AtomType) -> Result<()> {
        self.ensure_type(tree, expected)?;
        if tree.atom_type() != expected {
            return Err(Error::type_error(format!(
                "{} has no dual counterpart; use swap_connective with explicit types",
                tree.atom_type()
            )));
        }
        Ok(())
    }

    /// `NOT(tree)`, or the negated formula itself when `tree` is already a negation.
    pub fn negate(&self, tree: &PatternTree) -> Result<PatternTree> {
        if self.space.inherits_type(tree.atom_type(), AtomType::NotLink) {
            return tree
                .child(0)
                .cloned()
                .ok_or_else(|| Error::type_error("NotLink without a child"));
        }
        PatternTree::link(AtomType::NotLink, vec![tree.clone()])
    }

    /// Replaces a `from`-link by a `to`-link over the negated children.
    ///
    /// This is the general form of the De Morgan transforms, for lattices
    /// with more than one conjunction or disjunction type.
    pub fn swap_connective(
        &self,
        tree: &PatternTree,
        from: AtomType,
        to: AtomType,
    ) -> Result<PatternTree> {
        self.ensure_type(tree, from)?;
        let negated = tree
            .children()
            .iter()
            .map(|child| self.negate(child))
            .collect::<Result<Vec<_>>>()?;
        let result = PatternTree::link(to, negated)?;
        trace!("{} => {}", tree, result);
        Ok(result)
    }

    /// `AND(a, b, ...)` to `OR(¬a, ¬b, ...)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use pln_atomspace::{AtomRef, AtomType, MemoryAtomSpace};
    /// use pln_rules::{LogicalTransformer, PatternTree};
    ///
    /// let t = LogicalTransformer::new(Arc::new(MemoryAtomSpace::new()));
    /// let x = PatternTree::concrete(AtomRef::from_raw(1), AtomType::ConceptNode);
    /// let y = PatternTree::concrete(AtomRef::from_raw(2), AtomType::ConceptNode);
    /// let and = PatternTree::link(AtomType::AndLink, vec![t.negate(&x)?, t.negate(&y)?])?;
    ///
    /// let or = t.conjunction_to_disjunction(&and)?;
    /// assert_eq!(or, PatternTree::link(AtomType::OrLink, vec![x, y])?);
    /// # Ok::<(), pln_rules::Error>(())
    /// ```
    pub fn conjunction_to_disjunction(&self, and_link: &PatternTree) -> Result<PatternTree> {
        self.ensure_exact_type(and_link, AtomType::AndLink)?;
        self.swap_connective(and_link, AtomType::AndLink, AtomType::OrLink)
    }

    /// `OR(a, b, ...)` to `AND(¬a, ¬b, ...)`.
    pub fn disjunction_to_conjunction(&self, or_link: &PatternTree) -> Result<PatternTree> {
        self.ensure_exact_type(or_link, AtomType::OrLink)?;
        self.swap_connective(or_link, AtomType::OrLink, AtomType::AndLink)
    }

    /// `EXISTS(vars, body)` to `FORALL(vars, ¬body)`.
    pub fn existential_to_universal(&self, exists_link: &PatternTree) -> Result<PatternTree> {
        self.swap_quantifier(exists_link, AtomType::ExistLink, AtomType::ForAllLink)
    }

    /// `FORALL(vars, body)` to `EXISTS(vars, ¬body)`.
    pub fn universal_to_existential(&self, forall_link: &PatternTree) -> Result<PatternTree> {
        self.swap_quantifier(forall_link, AtomType::ForAllLink, AtomType::ExistLink)
    }

    fn swap_quantifier(
        &self,
        tree: &PatternTree,
        from: AtomType,
        to: AtomType,
    ) -> Result<PatternTree> {
        self.ensure_exact_type(tree, from)?;
        let (vars, body) = match tree.children() {
            [vars, body] => (vars, body),
            _ => {
                return Err(Error::type_error(format!(
                    "{} needs a variable list and a body",
                    tree.atom_type()
                )))
            }
        };
        let result = PatternTree::link(to, vec![vars.clone(), self.negate(body)?])?;
        trace!("{} => {}", tree, result);
        Ok(result)
    }

    /// `A ↔ B` to `(A → B, B → A)`.
    pub fn equivalence_to_implication_pair(
        &self,
        equiv_link: &PatternTree,
    ) -> Result<(PatternTree, PatternTree)> {
        self.ensure_type(equiv_link, AtomType::EquivalenceLink)?;
        match equiv_link.children() {
            [a, b] => Ok((
                PatternTree::link(AtomType::ImplicationLink, vec![a.clone(), b.clone()])?,
                PatternTree::link(AtomType::ImplicationLink, vec![b.clone(), a.clone()])?,
            )),
            _ => Err(Error::type_error("EquivalenceLink needs exactly two sides")),
        }
    }

    /// Applies whichever dual transform matches the root type.
    pub fn dual(&self, tree: &PatternTree) -> Result<PatternTree> {
        let ty = tree.atom_type();
        if self.space.inherits_type(ty, AtomType::AndLink) {
            self.conjunction_to_disjunction(tree)
        } else if self.space.inherits_type(ty, AtomType::OrLink) {
            self.disjunction_to_conjunction(tree)
        } else if self.space.inherits_type(ty, AtomType::ExistLink) {
            self.existential_to_universal(tree)
        } else if self.space.inherits_type(ty, AtomType::ForAllLink) {
            self.universal_to_existential(tree)
        } else {
            Err(Error::type_error(format!("{} has no connective dual", ty)))
        }
    }

    /// `NOT(dual(tree))`, a formula logically equivalent to `tree`.
    pub fn equivalent_dual(&self, tree: &PatternTree) -> Result<PatternTree> {
        self.negate(&self.dual(tree)?)
    }

    /// [`conjunction_to_disjunction`](Self::conjunction_to_disjunction) on a stored link.
    pub fn conjunction_to_disjunction_atom(&self, and_link: AtomRef) -> Result<AtomRef> {
        self.rewrite_atom(and_link, |t| self.conjunction_to_disjunction(t))
    }

    /// [`disjunction_to_conjunction`](Self::disjunction_to_conjunction) on a stored link.
    pub fn disjunction_to_conjunction_atom(&self, or_link: AtomRef) -> Result<AtomRef> {
        self.rewrite_atom(or_link, |t| self.disjunction_to_conjunction(t))
    }

    /// [`existential_to_universal`](Self::existential_to_universal) on a stored link.
    pub fn existential_to_universal_atom(&self, exists_link: AtomRef) -> Result<AtomRef> {
        self.rewrite_atom(exists_link, |t| self.existential_to_universal(t))
    }

    /// [`universal_to_existential`](Self::universal_to_existential) on a stored link.
    pub fn universal_to_existential_atom(&self, forall_link: AtomRef) -> Result<AtomRef> {
        self.rewrite_atom(forall_link, |t| self.universal_to_existential(t))
    }

    /// [`equivalence_to_implication_pair`](Self::equivalence_to_implication_pair) on a stored link.
    pub fn equivalence_to_implication_pair_atom(
        &self,
        equiv_link: AtomRef,
    ) -> Result<(AtomRef, AtomRef)> {
        let tree = PatternTree::from_atom(self.space.as_ref(), equiv_link)?;
        let (forward, backward) = self.equivalence_to_implication_pair(&tree)?;
        Ok((
            forward.instantiate(self.space.as_ref())?,
            backward.instantiate(self.space.as_ref())?,
        ))
    }

    fn rewrite_atom<F>(&self, atom: AtomRef, rewrite: F) -> Result<AtomRef>
    where
        F: FnOnce(&PatternTree) -> Result<PatternTree>,
    {
        let tree = PatternTree::from_atom(self.space.as_ref(), atom)?;
        rewrite(&tree)?.instantiate(self.space.as_ref())
    }
}
