//! Meta-patterns and rule premise sets
//!
//! A rule advertises what it needs as a set of alternatives. Each
//! alternative is an ordered premise list; the rule applies when any one
//! list can be satisfied as a whole.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::pattern::PatternTree;

/// A pattern tree used as a rule input or output shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetaPattern {
    tree: PatternTree,
    /// `true` when the pattern stands for any formula of the root's type,
    /// `false` when it denotes this one fixed structure.
    template: bool,
}

impl MetaPattern {
    /// Creates a meta-pattern.
    pub fn new(tree: PatternTree, template: bool) -> Self {
        Self { tree, template }
    }

    /// A pattern denoting exactly `tree`.
    pub fn fixed(tree: PatternTree) -> Self {
        Self::new(tree, false)
    }

    /// A pattern standing for formulas of `tree`'s type.
    pub fn template(tree: PatternTree) -> Self {
        Self::new(tree, true)
    }

    /// The underlying tree.
    pub fn tree(&self) -> &PatternTree {
        &self.tree
    }

    /// Returns `true` for templates.
    pub fn is_template(&self) -> bool {
        self.template
    }

    /// Consumes the meta-pattern, returning the tree.
    pub fn into_tree(self) -> PatternTree {
        self.tree
    }
}

impl fmt::Display for MetaPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.template {
            write!(f, "template {}", self.tree)
        } else {
            write!(f, "{}", self.tree)
        }
    }
}

/// One alternative: premises that must hold together.
pub type PremiseList = Vec<MetaPattern>;

/// The alternatives a rule offers for one output.
///
/// Structurally identical premise lists are stored once. An empty set means
/// the rule does not apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetaPatternSet {
    alternatives: BTreeSet<PremiseList>,
}

impl RuleMetaPatternSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding exactly one premise list.
    pub fn singleton(premises: PremiseList) -> Self {
        let mut set = Self::new();
        set.insert(premises);
        set
    }

    /// Adds a premise list. Returns `false` if an identical list was already present.
    pub fn insert(&mut self, premises: PremiseList) -> bool {
        self.alternatives.insert(premises)
    }

    /// Checks for a structurally identical premise list.
    pub fn contains(&self, premises: &[MetaPattern]) -> bool {
        self.alternatives.iter().any(|p| p.as_slice() == premises)
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns `true` when the rule does not apply.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Iterates over the alternatives in structural order.
    pub fn iter(&self) -> impl Iterator<Item = &PremiseList> {
        self.alternatives.iter()
    }

    /// Serializes the set to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Extend<PremiseList> for RuleMetaPatternSet {
    fn extend<I: IntoIterator<Item = PremiseList>>(&mut self, iter: I) {
        self.alternatives.extend(iter);
    }
}

impl FromIterator<PremiseList> for RuleMetaPatternSet {
    fn from_iter<I: IntoIterator<Item = PremiseList>>(iter: I) -> Self {
        Self {
            alternatives: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RuleMetaPatternSet {
    type Item = PremiseList;
    type IntoIter = std::collections::btree_set::IntoIter<PremiseList>;

    fn into_iter(self) -> Self::IntoIter {
        self.alternatives.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pln_atomspace::{AtomRef, AtomType};

    fn leaf(raw: u64) -> MetaPattern {
        MetaPattern::fixed(PatternTree::concrete(
            AtomRef::from_raw(raw),
            AtomType::ConceptNode,
        ))
    }

    #[test]
    fn test_singleton() {
        let set = RuleMetaPatternSet::singleton(vec![leaf(1), leaf(2)]);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&[leaf(1), leaf(2)]));
        assert!(!set.contains(&[leaf(2), leaf(1)]));
    }

    #[test]
    fn test_structural_deduplication() {
        let mut set = RuleMetaPatternSet::new();
        assert!(set.insert(vec![leaf(1)]));
        assert!(!set.insert(vec![leaf(1)]));
        assert!(set.insert(vec![leaf(1), leaf(1)]));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_template_flag_distinguishes() {
        let tree = PatternTree::concrete(AtomRef::from_raw(1), AtomType::ConceptNode);
        let mut set = RuleMetaPatternSet::new();
        set.insert(vec![MetaPattern::fixed(tree.clone())]);
        set.insert(vec![MetaPattern::template(tree)]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_means_inapplicable() {
        let set: RuleMetaPatternSet = Vec::<PremiseList>::new().into_iter().collect();
        assert!(set.is_empty());
    }

    #[test]
    fn test_json_export() {
        let set = RuleMetaPatternSet::singleton(vec![leaf(4)]);
        let json = set.to_json().unwrap();
        assert!(json.contains("ConceptNode"));
        let restored: RuleMetaPatternSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, set);
    }
}
