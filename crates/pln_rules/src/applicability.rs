//! Rule applicability
//!
//! Given the output pattern a rule declares and the link types currently
//! known to head candidate premises, the engine works out which premise
//! lists could produce that output.
//!
//! ```text
//! output pattern ──┐
//!                  ▼
//!       ┌─────────────────────┐  unprovable / leaf / no candidates
//!       │ early-exit filter   │ ─────────────────────────────────▶ ∅
//!       └──────────┬──────────┘
//!                  ▼
//!       ┌─────────────────────┐
//!       │ checked_power_set   │  groupings of candidate types,
//!       │ (≤ min(arity, max)) │  bounded before any work starts
//!       └──────────┬──────────┘
//!                  ▼
//!       ┌─────────────────────┐
//!       │ rewrite per grouping│  retag / dual / implication pair /
//!       │ LogicalTransformer  │  split into per-type blocks
//!       └──────────┬──────────┘
//!                  ▼
//!        RuleMetaPatternSet (deduplicated) + override flag
//! ```
//!
//! A grouping that fails with a `TypeError` is dropped and the search goes
//! on. A `StoreUnavailable` error aborts the whole call.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, trace};
use pln_atomspace::{AtomRef, AtomSpace, AtomType};

use crate::combinatorics::checked_power_set;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::meta::{MetaPattern, RuleMetaPatternSet};
use crate::pattern::{PatternTree, Variable};
use crate::transform::LogicalTransformer;
use crate::variable::VariableFactory;

/// The result of a partition computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionOutcome {
    /// Alternative premise lists, empty when the rule does not apply.
    pub partitions: RuleMetaPatternSet,
    /// Set when the rule's own partitioning replaces the controller's
    /// default input filter.
    pub override_input_filter: bool,
}

impl PartitionOutcome {
    fn inapplicable() -> Self {
        Self::default()
    }
}

/// Computes premise partitions for rule output patterns.
///
/// Holds no session state beyond the store capability and its configuration.
pub struct RuleApplicabilityEngine {
    space: Arc<dyn AtomSpace>,
    transformer: LogicalTransformer,
    variables: VariableFactory,
    config: EngineConfig,
}

impl RuleApplicabilityEngine {
    /// Creates an engine over `space`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` does not validate.
    pub fn new(space: Arc<dyn AtomSpace>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(space, config))
    }

    /// Creates an engine with [`EngineConfig::default`].
    pub fn with_defaults(space: Arc<dyn AtomSpace>) -> Self {
        Self::from_parts(space, EngineConfig::default())
    }

    fn from_parts(space: Arc<dyn AtomSpace>, config: EngineConfig) -> Self {
        Self {
            transformer: LogicalTransformer::new(space.clone()),
            variables: VariableFactory::with_prefix(space.clone(), config.variable_prefix.clone()),
            space,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The transformer used for dual rewrites.
    pub fn transformer(&self) -> &LogicalTransformer {
        &self.transformer
    }

    /// Returns `true` for types that never head a provable formula.
    ///
    /// These are node types, the abstract link types (`Atom`, `Link`,
    /// `OrderedLink`, `UnorderedLink`), `ListLink` and any type listed in
    /// [`EngineConfig::extra_unprovable_types`].
    pub fn is_unprovable_type(&self, ty: AtomType) -> bool {
        self.space.inherits_type(ty, AtomType::Node)
            || matches!(
                ty,
                AtomType::Atom
                    | AtomType::Link
                    | AtomType::OrderedLink
                    | AtomType::UnorderedLink
                    | AtomType::ListLink
            )
            || self.config.extra_unprovable_types.contains(&ty)
    }

    /// Computes the premise lists that could produce `output`.
    ///
    /// Groupings of up to `min(arity, max_premises)` candidate types are
    /// enumerated. A single type rewrites the whole output:
    /// - a strict subtype of the output type retags it,
    /// - a subtype of the connective dual yields `NOT(dual)`,
    /// - an implication type splits an equivalence into both directions.
    ///
    /// Several types split the children of an AND output into consecutive
    /// blocks, one per type in sorted order, each rewritten by the
    /// single-type rules or kept with the output type. OR outputs are not
    /// split: any single block already entails an OR, so requiring every
    /// block would only add premises.
    ///
    /// # Errors
    ///
    /// - `EnumerationBoundExceeded` if the groupings would exceed
    ///   [`EngineConfig::max_enumerated_subsets`].
    /// - `StoreUnavailable` if the store fails.
    pub fn compute_premise_partitions(
        &self,
        output: &MetaPattern,
        candidates: &BTreeSet<AtomType>,
    ) -> Result<PartitionOutcome> {
        let tree = output.tree();
        let output_type = tree.atom_type();

        if self.is_unprovable_type(output_type) || tree.is_leaf() || candidates.is_empty() {
            trace!("no partitions for {}", tree);
            return Ok(PartitionOutcome::inapplicable());
        }

        let max_size = tree.arity().min(self.config.max_premises);
        let groupings = checked_power_set(
            candidates,
            max_size,
            false,
            self.config.max_enumerated_subsets,
        )?;

        let mut partitions = RuleMetaPatternSet::new();
        for grouping in groupings.iter().filter(|g| !g.is_empty()) {
            match self.premises_for_grouping(tree, grouping) {
                Ok(Some(premises)) => {
                    trace!("{:?} => {} premises", grouping, premises.len());
                    partitions.insert(
                        premises
                            .into_iter()
                            .map(|p| MetaPattern::new(p, output.is_template()))
                            .collect(),
                    );
                }
                Ok(None) => {}
                Err(e) if e.is_recoverable() => {
                    debug!("discarding grouping {:?} for {}: {}", grouping, tree, e);
                }
                Err(e) => return Err(e),
            }
        }

        debug!("{} partitions for {}", partitions.len(), tree);
        Ok(PartitionOutcome {
            override_input_filter: !partitions.is_empty(),
            partitions,
        })
    }

    /// [`compute_premise_partitions`](Self::compute_premise_partitions) for a
    /// stored atom, read as a template output.
    pub fn compute_premise_partitions_for_atom(
        &self,
        output: AtomRef,
        candidates: &BTreeSet<AtomType>,
    ) -> Result<PartitionOutcome> {
        let tree = PatternTree::from_atom(self.space.as_ref(), output)?;
        self.compute_premise_partitions(&MetaPattern::template(tree), candidates)
    }

    /// Allocates a fresh variable named after the configured prefix or `name_hint`.
    pub fn fresh_variable(&self, name_hint: Option<&str>) -> Result<Variable> {
        self.variables.fresh_variable(name_hint)
    }

    /// Replaces every occurrence of `var` in `tree` with `replacement`.
    pub fn substitute(
        &self,
        tree: &PatternTree,
        var: &Variable,
        replacement: &PatternTree,
    ) -> PatternTree {
        tree.substitute(var, replacement)
    }

    fn premises_for_grouping(
        &self,
        tree: &PatternTree,
        grouping: &BTreeSet<AtomType>,
    ) -> Result<Option<Vec<PatternTree>>> {
        let types: Vec<AtomType> = grouping.iter().copied().collect();
        if let [single] = types.as_slice() {
            return self.rewrite_whole(tree, *single);
        }

        if !self.is_partitionable(tree.atom_type()) {
            return Ok(None);
        }

        let mut premises = Vec::new();
        for (block, ty) in split_blocks(tree.children(), types.len())
            .into_iter()
            .zip(types)
        {
            let block = PatternTree::link(tree.atom_type(), block.to_vec())?;
            match self.rewrite_block(&block, ty)? {
                Some(rewritten) => premises.extend(rewritten),
                None => return Ok(None),
            }
        }
        Ok(Some(premises))
    }

    fn rewrite_block(&self, block: &PatternTree, ty: AtomType) -> Result<Option<Vec<PatternTree>>> {
        if ty == block.atom_type() {
            return Ok(Some(vec![block.clone()]));
        }
        self.rewrite_whole(block, ty)
    }

    fn rewrite_whole(&self, tree: &PatternTree, ty: AtomType) -> Result<Option<Vec<PatternTree>>> {
        let output_type = tree.atom_type();
        if ty == output_type {
            return Ok(None);
        }

        if self.space.inherits_type(ty, output_type) {
            return Ok(Some(vec![tree.with_new_type(ty)?]));
        }

        if let Some(dual) = output_type.connective_dual() {
            if self.space.inherits_type(ty, dual) {
                return self.dual_premise(tree, ty).map(|p| Some(vec![p]));
            }
        }

        if self.space.inherits_type(output_type, AtomType::EquivalenceLink)
            && self.space.inherits_type(ty, AtomType::ImplicationLink)
        {
            let (forward, backward) = self.transformer.equivalence_to_implication_pair(tree)?;
            return Ok(Some(vec![
                forward.with_new_type(ty)?,
                backward.with_new_type(ty)?,
            ]));
        }

        Ok(None)
    }

    /// `NOT(dual(tree))` with the dual headed by `ty`.
    ///
    /// AND and OR families go through `swap_connective`, so subtypes on
    /// either side are kept.
    fn dual_premise(&self, tree: &PatternTree, ty: AtomType) -> Result<PatternTree> {
        let output_type = tree.atom_type();
        let dual = if self.is_connective(output_type) {
            self.transformer.swap_connective(tree, output_type, ty)?
        } else {
            self.transformer.dual(tree)?.with_new_type(ty)?
        };
        self.transformer.negate(&dual)
    }

    fn is_connective(&self, ty: AtomType) -> bool {
        self.space.inherits_type(ty, AtomType::AndLink)
            || self.space.inherits_type(ty, AtomType::OrLink)
    }

    fn is_partitionable(&self, ty: AtomType) -> bool {
        self.space.inherits_type(ty, AtomType::AndLink)
    }
}

/// Splits `items` into `k` consecutive blocks whose sizes differ by at most one.
fn split_blocks<T>(items: &[T], k: usize) -> Vec<&[T]> {
    let base = items.len() / k;
    let extra = items.len() % k;
    let mut blocks = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let len = base + usize::from(i < extra);
        blocks.push(&items[start..start + len]);
        start += len;
    }
    blocks
}
