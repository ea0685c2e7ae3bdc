//! Fresh variable creation
//!
//! Every variable handed out by a [`VariableFactory`] carries a generation id
//! drawn from one process-wide counter, so variables from different
//! factories, rules or inference steps never collide. Each variable is also
//! registered with the store as a `VariableNode` placeholder, so type queries
//! can treat it like any other atom.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use pln_atomspace::{AtomRef, AtomSpace, AtomType};

use crate::combinatorics::bounded_generate;
use crate::error::{Error, Result};
use crate::pattern::{PatternTree, Variable};

/// Prefix of auto-generated variable names.
pub const DEFAULT_VARIABLE_PREFIX: &str = "$pln_var_";

/// Generation 0 is reserved for variables read from foreign placeholder names.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Creates fresh variables and registers their placeholder atoms.
#[derive(Clone)]
pub struct VariableFactory {
    space: Arc<dyn AtomSpace>,
    prefix: String,
}

impl VariableFactory {
    /// Creates a factory that names unhinted variables `$pln_var_<n>`.
    pub fn new(space: Arc<dyn AtomSpace>) -> Self {
        Self::with_prefix(space, DEFAULT_VARIABLE_PREFIX)
    }

    /// Creates a factory with a custom prefix for unhinted variables.
    pub fn with_prefix(space: Arc<dyn AtomSpace>, prefix: impl Into<String>) -> Self {
        Self {
            space,
            prefix: prefix.into(),
        }
    }

    /// The prefix of auto-generated names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Allocates a new variable.
    ///
    /// With a hint the variable is named after it; otherwise the name is the
    /// prefix followed by the generation id. Either way the generation id is
    /// new, so repeated calls with the same hint yield distinct variables.
    ///
    /// A generation whose placeholder already exists in the store, e.g. one
    /// written by another process, is skipped so the variable cannot alias
    /// a variable read back from the store.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the placeholder atom cannot be looked up or registered.
    pub fn fresh_variable(&self, name_hint: Option<&str>) -> Result<Variable> {
        loop {
            let generation = NEXT_GENERATION.fetch_add(1, Ordering::SeqCst);
            let name = match name_hint {
                Some(hint) => hint.to_string(),
                None => format!("{}{}", self.prefix, generation),
            };
            let var = Variable::new(name, generation);

            if let Some(existing) = self.lookup(&var)? {
                debug!("placeholder for {} already exists as {}, skipping", var, existing);
                continue;
            }

            let atom = self.register(&var)?;
            debug!("registered variable {} as {}", var, atom);
            return Ok(var);
        }
    }

    /// Allocates a new variable and wraps it in a leaf.
    pub fn fresh_leaf(&self, name_hint: Option<&str>) -> Result<PatternTree> {
        self.fresh_variable(name_hint).map(PatternTree::variable)
    }

    /// Allocates `n` variables, stopping at the first store failure.
    pub fn fresh_variables(&self, n: usize, name_hint: Option<&str>) -> Result<Vec<Variable>> {
        bounded_generate(n, |_| self.fresh_variable(name_hint))
            .iter()
            .collect()
    }

    fn lookup(&self, var: &Variable) -> Result<Option<AtomRef>> {
        self.space
            .get_node(AtomType::VariableNode, &var.atom_name())
            .map_err(|e| Error::StoreUnavailable(e.to_string()))
    }

    fn register(&self, var: &Variable) -> Result<AtomRef> {
        self.space
            .create_node(AtomType::VariableNode, &var.atom_name())
            .map_err(|e| Error::StoreUnavailable(e.to_string()))
    }
}
