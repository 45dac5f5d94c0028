//! Per-variable unique table.
//!
//! The manager keeps one subtable per variable:
//!
//! ```text
//! subtables[0] → Subtable for x0
//! subtables[1] → Subtable for x1
//! ...
//! ```
//!
//! Each subtable maps the `(high, low)` children of a node to the index of the
//! single node with that variable and those children. Since all nodes in a
//! subtable share the variable, it is not part of the key.
//!
//! Subtables only grow: entries are never removed or rewritten, so an index
//! found here stays valid for the lifetime of the manager.

use std::collections::HashMap;

use crate::reference::Ref;
use crate::types::Var;

/// A subtable storing BDD nodes for a single variable.
#[derive(Debug, Clone)]
pub struct Subtable {
    /// The variable for all nodes in this subtable.
    pub variable: Var,

    /// Map from (high, low) to the node in the global node table.
    nodes: HashMap<(Ref, Ref), Ref>,
}

impl Subtable {
    /// Create a new empty subtable for the given variable.
    pub fn new(variable: Var) -> Self {
        Self {
            variable,
            nodes: HashMap::new(),
        }
    }

    /// Look up a node by its children.
    pub fn find(&self, high: Ref, low: Ref) -> Option<Ref> {
        self.nodes.get(&(high, low)).copied()
    }

    /// Record a freshly allocated node.
    ///
    /// # Panics
    ///
    /// Panics if a node with these children is already recorded.
    pub fn insert(&mut self, high: Ref, low: Ref, node: Ref) {
        let previous = self.nodes.insert((high, low), node);
        assert!(
            previous.is_none(),
            "Subtable for {} already holds a node with children ({}, {})",
            self.variable,
            high,
            low
        );
    }

    /// Get the number of nodes in this subtable.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the subtable is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all (high, low, node) tuples.
    pub fn iter(&self) -> impl Iterator<Item = (Ref, Ref, Ref)> + '_ {
        self.nodes.iter().map(|(&(high, low), &node)| (high, low, node))
    }
}
