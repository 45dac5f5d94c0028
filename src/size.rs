//! Node counting.
//!
//! Two different sizes are reported and kept apart by name:
//!
//! - [`Bdd::num_nodes`] is the size of the whole package: every non-terminal
//!   node ever created, reachable or not.
//! - [`Bdd::size`] is the size of one function: the distinct non-terminal
//!   nodes reachable from its root.

use std::collections::BTreeSet;

use log::debug;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;

impl Bdd {
    /// Number of non-terminal nodes in the node table, dead nodes included.
    pub fn num_nodes(&self) -> u64 {
        (self.table_len() - 2) as u64
    }

    /// Number of distinct non-terminal nodes reachable from `f`.
    ///
    /// Shared subgraphs are counted once. Both terminals have size 0.
    pub fn size(&self, f: Ref) -> u64 {
        debug!("size(f = {})", f);
        self.check(f);

        if self.is_terminal(f) {
            return 0;
        }

        let nodes = self.nodes();
        let mut visited = vec![false; nodes.len()];
        visited[Ref::ZERO_INDEX as usize] = true;
        visited[Ref::ONE_INDEX as usize] = true;

        let size = size_rec(&nodes, f, &mut visited);
        debug!("computed: size({}) -> {}", f, size);
        size
    }

    /// Indices of all non-terminal nodes reachable from any of the `roots`.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Ref>) -> BTreeSet<u32> {
        let nodes = self.nodes();
        let mut visited = BTreeSet::new();
        let mut stack = Vec::new();
        for root in roots {
            self.check(root);
            stack.push(root);
        }

        while let Some(node) = stack.pop() {
            if let Node::Decision { high, low, .. } = nodes[node.index()] {
                if visited.insert(node.raw()) {
                    stack.push(high);
                    stack.push(low);
                }
            }
        }

        visited
    }
}

/// Pre-order walk: mark `f`, then descend into each child not seen yet.
fn size_rec(nodes: &[Node], f: Ref, visited: &mut [bool]) -> u64 {
    visited[f.index()] = true;

    let (high, low) = match nodes[f.index()].children() {
        Some(children) => children,
        None => return 0,
    };

    let mut n = 1;
    if !visited[high.index()] {
        n += size_rec(nodes, high, visited);
    }
    if !visited[low.index()] {
        n += size_rec(nodes, low, visited);
    }
    n
}
