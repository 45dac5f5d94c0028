//! Debug utilities for inspecting BDD structure.
//!
//! This module provides the indented tree dump, per-node information and a
//! full-table consistency check. These are primarily useful in tests and
//! during development.

use std::collections::HashMap;
use std::fmt::Write;

use thiserror::Error;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;
use crate::types::Var;

/// Detailed information about a single BDD node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    /// The reference to this node
    pub node_ref: Ref,
    /// Variable at this node (None for terminals)
    pub variable: Option<Var>,
    /// THEN child
    pub high: Option<Ref>,
    /// ELSE child
    pub low: Option<Ref>,
    /// Value of a terminal node
    pub value: Option<bool>,
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.value, self.variable, self.high, self.low) {
            (Some(true), ..) => write!(f, "ONE"),
            (Some(false), ..) => write!(f, "ZERO"),
            (None, Some(variable), Some(high), Some(low)) => {
                write!(f, "{}(var={}, high={}, low={})", self.node_ref, variable, high, low)
            }
            _ => write!(f, "{}(?)", self.node_ref),
        }
    }
}

/// A violation of one of the structural invariants of the node table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("terminal {index} is missing or holds the wrong value")]
    BadTerminal { index: u32 },
    #[error("node @{node} tests {variable}, but {num_vars} variables exist")]
    VariableOutOfRange { node: u32, variable: Var, num_vars: u32 },
    #[error("child @{child} of node @{node} is not a valid node")]
    DanglingChild { node: u32, child: u32 },
    #[error("child @{child} (level {child_level}) of node @{node} does not lie below {variable}")]
    Ordering {
        node: u32,
        variable: Var,
        child: u32,
        child_level: u32,
    },
    #[error("node @{node} has identical children @{child}")]
    Redundant { node: u32, child: u32 },
    #[error("nodes @{first} and @{second} are the same triple")]
    Duplicate { first: u32, second: u32 },
    #[error("unique table of {variable} disagrees with the node table at @{node}")]
    UniqueTableMismatch { variable: Var, node: u32 },
}

impl Bdd {
    /// Get detailed information about a single node.
    pub fn node_info(&self, node_ref: Ref) -> NodeInfo {
        match self.node(node_ref) {
            Node::Terminal(value) => NodeInfo {
                node_ref,
                variable: None,
                high: None,
                low: None,
                value: Some(value),
            },
            Node::Decision { variable, high, low } => NodeInfo {
                node_ref,
                variable: Some(variable),
                high: Some(high),
                low: Some(low),
                value: None,
            },
        }
    }

    /// Write the diagram rooted at `f` as an indented tree.
    ///
    /// Every node is indented by two spaces per level, terminals sitting at
    /// level `num_vars`. Shared subgraphs are written once per path reaching
    /// them, so the output can be exponentially larger than the diagram.
    pub fn write_tree(&self, f: Ref, out: &mut impl Write) -> std::fmt::Result {
        let indent = "  ".repeat(self.level(f) as usize);
        match self.node(f) {
            Node::Terminal(value) => {
                writeln!(out, "{}node {}: constant {}", indent, f.index(), value as u8)?;
            }
            Node::Decision { variable, high, low } => {
                writeln!(
                    out,
                    "{}node {}: var = {}, T = {}, E = {}",
                    indent,
                    f.index(),
                    variable.id(),
                    high.index(),
                    low.index()
                )?;
                writeln!(out, "{}> THEN branch", indent)?;
                self.write_tree(high, out)?;
                writeln!(out, "{}> ELSE branch", indent)?;
                self.write_tree(low, out)?;
            }
        }
        Ok(())
    }

    /// The indented tree of `f` as a string.
    pub fn tree_string(&self, f: Ref) -> String {
        let mut result = String::new();
        self.write_tree(f, &mut result).unwrap();
        result
    }

    /// Print the indented tree of `f` to stdout.
    pub fn print(&self, f: Ref) {
        print!("{}", self.tree_string(f));
    }

    /// Scan the whole node table and verify the structural invariants.
    ///
    /// Checks that both terminals are in place, that every child lies strictly
    /// below its parent, that no node has identical children, that no
    /// `(variable, high, low)` triple occurs twice, and that the unique table
    /// indexes exactly the nodes of the node table.
    pub fn check_structure(&self) -> Result<(), StructureError> {
        let nodes = self.nodes();
        let num_vars = self.num_vars();

        for (index, value) in [(Ref::ZERO_INDEX, false), (Ref::ONE_INDEX, true)] {
            if nodes.get(index as usize) != Some(&Node::Terminal(value)) {
                return Err(StructureError::BadTerminal { index });
            }
        }

        let mut seen: HashMap<(Var, u32, u32), u32> = HashMap::new();
        let mut counts = vec![0usize; num_vars as usize];

        for (index, node) in nodes.iter().enumerate().skip(2) {
            let index = index as u32;
            let (variable, high, low) = match *node {
                Node::Terminal(_) => return Err(StructureError::BadTerminal { index }),
                Node::Decision { variable, high, low } => (variable, high, low),
            };

            if variable.id() >= num_vars {
                return Err(StructureError::VariableOutOfRange {
                    node: index,
                    variable,
                    num_vars,
                });
            }
            for child in [high, low] {
                if child.manager() != self.id() || child.index() >= nodes.len() {
                    return Err(StructureError::DanglingChild {
                        node: index,
                        child: child.raw(),
                    });
                }
                let child_level = nodes[child.index()].level(num_vars);
                if child_level <= variable.id() {
                    return Err(StructureError::Ordering {
                        node: index,
                        variable,
                        child: child.raw(),
                        child_level,
                    });
                }
            }
            if high == low {
                return Err(StructureError::Redundant {
                    node: index,
                    child: high.raw(),
                });
            }
            if let Some(&first) = seen.get(&(variable, high.raw(), low.raw())) {
                return Err(StructureError::Duplicate { first, second: index });
            }
            seen.insert((variable, high.raw(), low.raw()), index);

            let indexed = self.subtables()[variable.index()].find(high, low);
            if indexed.map(|r| r.raw()) != Some(index) {
                return Err(StructureError::UniqueTableMismatch { variable, node: index });
            }
            counts[variable.index()] += 1;
        }

        for (subtable, &count) in self.subtables().iter().zip(&counts) {
            if subtable.len() != count {
                let node = subtable.iter().map(|(_, _, n)| n.raw()).max().unwrap_or(0);
                return Err(StructureError::UniqueTableMismatch {
                    variable: subtable.variable,
                    node,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_node_info() {
        let bdd = Bdd::new(2);
        let x = bdd.mk_var(1);

        let info = bdd.node_info(x);
        assert_eq!(info.variable, Some(Var::new(1)));
        assert_eq!(info.high, Some(bdd.one()));
        assert_eq!(info.low, Some(bdd.zero()));
        assert_eq!(info.value, None);
        assert_eq!(info.to_string(), "@2(var=x1, high=@1, low=@0)");

        let info = bdd.node_info(bdd.one());
        assert_eq!(info.value, Some(true));
        assert_eq!(info.to_string(), "ONE");
        assert_eq!(bdd.node_info(bdd.zero()).to_string(), "ZERO");
    }

    #[test]
    fn test_tree_string_terminal() {
        let bdd = Bdd::new(2);
        assert_eq!(bdd.tree_string(bdd.one()), "    node 1: constant 1\n");
    }

    #[test]
    fn test_tree_string_literal() {
        let bdd = Bdd::new(2);
        let x = bdd.mk_var(1);
        let expected = "  node 2: var = 1, T = 1, E = 0\n  > THEN branch\n    node 1: constant 1\n  > ELSE branch\n    node 0: constant 0\n";
        assert_eq!(bdd.tree_string(x), expected);
    }

    #[test]
    fn test_tree_repeats_shared_subgraphs() {
        let bdd = Bdd::new(3);
        let x0 = bdd.mk_var(0);
        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        // (x0 | x1) & x2: the x2 node is reached from x0 and from x1.
        let f = bdd.apply_and(bdd.apply_or(x0, x1), x2);
        bdd.print(f);

        let tree = bdd.tree_string(f);
        assert_eq!(bdd.size(f), 3);
        assert_eq!(tree.matches("var = 0").count(), 1);
        assert_eq!(tree.matches("var = 1").count(), 1);
        assert_eq!(tree.matches("var = 2").count(), 2);
        assert_eq!(tree.matches("constant").count(), 5);
    }

    #[test]
    fn test_check_structure_after_operations() {
        let bdd = Bdd::new(4);
        let xs: Vec<Ref> = (0..4).map(|v| bdd.mk_var(v)).collect();
        assert_eq!(bdd.check_structure(), Ok(()));

        let f = bdd.apply_ite(xs[0], bdd.apply_xor(xs[1], xs[3]), xs[2]);
        let g = bdd.apply_and(f, bdd.apply_not(xs[2]));
        let _ = bdd.apply_xor(g, bdd.apply_or(xs[0], xs[3]));
        assert_eq!(bdd.check_structure(), Ok(()));
    }

    #[test]
    fn test_check_structure_ordering() {
        let bdd = Bdd::new(3);
        let x0 = bdd.mk_var(0);
        // x1 above x0
        let bad = bdd.push_raw(
            Node::Decision {
                variable: Var::new(1),
                high: x0,
                low: bdd.zero(),
            },
            true,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::Ordering {
                node: bad.raw(),
                variable: Var::new(1),
                child: x0.raw(),
                child_level: 0,
            })
        );
    }

    #[test]
    fn test_check_structure_same_level_child() {
        let bdd = Bdd::new(3);
        let x1 = bdd.mk_var(1);
        let bad = bdd.push_raw(
            Node::Decision {
                variable: Var::new(1),
                high: bdd.one(),
                low: x1,
            },
            true,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::Ordering {
                node: bad.raw(),
                variable: Var::new(1),
                child: x1.raw(),
                child_level: 1,
            })
        );
    }

    #[test]
    fn test_check_structure_redundant() {
        let bdd = Bdd::new(3);
        let x1 = bdd.mk_var(1);
        let bad = bdd.push_raw(
            Node::Decision {
                variable: Var::new(0),
                high: x1,
                low: x1,
            },
            true,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::Redundant {
                node: bad.raw(),
                child: x1.raw(),
            })
        );
    }

    #[test]
    fn test_check_structure_duplicate() {
        let bdd = Bdd::new(2);
        let x0 = bdd.mk_var(0);
        let copy = bdd.push_raw(
            Node::Decision {
                variable: Var::new(0),
                high: bdd.one(),
                low: bdd.zero(),
            },
            false,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::Duplicate {
                first: x0.raw(),
                second: copy.raw(),
            })
        );
    }

    #[test]
    fn test_check_structure_unindexed_node() {
        let bdd = Bdd::new(2);
        let hidden = bdd.push_raw(
            Node::Decision {
                variable: Var::new(1),
                high: bdd.one(),
                low: bdd.zero(),
            },
            false,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::UniqueTableMismatch {
                variable: Var::new(1),
                node: hidden.raw(),
            })
        );
    }

    #[test]
    fn test_check_structure_dangling_child() {
        let bdd = Bdd::new(2);
        let missing = Ref::new(bdd.id(), 50);
        let bad = bdd.push_raw(
            Node::Decision {
                variable: Var::new(0),
                high: missing,
                low: bdd.zero(),
            },
            false,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::DanglingChild {
                node: bad.raw(),
                child: 50,
            })
        );
    }

    #[test]
    fn test_check_structure_foreign_child() {
        let bdd = Bdd::new(2);
        let other = Bdd::new(2);
        let foreign = other.mk_var(1);
        let bad = bdd.push_raw(
            Node::Decision {
                variable: Var::new(0),
                high: foreign,
                low: bdd.zero(),
            },
            false,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::DanglingChild {
                node: bad.raw(),
                child: foreign.raw(),
            })
        );
    }

    #[test]
    fn test_check_structure_variable_out_of_range() {
        let bdd = Bdd::new(2);
        let bad = bdd.push_raw(
            Node::Decision {
                variable: Var::new(5),
                high: bdd.one(),
                low: bdd.zero(),
            },
            false,
        );
        assert_eq!(
            bdd.check_structure(),
            Err(StructureError::VariableOutOfRange {
                node: bad.raw(),
                variable: Var::new(5),
                num_vars: 2,
            })
        );
    }

    #[test]
    fn test_check_structure_extra_terminal() {
        let bdd = Bdd::new(2);
        let bad = bdd.push_raw(Node::Terminal(true), false);
        assert_eq!(bdd.check_structure(), Err(StructureError::BadTerminal { index: bad.raw() }));
    }

    #[test]
    fn test_structure_error_display() {
        let err = StructureError::Redundant { node: 5, child: 3 };
        assert_eq!(err.to_string(), "node @5 has identical children @3");
    }
}
