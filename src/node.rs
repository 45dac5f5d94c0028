use crate::reference::Ref;
use crate::types::Var;

/// An entry of the node table.
///
/// Terminals have no children. Decision nodes test `variable` and continue to
/// `high` (the THEN child) when it is true and to `low` (the ELSE child) otherwise.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    Terminal(bool),
    Decision { variable: Var, high: Ref, low: Ref },
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    /// Position of this node in the variable order, with terminals at `num_vars`.
    pub fn level(&self, num_vars: u32) -> u32 {
        match *self {
            Node::Terminal(_) => num_vars,
            Node::Decision { variable, .. } => variable.id(),
        }
    }

    pub fn variable(&self) -> Option<Var> {
        match *self {
            Node::Terminal(_) => None,
            Node::Decision { variable, .. } => Some(variable),
        }
    }

    /// The `(high, low)` children of a decision node.
    pub fn children(&self) -> Option<(Ref, Ref)> {
        match *self {
            Node::Terminal(_) => None,
            Node::Decision { high, low, .. } => Some((high, low)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ManagerId;

    #[test]
    fn test_terminal_level() {
        let node = Node::Terminal(true);
        assert!(node.is_terminal());
        assert_eq!(node.level(4), 4);
        assert_eq!(node.variable(), None);
        assert_eq!(node.children(), None);
    }

    #[test]
    fn test_decision_node() {
        let m = ManagerId::fresh();
        let node = Node::Decision {
            variable: Var::new(2),
            high: Ref::new(m, 1),
            low: Ref::new(m, 0),
        };
        assert!(!node.is_terminal());
        assert_eq!(node.level(4), 2);
        assert_eq!(node.variable(), Some(Var::new(2)));
        assert_eq!(node.children(), Some((Ref::new(m, 1), Ref::new(m, 0))));
    }
}
