use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_MANAGER_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of a [`Bdd`][crate::bdd::Bdd] manager, used to tell apart handles from different managers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ManagerId(u32);

impl ManagerId {
    /// Allocate a fresh, process-unique manager identity.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ManagerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A handle to a node in a [`Bdd`][crate::bdd::Bdd] manager.
///
/// The handle is a stable index into the manager's node table, tagged with the
/// identity of the manager that produced it. Indices 0 and 1 are always the
/// constant false and constant true nodes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ref {
    manager: ManagerId,
    index: u32,
}

impl Ref {
    /// Index of the constant false node.
    pub const ZERO_INDEX: u32 = 0;
    /// Index of the constant true node.
    pub const ONE_INDEX: u32 = 1;

    pub(crate) const fn new(manager: ManagerId, index: u32) -> Self {
        Self { manager, index }
    }

    /// Return the index of the referenced node.
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Return the raw 32-bit index.
    pub const fn raw(self) -> u32 {
        self.index
    }

    /// Return the identity of the manager owning this node.
    pub const fn manager(self) -> ManagerId {
        self.manager
    }

    /// Whether this handle points to one of the two terminal nodes.
    pub const fn is_terminal(self) -> bool {
        self.index <= Self::ONE_INDEX
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_differ() {
        let a = ManagerId::fresh();
        let b = ManagerId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ref_terminal() {
        let m = ManagerId::fresh();
        assert!(Ref::new(m, 0).is_terminal());
        assert!(Ref::new(m, 1).is_terminal());
        assert!(!Ref::new(m, 2).is_terminal());
        assert_eq!(Ref::new(m, 7).to_string(), "@7");
    }

    #[test]
    fn test_ref_equality_depends_on_manager() {
        let a = ManagerId::fresh();
        let b = ManagerId::fresh();
        assert_eq!(Ref::new(a, 3), Ref::new(a, 3));
        assert_ne!(Ref::new(a, 3), Ref::new(b, 3));
    }
}
