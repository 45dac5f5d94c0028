//! Type-safe wrapper for BDD variables.
//!
//! Variables are 0-indexed positions in the fixed, static variable ordering:
//! smaller indices sit closer to the root. Terminal nodes are placed at the
//! pseudo-level `num_vars`, below every real variable.
use std::fmt;

/// A variable identifier (0-indexed).
///
/// # Invariants
///
/// - The position of a variable in the ordering is its index; the ordering never changes.
/// - A variable is only meaningful for a manager with `num_vars > id`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given index.
    pub const fn new(id: u32) -> Self {
        Var(id)
    }

    /// Returns the raw variable index as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the variable index as a `usize`, for indexing per-variable tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<u32> for Var {
    fn from(id: u32) -> Self {
        Var(id)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}
