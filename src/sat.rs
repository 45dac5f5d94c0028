use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;
use crate::types::Var;

impl Bdd {
    /// Value of `f` under a complete assignment, `assignment[k]` being the value of `x_k`.
    ///
    /// # Panics
    ///
    /// Panics if the assignment does not cover all variables of the manager.
    pub fn evaluate(&self, f: Ref, assignment: &[bool]) -> bool {
        assert!(
            assignment.len() >= self.num_vars() as usize,
            "Assignment of length {} does not cover {} variables",
            assignment.len(),
            self.num_vars()
        );

        let mut current = f;
        loop {
            match self.node(current) {
                Node::Terminal(value) => return value,
                Node::Decision { variable, high, low } => {
                    current = if assignment[variable.index()] { high } else { low };
                }
            }
        }
    }

    /// Returns one satisfying assignment of `f`, if any exists.
    ///
    /// Only the variables tested along the chosen path are assigned; the
    /// others may take any value. The THEN branch is preferred whenever it is
    /// satisfiable.
    ///
    /// Returns `None` if `f` is the constant false function.
    pub fn one_sat(&self, f: Ref) -> Option<Vec<(Var, bool)>> {
        self.check(f);
        if self.is_zero(f) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = f;

        // In a reduced diagram every non-zero node reaches ONE.
        while let Node::Decision { variable, high, low } = self.node(current) {
            if !self.is_zero(high) {
                path.push((variable, true));
                current = high;
            } else {
                path.push((variable, false));
                current = low;
            }
        }

        Some(path)
    }

    /// Number of assignments to all `num_vars` variables that satisfy `f`.
    pub fn sat_count(&self, f: Ref) -> BigUint {
        self.check(f);
        let max = BigUint::from(1u32) << self.num_vars();
        let mut cache = HashMap::new();
        self.sat_count_(f, &max, &mut cache)
    }

    // Each node counts as a fraction of `max`: halving the sum of the children
    // makes skipped levels irrelevant.
    fn sat_count_(&self, f: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        let (high, low) = match self.node(f) {
            Node::Terminal(false) => return BigUint::ZERO,
            Node::Terminal(true) => return max.clone(),
            Node::Decision { high, low, .. } => (high, low),
        };

        if let Some(count) = cache.get(&f) {
            return count.clone();
        }

        let count_low = self.sat_count_(low, max, cache);
        let count_high = self.sat_count_(high, max, cache);
        let count: BigUint = (count_low + count_high) >> 1;

        cache.insert(f, count.clone());
        count
    }
}
