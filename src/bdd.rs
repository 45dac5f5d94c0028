//! The BDD manager and the core algorithms.
//!
//! A [`Bdd`] owns an append-only node table and one [`Subtable`] per variable.
//! Every non-terminal node is created by [`Bdd::mk_node`], which applies the
//! identical-children reduction and hash-conses `(variable, high, low)` triples.
//! Together with the fixed variable order this keeps every function in its
//! unique reduced ordered form, so two handles are equal iff they denote the
//! same Boolean function.
//!
//! The operations ([`Bdd::apply_not`], [`Bdd::apply_and`], [`Bdd::apply_xor`],
//! [`Bdd::apply_ite`]) all share one shape:
//!
//! 1. check the terminal and trivial cases,
//! 2. pick the topmost variable `x` among the operands,
//! 3. split each operand into its cofactors with respect to `x`,
//! 4. recurse on the THEN and ELSE cofactors,
//! 5. recombine with `mk_node(x, r1, r0)`.
//!
//! There is no computed table: every call recomputes its result, and the unique
//! table makes sure that repeated sub-results map to the same nodes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;

use log::debug;

use crate::node::Node;
use crate::reference::{ManagerId, Ref};
use crate::subtable::Subtable;
use crate::types::Var;

/// Construction parameters for a [`Bdd`] manager.
///
/// ```
/// use robdd::bdd::{Bdd, BddConfig};
///
/// let config = BddConfig::default().with_num_vars(3).with_initial_capacity(64);
/// let bdd = Bdd::with_config(config);
/// assert_eq!(bdd.num_vars(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BddConfig {
    /// Number of variables in the static order.
    pub num_vars: u32,
    /// Number of node table slots reserved up front.
    pub initial_capacity: usize,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            num_vars: 6,
            initial_capacity: 1024,
        }
    }
}

impl BddConfig {
    pub fn with_num_vars(mut self, num_vars: u32) -> Self {
        self.num_vars = num_vars;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

pub struct Bdd {
    id: ManagerId,
    num_vars: u32,
    nodes: RefCell<Vec<Node>>,
    subtables: RefCell<Vec<Subtable>>,
}

impl Bdd {
    /// Create a manager over the variables `x0 .. x{num_vars-1}`.
    pub fn new(num_vars: u32) -> Self {
        Self::with_config(BddConfig::default().with_num_vars(num_vars))
    }

    pub fn with_config(config: BddConfig) -> Self {
        let mut nodes = Vec::with_capacity(config.initial_capacity.max(2));
        nodes.push(Node::Terminal(false));
        nodes.push(Node::Terminal(true));

        let subtables = (0..config.num_vars).map(|v| Subtable::new(Var::new(v))).collect();

        let id = ManagerId::fresh();
        debug!("new manager {} with {} variables", id, config.num_vars);

        Self {
            id,
            num_vars: config.num_vars,
            nodes: RefCell::new(nodes),
            subtables: RefCell::new(subtables),
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::with_config(BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("id", &self.id)
            .field("num_vars", &self.num_vars)
            .field("size", &self.nodes.borrow().len())
            .finish()
    }
}

impl Bdd {
    pub fn id(&self) -> ManagerId {
        self.id
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Length of the node table, terminals included.
    pub(crate) fn table_len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Read-only view of the node table.
    pub(crate) fn nodes(&self) -> std::cell::Ref<'_, Vec<Node>> {
        self.nodes.borrow()
    }

    pub(crate) fn subtables(&self) -> std::cell::Ref<'_, Vec<Subtable>> {
        self.subtables.borrow()
    }

    pub fn zero(&self) -> Ref {
        Ref::new(self.id, Ref::ZERO_INDEX)
    }
    pub fn one(&self) -> Ref {
        Ref::new(self.id, Ref::ONE_INDEX)
    }
    pub fn constant(&self, value: bool) -> Ref {
        if value {
            self.one()
        } else {
            self.zero()
        }
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero()
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one()
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        self.is_zero(node) || self.is_one(node)
    }

    /// Panic unless `node` is a live handle of this manager.
    pub(crate) fn check(&self, node: Ref) {
        assert_eq!(
            node.manager(),
            self.id,
            "Node {} belongs to manager {}, not to manager {}",
            node,
            node.manager(),
            self.id
        );
        let len = self.table_len();
        assert!(node.index() < len, "Node {} does not exist (table size is {})", node, len);
    }

    fn check_var(&self, v: u32) {
        assert!(v < self.num_vars, "Variable x{} is out of range 0..{}", v, self.num_vars);
    }

    pub fn node(&self, node: Ref) -> Node {
        self.check(node);
        self.nodes.borrow()[node.index()]
    }

    /// Position of `node` in the variable order; both terminals sit at `num_vars`.
    pub fn level(&self, node: Ref) -> u32 {
        self.node(node).level(self.num_vars)
    }

    pub fn variable(&self, node: Ref) -> Option<Var> {
        self.node(node).variable()
    }

    /// THEN child of a decision node.
    pub fn high(&self, node: Ref) -> Ref {
        match self.node(node).children() {
            Some((high, _)) => high,
            None => panic!("Terminal node {} has no children", node),
        }
    }

    /// ELSE child of a decision node.
    pub fn low(&self, node: Ref) -> Ref {
        match self.node(node).children() {
            Some((_, low)) => low,
            None => panic!("Terminal node {} has no children", node),
        }
    }

    /// Look up (if it exists) or build (if not) the node `v ? high : low`.
    ///
    /// This is the only way non-terminal nodes are created.
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of range, if a child is not a live node of this
    /// manager, or if a child does not lie strictly below `v` in the order.
    pub fn mk_node(&self, v: u32, high: Ref, low: Ref) -> Ref {
        debug!("mk(v = {}, high = {}, low = {})", v, high, low);

        self.check_var(v);
        let high_level = self.level(high);
        let low_level = self.level(low);
        assert!(
            high_level > v,
            "THEN child {} (level {}) must lie below x{}",
            high,
            high_level,
            v
        );
        assert!(
            low_level > v,
            "ELSE child {} (level {}) must lie below x{}",
            low,
            low_level,
            v
        );

        // Identical children
        if high == low {
            debug!("mk: identical children {} == {}", high, low);
            return high;
        }

        let existing = self.subtables.borrow()[v as usize].find(high, low);
        if let Some(node) = existing {
            debug!("mk: found {}", node);
            return node;
        }

        let index = {
            let mut nodes = self.nodes.borrow_mut();
            assert!(nodes.len() < u32::MAX as usize, "Node table is full");
            let index = nodes.len() as u32;
            nodes.push(Node::Decision {
                variable: Var::new(v),
                high,
                low,
            });
            index
        };
        let node = Ref::new(self.id, index);
        self.subtables.borrow_mut()[v as usize].insert(high, low, node);
        debug!("mk: created {}", node);
        node
    }

    /// The function `x_var`, or `~x_var` when `complement` is set.
    pub fn literal(&self, var: u32, complement: bool) -> Ref {
        self.mk_node(var, self.constant(!complement), self.constant(complement))
    }

    pub fn mk_var(&self, var: u32) -> Ref {
        self.literal(var, false)
    }

    /// Cofactors `(low, high)` of `node` with respect to the variable `x`.
    ///
    /// A node that does not test `x` does not depend on it and is its own
    /// cofactor on both sides.
    pub fn top_cofactors(&self, node: Ref, x: u32) -> (Ref, Ref) {
        match self.node(node) {
            Node::Decision { variable, high, low } if variable.id() == x => (low, high),
            other => {
                let level = other.level(self.num_vars);
                assert!(
                    level > x,
                    "Node {} (level {}) lies above the split variable x{}",
                    node,
                    level,
                    x
                );
                (node, node)
            }
        }
    }

    /// Topmost level among the operands.
    fn top_variable(&self, operands: &[Ref]) -> u32 {
        operands
            .iter()
            .map(|&f| self.level(f))
            .min()
            .unwrap_or(self.num_vars)
    }

    /// Compute `~f`.
    pub fn apply_not(&self, f: Ref) -> Ref {
        debug!("apply_not(f = {})", f);

        match self.node(f) {
            Node::Terminal(value) => self.constant(!value),
            Node::Decision { variable, high, low } => {
                let r0 = self.apply_not(low);
                let r1 = self.apply_not(high);
                self.mk_node(variable.id(), r1, r0)
            }
        }
    }

    /// Compute `f ^ g`.
    pub fn apply_xor(&self, f: Ref, g: Ref) -> Ref {
        debug!("apply_xor(f = {}, g = {})", f, g);
        self.check(f);
        self.check(g);

        if f == g {
            debug!("F^F => 0");
            return self.zero();
        }
        if self.is_zero(f) {
            debug!("0^G => G");
            return g;
        }
        if self.is_zero(g) {
            debug!("F^0 => F");
            return f;
        }
        if self.is_one(f) {
            debug!("1^G => ~G");
            return self.apply_not(g);
        }
        if self.is_one(g) {
            debug!("F^1 => ~F");
            return self.apply_not(f);
        }
        if f == self.apply_not(g) {
            debug!("F^~F => 1");
            return self.one();
        }

        let x = self.top_variable(&[f, g]);
        let (f0, f1) = self.top_cofactors(f, x);
        let (g0, g1) = self.top_cofactors(g, x);

        let r0 = self.apply_xor(f0, g0);
        let r1 = self.apply_xor(f1, g1);
        self.mk_node(x, r1, r0)
    }

    /// Compute `f & g`.
    pub fn apply_and(&self, f: Ref, g: Ref) -> Ref {
        debug!("apply_and(f = {}, g = {})", f, g);
        self.check(f);
        self.check(g);

        if f == g {
            debug!("F&F => F");
            return f;
        }
        if self.is_zero(f) || self.is_zero(g) {
            debug!("F&0 => 0");
            return self.zero();
        }
        if self.is_one(f) {
            debug!("1&G => G");
            return g;
        }
        if self.is_one(g) {
            debug!("F&1 => F");
            return f;
        }
        if f == self.apply_not(g) {
            debug!("F&~F => 0");
            return self.zero();
        }

        let x = self.top_variable(&[f, g]);
        let (f0, f1) = self.top_cofactors(f, x);
        let (g0, g1) = self.top_cofactors(g, x);

        let r0 = self.apply_and(f0, g0);
        let r1 = self.apply_and(f1, g1);
        self.mk_node(x, r1, r0)
    }

    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(f, g, h) = (f ∧ g) ∨ (¬f ∧ h)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use robdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::new(3);
    /// let x = bdd.mk_var(0);
    /// let y = bdd.mk_var(1);
    /// let z = bdd.mk_var(2);
    /// let f = bdd.apply_ite(x, y, z);
    /// assert_eq!(f, bdd.mk_node(0, y, z));
    /// let x_and_y = bdd.apply_and(x, y);
    /// let not_x_and_z = bdd.apply_and(bdd.apply_not(x), z);
    /// assert_eq!(f, bdd.apply_or(x_and_y, not_x_and_z));
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        debug!("apply_ite(f = {}, g = {}, h = {})", f, g, h);
        self.check(f);
        self.check(g);
        self.check(h);

        // Base cases:
        //   ite(1,G,H) => G
        //   ite(0,G,H) => H
        if self.is_one(f) {
            debug!("ite(1,G,H) => G");
            return g;
        }
        if self.is_zero(f) {
            debug!("ite(0,G,H) => H");
            return h;
        }

        // From now on, F is known not to be a constant.
        //   ite(F,G,G) => G
        //   ite(F,1,0) => F
        if g == h {
            debug!("ite(F,G,G) => G");
            return g;
        }
        if self.is_one(g) && self.is_zero(h) {
            debug!("ite(F,1,0) => F");
            return f;
        }

        // Every operand at the top level is split, the others are passed down unchanged.
        let x = self.top_variable(&[f, g, h]);
        debug!("min variable = x{}", x);

        let (f0, f1) = self.top_cofactors(f, x);
        debug!("cofactors of f = {} are: f0 = {}, f1 = {}", f, f0, f1);
        let (g0, g1) = self.top_cofactors(g, x);
        debug!("cofactors of g = {} are: g0 = {}, g1 = {}", g, g0, g1);
        let (h0, h1) = self.top_cofactors(h, x);
        debug!("cofactors of h = {} are: h0 = {}, h1 = {}", h, h0, h1);

        let r0 = self.apply_ite(f0, g0, h0);
        let r1 = self.apply_ite(f1, g1, h1);
        debug!("cofactors of res: r0 = {}, r1 = {}", r0, r1);

        self.mk_node(x, r1, r0)
    }

    pub fn apply_or(&self, f: Ref, g: Ref) -> Ref {
        debug!("apply_or(f = {}, g = {})", f, g);
        self.apply_ite(f, self.one(), g)
    }

    pub fn apply_imply(&self, f: Ref, g: Ref) -> Ref {
        debug!("apply_imply(f = {}, g = {})", f, g);
        self.apply_ite(f, g, self.one())
    }

    pub fn apply_eq(&self, f: Ref, g: Ref) -> Ref {
        debug!("apply_eq(f = {}, g = {})", f, g);
        let not_g = self.apply_not(g);
        self.apply_ite(f, g, not_g)
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        debug!("apply_and_many(...)");
        let mut res = self.one();
        for node in nodes.into_iter() {
            res = self.apply_and(res, node);
        }
        res
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        debug!("apply_or_many(...)");
        let mut res = self.zero();
        for node in nodes.into_iter() {
            res = self.apply_or(res, node);
        }
        res
    }

    /// Cofactor of `f` with the variable `v` fixed to `value`.
    pub fn restrict(&self, f: Ref, v: u32, value: bool) -> Ref {
        self.check(f);
        self.check_var(v);
        let mut cache = HashMap::new();
        self.restrict_(f, v, value, &mut cache)
    }

    fn restrict_(&self, f: Ref, v: u32, value: bool, cache: &mut HashMap<Ref, Ref>) -> Ref {
        let (i, high, low) = match self.node(f) {
            Node::Terminal(_) => return f,
            Node::Decision { variable, high, low } => (variable.id(), high, low),
        };

        if v < i {
            // 'f' does not depend on 'v'
            return f;
        }
        if v == i {
            return if value { high } else { low };
        }

        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let r0 = self.restrict_(low, v, value, cache);
        let r1 = self.restrict_(high, v, value, cache);
        let res = self.mk_node(i, r1, r0);
        cache.insert(f, res);
        res
    }

    pub fn to_bracket_string(&self, node: Ref) -> String {
        match self.node(node) {
            Node::Terminal(false) => "(0)".to_string(),
            Node::Terminal(true) => "(1)".to_string(),
            Node::Decision { variable, high, low } => format!(
                "{}:({}, {}, {})",
                node,
                variable,
                self.to_bracket_string(high),
                self.to_bracket_string(low)
            ),
        }
    }
}

#[cfg(test)]
impl Bdd {
    /// Append `node` to the node table as is, bypassing `mk_node`.
    ///
    /// With `indexed`, a decision node is also recorded in the unique table of its variable.
    pub(crate) fn push_raw(&self, node: Node, indexed: bool) -> Ref {
        let index = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(node);
            (nodes.len() - 1) as u32
        };
        let node_ref = Ref::new(self.id, index);
        if let (true, Node::Decision { variable, high, low }) = (indexed, node) {
            self.subtables.borrow_mut()[variable.index()].insert(high, low, node_ref);
        }
        node_ref
    }
}
