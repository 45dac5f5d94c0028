//! BDD to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Terminal nodes** (0 and 1) are rendered as squares at the bottom (sink rank)
//! - **Decision nodes** are rendered as circles, one rank per variable
//! - **Edges**: solid lines are THEN edges, dashed lines are ELSE edges
//! - **Root nodes** are rendered as rectangles at the top (source rank)
//!
//! ```
//! use robdd::bdd::Bdd;
//!
//! let bdd = Bdd::new(3);
//! let x1 = bdd.mk_var(1);
//! let x2 = bdd.mk_var(2);
//! let f = bdd.apply_and(x1, x2);
//!
//! let dot = bdd.to_dot(&[f]).unwrap();
//! assert!(dot.contains("rank=sink"));
//! // Render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;

/// Configuration options for DOT output generation.
///
/// ```
/// use robdd::bdd::Bdd;
/// use robdd::dot::DotConfig;
///
/// let bdd = Bdd::new(2);
/// let x = bdd.mk_var(1);
/// let config = DotConfig {
///     node_shape: "ellipse",
///     ..DotConfig::default()
/// };
///
/// let dot = bdd.to_dot_with_config(&[x], &config).unwrap();
/// assert!(dot.contains("shape=ellipse"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for THEN edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for ELSE edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Whether to use HTML labels for subscripts (default: true)
    pub use_html_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            use_html_labels: true,
        }
    }
}

impl Bdd {
    /// Converts the diagrams rooted at `roots` to DOT (Graphviz) format.
    ///
    /// Nodes shared between several roots are drawn once.
    ///
    /// ```
    /// use robdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::new(2);
    /// let x = bdd.mk_var(0);
    /// let y = bdd.mk_var(1);
    ///
    /// let and = bdd.apply_and(x, y);
    /// let or = bdd.apply_or(x, y);
    /// let xor = bdd.apply_xor(x, y);
    ///
    /// let dot = bdd.to_dot(&[and, or, xor]).unwrap();
    /// ```
    pub fn to_dot(&self, roots: &[Ref]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts the diagrams rooted at `roots` to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, roots: &[Ref], config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        // Terminal nodes (0 and 1)
        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "{} [shape={}, label=\"0\"];", Ref::ZERO_INDEX, config.terminal_shape)?;
        writeln!(dot, "{} [shape={}, label=\"1\"];", Ref::ONE_INDEX, config.terminal_shape)?;
        writeln!(dot, "}}")?;

        // Non-terminal nodes reachable from the roots, with their contents
        let all_nodes: Vec<(u32, Node)> = {
            let reachable = self.descendants(roots.iter().copied());
            let nodes = self.nodes();
            reachable.into_iter().map(|id| (id, nodes[id as usize])).collect()
        };

        // One rank per variable
        let mut levels = BTreeMap::<u32, Vec<u32>>::new();
        for &(id, node) in all_nodes.iter() {
            if let Some(variable) = node.variable() {
                levels.entry(variable.id()).or_default().push(id);
            }
        }

        for (variable, ids) in levels.iter() {
            writeln!(dot, "{{ rank=same")?;
            for &id in ids.iter() {
                let label = if config.use_html_labels {
                    format!("<x<SUB>{}</SUB>>", variable)
                } else {
                    format!("\"x{}\"", variable)
                };
                writeln!(dot, "{} [label={}];", id, label)?;
            }
            writeln!(dot, "}}")?;
        }

        for &(id, node) in all_nodes.iter() {
            if let Some((high, low)) = node.children() {
                writeln!(dot, "{} -- {} [style={}];", id, high.index(), config.high_edge_style)?;
                writeln!(dot, "{} -- {} [style={}];", id, low.index(), config.low_edge_style)?;
            }
        }

        // Root nodes at the top
        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;

        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -- {};", i, root.index())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
