//! # robdd: Reduced Ordered Binary Decision Diagrams
//!
//! **`robdd`** is a small, manager-centric library for building and inspecting
//! **Reduced Ordered Binary Decision Diagrams (ROBDDs)** over a fixed variable order.
//!
//! ## What is a BDD?
//!
//! A Binary Decision Diagram represents a Boolean function as a directed acyclic graph.
//! With a fixed variable order and no redundant or duplicate nodes, it is **canonical**:
//! every Boolean function has exactly one representation, so two functions are
//! equivalent iff their handles are equal.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All operations go through the [`Bdd`][crate::bdd::Bdd] manager,
//!   which hash-conses every node it creates.
//! - **Stable Handles**: Nodes are referenced by [`Ref`][crate::reference::Ref] handles, which stay valid
//!   for the lifetime of their manager and are rejected by any other manager.
//! - **0-Based Indexing**: Variables are numbered `x0 .. x{n-1}`, `x0` being closest to the root.
//! - **Truth Table Bridge**: Functions of up to six variables convert to [`TruthTable`][crate::truth_table::TruthTable]s
//!   for checking against plain bitwise semantics.
//!
//! ## Basic Usage
//!
//! ```rust
//! use robdd::bdd::Bdd;
//!
//! // 1. Initialize the manager over three variables
//! let bdd = Bdd::new(3);
//!
//! // 2. Create variables (0-indexed)
//! let x0 = bdd.mk_var(0);
//! let x1 = bdd.mk_var(1);
//! let x2 = bdd.mk_var(2);
//!
//! // 3. Build a formula: f = if x0 then x1 else x2
//! let f = bdd.apply_ite(x0, x1, x2);
//!
//! // 4. Check properties
//! assert!(!bdd.is_zero(f)); // It is satisfiable
//! assert!(!bdd.is_one(f));  // It is not a tautology
//! assert_eq!(bdd.size(f), 3);
//! assert_eq!(bdd.to_truth_table(f).to_string(), "11011000");
//!
//! // 5. Evaluate (x0=true, x1=true, x2=false) -> should be true
//! assert!(bdd.evaluate(f, &[true, true, false]));
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: The manager, the node constructor and the NOT/AND/XOR/ITE operations.
//! - **[`size`]**: Node counts for the whole package and for single functions.
//! - **[`debug`]**: Tree printing and structural checks.
//! - **[`truth_table`]**: Bit-vector truth tables and the conversion from BDDs.
//! - **[`dot`]**: Utilities for visualizing BDDs using Graphviz.
//! - **[`sat`]**: Evaluation, model counting and model extraction.

pub mod bdd;
pub mod debug;
pub mod dot;
pub mod eval;
pub mod node;
pub mod reference;
pub mod sat;
pub mod size;
pub mod subtable;
pub mod truth_table;
pub mod types;
