//! Hierarchy builder
//!
//! Converts a flat list of parent-referencing nodes (menus, boards,
//! categories) into a tree, and flattens trees back into the option lists
//! parent-selector dropdowns need. Nodes with a missing or self-referential
//! parent become roots; cycles are broken by demoting their members to
//! roots rather than looping or dropping nodes.

pub mod build;
pub mod node;
pub mod options;

pub use build::build_tree;
pub use node::{FlatNode, TreeNode};
pub use options::{parent_options, TreeOption};
