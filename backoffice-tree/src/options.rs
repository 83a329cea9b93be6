//! Parent-selector options
//!
//! Flattens a forest into the `{value, label}` list a parent dropdown
//! renders. For edit-mode dialogs the node being edited and its whole
//! subtree are excluded, so a node can never be made its own ancestor
//! through the UI.

use serde::{Deserialize, Serialize};

use crate::node::TreeNode;

/// One dropdown entry; `depth` lets renderers indent nested nodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeOption {
    pub value: String,
    pub label: String,
    pub depth: usize,
}

/// Depth-first flatten of a forest into dropdown options.
///
/// With `exclude` set, that node and all of its descendants are omitted.
pub fn parent_options(roots: &[TreeNode], exclude: Option<&str>) -> Vec<TreeOption> {
    let mut options = Vec::new();
    for root in roots {
        visit(root, 0, exclude, &mut options);
    }
    options
}

fn visit(node: &TreeNode, depth: usize, exclude: Option<&str>, out: &mut Vec<TreeOption>) {
    if exclude == Some(node.id.as_str()) {
        return;
    }
    out.push(TreeOption {
        value: node.id.clone(),
        label: node.label.clone(),
        depth,
    });
    for child in &node.children {
        visit(child, depth + 1, exclude, out);
    }
}
