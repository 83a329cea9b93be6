//! Tree node types

use serde::{Deserialize, Serialize};

/// A node as it arrives from a flat list fetch.
///
/// Callers project their resources (menu rows, board rows) into this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlatNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl FlatNode {
    /// Create a root node
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            label: label.into(),
            code: None,
        }
    }

    /// Set the declared parent
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the sort/code value
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// A node in the assembled tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub label: String,
    /// The parent this node was actually attached under (None for roots)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Find a node by id anywhere in this subtree
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Number of nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// Find a node by id across a forest
pub fn find<'a>(roots: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    roots.iter().find_map(|r| r.find(id))
}

/// Total node count across a forest
pub fn count(roots: &[TreeNode]) -> usize {
    roots.iter().map(TreeNode::count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_walks_subtrees() {
        let tree = TreeNode {
            id: "1".into(),
            code: None,
            label: "Root".into(),
            parent_id: None,
            children: vec![TreeNode {
                id: "2".into(),
                code: None,
                label: "Child".into(),
                parent_id: Some("1".into()),
                children: Vec::new(),
            }],
        };
        assert_eq!(tree.find("2").unwrap().label, "Child");
        assert!(tree.find("3").is_none());
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn flat_node_serializes_without_empty_fields() {
        let node = FlatNode::new("1", "Root");
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("parent_id"));
        assert!(!json.contains("code"));
    }
}
