//! Tree assembly
//!
//! One pass builds an id index; each node then attaches under its declared
//! parent only when that is provably safe. A node whose parent is missing,
//! itself, or part of a cycle through it becomes a root instead — the
//! output is always a finite forest containing every input node.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::node::{FlatNode, TreeNode};

/// Convert a flat parent-referencing list into a forest.
///
/// Children keep input order; roots keep input order.
pub fn build_tree(nodes: Vec<FlatNode>) -> Vec<TreeNode> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let declared: HashMap<&str, Option<&str>> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.parent_id.as_deref()))
        .collect();

    let effective: Vec<Option<String>> = nodes
        .iter()
        .map(|n| effective_parent(n, &ids, &declared))
        .collect();

    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();
    for (index, parent) in effective.iter().enumerate() {
        match parent {
            Some(parent) => children.entry(parent.as_str()).or_default().push(index),
            None => roots.push(index),
        }
    }

    roots
        .into_iter()
        .map(|index| assemble(index, &nodes, &effective, &children))
        .collect()
}

/// The parent a node actually attaches under, or `None` for a root.
///
/// Walks the declared ancestor chain starting at the parent; meeting the
/// node again means attaching would create a cycle, so the node is demoted.
fn effective_parent(
    node: &FlatNode,
    ids: &HashSet<&str>,
    declared: &HashMap<&str, Option<&str>>,
) -> Option<String> {
    let parent = node.parent_id.as_deref()?;
    if parent == node.id {
        debug!(id = %node.id, "self-referential parent; node kept as root");
        return None;
    }
    if !ids.contains(parent) {
        return None;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = parent;
    loop {
        if current == node.id {
            debug!(id = %node.id, "parent chain cycles back to node; demoted to root");
            return None;
        }
        if !seen.insert(current) {
            // A cycle further up the chain; its members demote themselves.
            break;
        }
        match declared.get(current).copied().flatten() {
            Some(next) if ids.contains(next) => current = next,
            _ => break,
        }
    }
    Some(parent.to_string())
}

fn assemble(
    index: usize,
    nodes: &[FlatNode],
    effective: &[Option<String>],
    children: &HashMap<&str, Vec<usize>>,
) -> TreeNode {
    let node = &nodes[index];
    let child_nodes = children
        .get(node.id.as_str())
        .map(|indices| {
            indices
                .iter()
                .map(|&child| assemble(child, nodes, effective, children))
                .collect()
        })
        .unwrap_or_default();
    TreeNode {
        id: node.id.clone(),
        code: node.code.clone(),
        label: node.label.clone(),
        parent_id: effective[index].clone(),
        children: child_nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{count, find};

    #[test]
    fn flat_chain_builds_nested_tree() {
        let roots = build_tree(vec![
            FlatNode::new("1", "Root"),
            FlatNode::new("2", "Child").with_parent("1"),
            FlatNode::new("3", "Grandchild").with_parent("2"),
        ]);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].children[0].id, "2");
        assert_eq!(roots[0].children[0].children[0].id, "3");
        assert_eq!(count(&roots), 3);
    }

    #[test]
    fn missing_parent_becomes_root() {
        let roots = build_tree(vec![
            FlatNode::new("1", "Attached").with_parent("0"),
            FlatNode::new("2", "Root"),
        ]);
        assert_eq!(roots.len(), 2);
        assert!(roots[0].parent_id.is_none());
    }

    #[test]
    fn self_referential_parent_becomes_root() {
        let roots = build_tree(vec![FlatNode::new("1", "Loop").with_parent("1")]);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].children.is_empty());
    }

    #[test]
    fn mutual_cycle_yields_two_roots() {
        let roots = build_tree(vec![
            FlatNode::new("a", "A").with_parent("b"),
            FlatNode::new("b", "B").with_parent("a"),
        ]);
        assert_eq!(roots.len(), 2);
        let ids: Vec<&str> = roots.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(roots.iter().all(|r| r.children.is_empty()));
    }

    #[test]
    fn three_cycle_demotes_all_members() {
        let roots = build_tree(vec![
            FlatNode::new("a", "A").with_parent("c"),
            FlatNode::new("b", "B").with_parent("a"),
            FlatNode::new("c", "C").with_parent("b"),
        ]);
        assert_eq!(roots.len(), 3);
        assert_eq!(count(&roots), 3);
    }

    #[test]
    fn node_hanging_off_a_cycle_still_attaches() {
        let roots = build_tree(vec![
            FlatNode::new("b", "B").with_parent("c"),
            FlatNode::new("c", "C").with_parent("b"),
            FlatNode::new("a", "A").with_parent("b"),
        ]);
        // b and c demote each other; a attaches under b.
        let b = find(&roots, "b").unwrap();
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].id, "a");
        assert_eq!(count(&roots), 3);
    }

    #[test]
    fn children_preserve_input_order() {
        let roots = build_tree(vec![
            FlatNode::new("1", "Root"),
            FlatNode::new("z", "Last first").with_parent("1"),
            FlatNode::new("a", "First last").with_parent("1"),
        ]);
        let labels: Vec<&str> = roots[0]
            .children
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Last first", "First last"]);
    }

    #[test]
    fn every_input_node_appears_exactly_once() {
        let roots = build_tree(vec![
            FlatNode::new("1", "Root"),
            FlatNode::new("2", "A").with_parent("1"),
            FlatNode::new("3", "B").with_parent("9"),
            FlatNode::new("4", "C").with_parent("4"),
        ]);
        assert_eq!(count(&roots), 4);
    }
}
