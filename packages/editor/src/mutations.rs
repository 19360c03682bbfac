//! # Tree Mutations
//!
//! Pure operations over a page's component tree.
//!
//! ## Design Principles
//!
//! 1. **Immutable**: every operation takes a tree by reference and returns a
//!    new one; the input is never touched
//! 2. **Path copying**: only the nodes between a root and the edited node are
//!    rebuilt, every other subtree is shared with the input through `Arc`
//! 3. **Total**: a missing id is a no-op that returns a tree equal to the
//!    input, never an error
//!
//! ## Mutation Semantics
//!
//! ### Remove
//! - Drops every node with the id, at any depth, together with its subtree
//!
//! ### InsertAfter
//! - Inserts right after the anchor among the anchor's siblings
//! - Missing anchor: the node is not inserted
//!
//! ### Duplicate
//! - Copies the subtree with a fresh id for the copy and every descendant,
//!   then inserts it right after the original
//!
//! ### PatchProps / PatchStyle
//! - Shallow merge, patch wins key by key
//! - Style patches drop keys left empty after the merge

use pagewright_common::{
    ComponentNode, ComponentTree, IdCollector, IdGenerator, NodeCounter, Props, Style, Visitor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serializable description of one tree edit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Remove a node and its subtree
    RemoveNode { node_id: String },

    /// Insert a node right after a sibling
    InsertAfter { after_id: String, node: ComponentNode },

    /// Append a node as last child of a parent, or as a new root
    InsertChild {
        parent_id: Option<String>,
        node: ComponentNode,
    },

    /// Copy a subtree with fresh ids
    Duplicate { node_id: String },

    /// Shallow-merge props into a node
    PatchProps { node_id: String, props: Props },

    /// Shallow-merge style into a node, pruning empty values
    PatchStyle { node_id: String, style: Style },
}

impl Mutation {
    /// Apply to a tree, producing the next version
    pub fn apply(&self, tree: &ComponentTree, ids: &mut IdGenerator) -> ComponentTree {
        match self {
            Mutation::RemoveNode { node_id } => remove_by_id(tree, node_id),
            Mutation::InsertAfter { after_id, node } => insert_after(tree, after_id, node.clone()),
            Mutation::InsertChild { parent_id, node } => {
                insert_child(tree, parent_id.as_deref(), node.clone())
            }
            Mutation::Duplicate { node_id } => duplicate(tree, node_id, ids),
            Mutation::PatchProps { node_id, props } => patch_props(tree, node_id, props),
            Mutation::PatchStyle { node_id, style } => patch_style(tree, node_id, style),
        }
    }

    /// Node the mutation is aimed at, if any
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::RemoveNode { node_id }
            | Mutation::Duplicate { node_id }
            | Mutation::PatchProps { node_id, .. }
            | Mutation::PatchStyle { node_id, .. } => Some(node_id),
            Mutation::InsertAfter { after_id, .. } => Some(after_id),
            Mutation::InsertChild { parent_id, .. } => parent_id.as_deref(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::RemoveNode { .. } => "remove",
            Mutation::InsertAfter { .. } => "insert-after",
            Mutation::InsertChild { .. } => "insert-child",
            Mutation::Duplicate { .. } => "duplicate",
            Mutation::PatchProps { .. } => "patch-props",
            Mutation::PatchStyle { .. } => "patch-style",
        }
    }
}

/// Depth-first pre-order search
pub fn find_by_id<'a>(tree: &'a ComponentTree, id: &str) -> Option<&'a Arc<ComponentNode>> {
    find_in(tree.roots(), id)
}

fn find_in<'a>(nodes: &'a [Arc<ComponentNode>], id: &str) -> Option<&'a Arc<ComponentNode>> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Parent of the node with `id`; `None` for roots and missing ids
pub fn find_parent<'a>(tree: &'a ComponentTree, id: &str) -> Option<&'a Arc<ComponentNode>> {
    fn search<'a>(nodes: &'a [Arc<ComponentNode>], id: &str) -> Option<&'a Arc<ComponentNode>> {
        for node in nodes {
            if node.children.iter().any(|child| child.id == id) {
                return Some(node);
            }
            if let Some(found) = search(&node.children, id) {
                return Some(found);
            }
        }
        None
    }
    search(tree.roots(), id)
}

pub fn find_parent_id<'a>(tree: &'a ComponentTree, id: &str) -> Option<&'a str> {
    find_parent(tree, id).map(|parent| parent.id.as_str())
}

pub fn contains_id(tree: &ComponentTree, id: &str) -> bool {
    find_by_id(tree, id).is_some()
}

pub fn count_nodes(tree: &ComponentTree) -> usize {
    let mut counter = NodeCounter::default();
    counter.visit_tree(tree);
    counter.count
}

/// Size of the subtree rooted at `id` (0 when missing)
pub fn subtree_size(tree: &ComponentTree, id: &str) -> usize {
    find_by_id(tree, id)
        .map(|node| {
            let mut counter = NodeCounter::default();
            counter.visit_node(node, 0);
            counter.count
        })
        .unwrap_or(0)
}

/// Every id in pre-order
pub fn collect_ids(tree: &ComponentTree) -> Vec<String> {
    let mut collector = IdCollector::default();
    collector.visit_tree(tree);
    collector.ids
}

/// Drop every node with `id` and its subtree
pub fn remove_by_id(tree: &ComponentTree, id: &str) -> ComponentTree {
    match remove_in(tree.roots(), id) {
        Some(roots) => ComponentTree::from_shared(roots),
        None => tree.clone(),
    }
}

/// Returns `None` when nothing under `nodes` matched
fn remove_in(nodes: &[Arc<ComponentNode>], id: &str) -> Option<Vec<Arc<ComponentNode>>> {
    let mut changed = false;
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        if node.id == id {
            changed = true;
            continue;
        }
        match remove_in(&node.children, id) {
            Some(children) => {
                changed = true;
                out.push(rebuild_with_children(node, children));
            }
            None => out.push(Arc::clone(node)),
        }
    }

    changed.then_some(out)
}

/// Insert `new_node` right after the sibling whose id is `after_id`.
///
/// A missing anchor leaves the tree unchanged.
pub fn insert_after(tree: &ComponentTree, after_id: &str, new_node: ComponentNode) -> ComponentTree {
    let new_node = Arc::new(new_node);
    match insert_after_in(tree.roots(), after_id, &new_node) {
        Some(roots) => ComponentTree::from_shared(roots),
        None => tree.clone(),
    }
}

fn insert_after_in(
    nodes: &[Arc<ComponentNode>],
    after_id: &str,
    new_node: &Arc<ComponentNode>,
) -> Option<Vec<Arc<ComponentNode>>> {
    if let Some(pos) = nodes.iter().position(|node| node.id == after_id) {
        let mut out = nodes.to_vec();
        out.insert(pos + 1, Arc::clone(new_node));
        return Some(out);
    }

    for (index, node) in nodes.iter().enumerate() {
        if let Some(children) = insert_after_in(&node.children, after_id, new_node) {
            let mut out = nodes.to_vec();
            out[index] = rebuild_with_children(node, children);
            return Some(out);
        }
    }

    None
}

/// Append `new_node` as the last child of `parent_id`, or as the last root
/// when `parent_id` is `None`. A missing parent leaves the tree unchanged.
pub fn insert_child(
    tree: &ComponentTree,
    parent_id: Option<&str>,
    new_node: ComponentNode,
) -> ComponentTree {
    match parent_id {
        None => {
            let mut roots = tree.roots().to_vec();
            roots.push(Arc::new(new_node));
            ComponentTree::from_shared(roots)
        }
        Some(parent_id) => {
            let new_node = Arc::new(new_node);
            update_by_id(tree, parent_id, |parent| {
                let mut children = parent.children.clone();
                children.push(Arc::clone(&new_node));
                ComponentNode {
                    children,
                    ..shallow_copy(parent)
                }
            })
        }
    }
}

/// Copy the subtree at `id` with fresh ids and insert it after the original
pub fn duplicate(tree: &ComponentTree, id: &str, ids: &mut IdGenerator) -> ComponentTree {
    duplicate_node(tree, id, ids)
        .map(|(next, _)| next)
        .unwrap_or_else(|| tree.clone())
}

/// Like [`duplicate`], also returning the id of the copy's root
pub fn duplicate_node(
    tree: &ComponentTree,
    id: &str,
    ids: &mut IdGenerator,
) -> Option<(ComponentTree, String)> {
    let original = find_by_id(tree, id)?;
    let copy = remap_ids(original, ids);
    let copy_id = copy.id.clone();
    Some((insert_after(tree, id, copy), copy_id))
}

/// Deep copy with a fresh id on every node, assigned in pre-order
pub fn remap_ids(node: &ComponentNode, ids: &mut IdGenerator) -> ComponentNode {
    let id = ids.new_id();
    let children = node
        .children
        .iter()
        .map(|child| Arc::new(remap_ids(child, ids)))
        .collect();

    ComponentNode {
        id,
        component_type: node.component_type.clone(),
        props: node.props.clone(),
        style: node.style.clone(),
        children,
    }
}

/// Shallow-merge `partial` into the node's props (patch wins)
pub fn patch_props(tree: &ComponentTree, id: &str, partial: &Props) -> ComponentTree {
    update_by_id(tree, id, |node| {
        let mut props = node.props.clone();
        props.extend(partial.iter().map(|(k, v)| (k.clone(), v.clone())));
        ComponentNode {
            props,
            ..shallow_copy(node)
        }
    })
}

/// Shallow-merge `partial` into the node's style, then drop empty values
pub fn patch_style(tree: &ComponentTree, id: &str, partial: &Style) -> ComponentTree {
    update_by_id(tree, id, |node| {
        let mut style = node.style.clone();
        style.extend(partial.iter().map(|(k, v)| (k.clone(), v.clone())));
        style.retain(|_, value| !value.trim().is_empty());
        ComponentNode {
            style,
            ..shallow_copy(node)
        }
    })
}

/// Replace the first node (pre-order) with `id` by `f(node)`, copying only
/// the path from its root
pub fn update_by_id<F>(tree: &ComponentTree, id: &str, f: F) -> ComponentTree
where
    F: Fn(&ComponentNode) -> ComponentNode,
{
    match update_in(tree.roots(), id, &f) {
        Some(roots) => ComponentTree::from_shared(roots),
        None => tree.clone(),
    }
}

fn update_in<F>(nodes: &[Arc<ComponentNode>], id: &str, f: &F) -> Option<Vec<Arc<ComponentNode>>>
where
    F: Fn(&ComponentNode) -> ComponentNode,
{
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            Some(Arc::new(f(node)))
        } else {
            update_in(&node.children, id, f).map(|children| rebuild_with_children(node, children))
        };

        if let Some(replacement) = replacement {
            let mut out = nodes.to_vec();
            out[index] = replacement;
            return Some(out);
        }
    }
    None
}

/// Copy of a node's own fields; children are shared, not cloned
fn shallow_copy(node: &ComponentNode) -> ComponentNode {
    ComponentNode {
        id: node.id.clone(),
        component_type: node.component_type.clone(),
        props: node.props.clone(),
        style: node.style.clone(),
        children: node.children.clone(),
    }
}

fn rebuild_with_children(
    node: &ComponentNode,
    children: Vec<Arc<ComponentNode>>,
) -> Arc<ComponentNode> {
    Arc::new(ComponentNode {
        id: node.id.clone(),
        component_type: node.component_type.clone(),
        props: node.props.clone(),
        style: node.style.clone(),
        children,
    })
}

/// Whether two trees are the same version (every root shared)
pub fn is_same_version(a: &ComponentTree, b: &ComponentTree) -> bool {
    a.len() == b.len()
        && a
            .roots()
            .iter()
            .zip(b.roots())
            .all(|(x, y)| Arc::ptr_eq(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_common::PropValue;

    fn tree() -> ComponentTree {
        ComponentTree::new(vec![
            ComponentNode::new("c1", "Container")
                .with_child(ComponentNode::new("a", "Heading"))
                .with_child(ComponentNode::new("b", "Paragraph"))
                .with_child(ComponentNode::new("c", "Button")),
            ComponentNode::new("c2", "Container"),
        ])
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::PatchStyle {
            node_id: "c1".to_string(),
            style: Style::from([("color".to_string(), "red".to_string())]),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_untouched_subtrees_are_shared() {
        let before = tree();
        let after = patch_props(
            &before,
            "a",
            &Props::from([("text".to_string(), PropValue::from("Hi"))]),
        );

        // Second root is off the edit path
        assert!(Arc::ptr_eq(&before.roots()[1], &after.roots()[1]));
        // Siblings of the edited node are shared too
        assert!(Arc::ptr_eq(
            &before.roots()[0].children[1],
            &after.roots()[0].children[1]
        ));
        // The input is untouched
        assert!(find_by_id(&before, "a").unwrap().props.is_empty());
    }

    #[test]
    fn test_noop_keeps_version() {
        let before = tree();
        assert!(is_same_version(&before, &remove_by_id(&before, "zzz")));
        assert!(is_same_version(&before, &patch_props(&before, "zzz", &Props::new())));
        assert!(!is_same_version(&before, &remove_by_id(&before, "b")));
    }

    #[test]
    fn test_find_parent() {
        let t = tree();
        assert_eq!(find_parent(&t, "b").unwrap().id, "c1");
        assert!(find_parent(&t, "c1").is_none());
        assert!(find_parent(&t, "missing").is_none());
        assert_eq!(find_parent_id(&t, "c"), Some("c1"));
    }

    #[test]
    fn test_insert_child() {
        let t = tree();
        let appended = insert_child(&t, Some("c2"), ComponentNode::new("n", "Heading"));
        assert_eq!(find_by_id(&appended, "c2").unwrap().children[0].id, "n");

        let root = insert_child(&t, None, ComponentNode::new("r", "Section"));
        assert_eq!(root.roots().last().unwrap().id, "r");

        let missing = insert_child(&t, Some("nope"), ComponentNode::new("n", "Heading"));
        assert_eq!(missing, t);
    }

    #[test]
    fn test_remap_ids_is_pre_order_and_fresh() {
        let node = ComponentNode::new("p", "Container")
            .with_child(ComponentNode::new("q", "Heading"))
            .with_child(ComponentNode::new("r", "Paragraph"));
        let mut ids = IdGenerator::with_prefix("t");

        let copy = remap_ids(&node, &mut ids);
        let all = collect_ids(&ComponentTree::new(vec![copy]));

        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|id| id.starts_with("t-")));
        assert!(!all.contains(&"p".to_string()));
    }

    #[test]
    fn test_subtree_size() {
        let t = tree();
        assert_eq!(subtree_size(&t, "c1"), 4);
        assert_eq!(subtree_size(&t, "a"), 1);
        assert_eq!(subtree_size(&t, "missing"), 0);
        assert_eq!(count_nodes(&t), 5);
    }

    #[test]
    fn test_mutation_apply_and_target() {
        let mut ids = IdGenerator::new();
        let mutation = Mutation::RemoveNode { node_id: "c1".to_string() };
        let next = mutation.apply(&tree(), &mut ids);

        assert_eq!(count_nodes(&next), 1);
        assert_eq!(mutation.target_id(), Some("c1"));
        assert_eq!(mutation.name(), "remove");
    }
}
