use crate::node::{ComponentNode, ComponentTree};
use crate::value::PropValue;

/// Visitor pattern for traversing component trees immutably
///
/// Default implementations walk the entire tree in pre-order. Override the
/// `visit_*` methods to act on specific nodes.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &ComponentTree) {
        walk_tree(self, tree);
    }

    fn visit_node(&mut self, node: &ComponentNode, depth: usize) {
        walk_node(self, node, depth);
    }

    fn visit_prop(&mut self, _node: &ComponentNode, _key: &str, _value: &PropValue) {
        // Leaf, nothing to walk
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &ComponentTree) {
    for root in tree.iter() {
        visitor.visit_node(root, 0);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &ComponentNode, depth: usize) {
    for (key, value) in &node.props {
        visitor.visit_prop(node, key, value);
    }
    for child in &node.children {
        visitor.visit_node(child, depth + 1);
    }
}

/// Counts nodes in a tree or subtree
#[derive(Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl Visitor for NodeCounter {
    fn visit_node(&mut self, node: &ComponentNode, depth: usize) {
        self.count += 1;
        walk_node(self, node, depth);
    }
}

/// Collects node ids in pre-order
#[derive(Default)]
pub struct IdCollector {
    pub ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_node(&mut self, node: &ComponentNode, depth: usize) {
        self.ids.push(node.id.clone());
        walk_node(self, node, depth);
    }
}
