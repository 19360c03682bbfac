use crate::vdom::{RenderedPage, VNode};
use pagewright_common::{ComponentNode, ComponentTree};
use pagewright_schema::SchemaRegistry;
use tracing::{debug, warn};

/// Renders component trees against a schema registry
pub struct Renderer<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Render a whole page tree.
    ///
    /// Never fails: a node whose type is not registered becomes a
    /// [`VNode::Error`] and its subtree is skipped, while siblings keep
    /// rendering.
    pub fn render(&self, tree: &ComponentTree) -> RenderedPage {
        debug!(roots = tree.len(), "Rendering page");
        let nodes = tree.iter().map(|node| self.render_node(node)).collect();
        RenderedPage { nodes }
    }

    pub fn render_node(&self, node: &ComponentNode) -> VNode {
        if self.registry.get_component(&node.component_type).is_none() {
            warn!(node_id = %node.id, component_type = %node.component_type, "Unknown component type");
            return VNode::Error {
                node_id: node.id.clone(),
                component_type: node.component_type.clone(),
                message: format!("Unknown component '{}'", node.component_type),
            };
        }

        VNode::Component {
            node_id: node.id.clone(),
            component_type: node.component_type.clone(),
            props: self.registry.merge_props(node),
            style: self.registry.merge_style(node),
            children: node.children.iter().map(|child| self.render_node(child)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_common::PropValue;

    #[test]
    fn test_defaults_are_merged() {
        let registry = SchemaRegistry::with_builtins();
        let tree = ComponentTree::new(vec![ComponentNode::new("b1", "Button")
            .with_prop("label", "Sign up")
            .with_style("padding", "12px")]);

        let page = Renderer::new(&registry).render(&tree);

        match &page.nodes[0] {
            VNode::Component { props, style, .. } => {
                assert_eq!(props["label"], PropValue::from("Sign up"));
                assert_eq!(props["variant"], PropValue::from("primary"));
                assert_eq!(style["padding"], "12px");
                assert_eq!(style["borderRadius"], "4px");
            }
            other => panic!("Expected component, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_does_not_stop_siblings() {
        let registry = SchemaRegistry::with_builtins();
        let tree = ComponentTree::new(vec![ComponentNode::new("c1", "Container")
            .with_child(
                ComponentNode::new("x1", "Carousel").with_child(ComponentNode::new("h0", "Heading")),
            )
            .with_child(ComponentNode::new("h1", "Heading"))]);

        let page = Renderer::new(&registry).render(&tree);
        let root = &page.nodes[0];

        assert_eq!(root.children().len(), 2);
        assert!(root.children()[0].is_error());
        assert!(root.children()[0].children().is_empty());
        assert_eq!(root.children()[1].component_type(), "Heading");
        assert_eq!(page.errors().len(), 1);
        assert!(page.find("h0").is_none());
    }

    #[test]
    fn test_empty_tree() {
        let registry = SchemaRegistry::with_builtins();
        let page = Renderer::new(&registry).render(&ComponentTree::empty());
        assert!(page.nodes.is_empty());
    }
}
