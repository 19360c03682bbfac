use pagewright_common::{Props, Style};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Rendered node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum VNode {
    /// Instantiated component with schema defaults applied
    Component {
        node_id: String,
        component_type: String,
        props: Props,
        style: Style,
        children: Vec<VNode>,
    },

    /// Placeholder for a node that could not be rendered (shows the error
    /// inline instead of aborting the page)
    Error {
        node_id: String,
        component_type: String,
        message: String,
    },
}

impl VNode {
    pub fn node_id(&self) -> &str {
        match self {
            VNode::Component { node_id, .. } | VNode::Error { node_id, .. } => node_id,
        }
    }

    pub fn component_type(&self) -> &str {
        match self {
            VNode::Component { component_type, .. } | VNode::Error { component_type, .. } => {
                component_type
            }
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Component { children, .. } => children,
            VNode::Error { .. } => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, VNode::Error { .. })
    }
}

/// Render output for a whole page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub nodes: Vec<VNode>,
}

impl RenderedPage {
    /// Depth-first search by source node id
    pub fn find(&self, node_id: &str) -> Option<&VNode> {
        fn search<'a>(nodes: &'a [VNode], node_id: &str) -> Option<&'a VNode> {
            for node in nodes {
                if node.node_id() == node_id {
                    return Some(node);
                }
                if let Some(found) = search(node.children(), node_id) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.nodes, node_id)
    }

    /// All error placeholders, in render order
    pub fn errors(&self) -> Vec<&VNode> {
        fn collect<'a>(nodes: &'a [VNode], out: &mut Vec<&'a VNode>) {
            for node in nodes {
                if node.is_error() {
                    out.push(node);
                }
                collect(node.children(), out);
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }

    /// Indented text outline, one node per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_outline(node, 0, &mut out);
        }
        out
    }
}

fn write_outline(node: &VNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        VNode::Component {
            node_id,
            component_type,
            props,
            children,
            ..
        } => {
            let _ = write!(out, "{}{} #{}", indent, component_type, node_id);
            for (key, value) in props {
                let _ = write!(out, " {}={:?}", key, value.to_string());
            }
            out.push('\n');
            for child in children {
                write_outline(child, depth + 1, out);
            }
        }
        VNode::Error { node_id, message, .. } => {
            let _ = writeln!(out, "{}!! {} #{}", indent, message, node_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_common::PropValue;

    fn page() -> RenderedPage {
        let mut props = Props::new();
        props.insert("text".to_string(), PropValue::from("Hello"));

        RenderedPage {
            nodes: vec![VNode::Component {
                node_id: "c1".to_string(),
                component_type: "Container".to_string(),
                props: Props::new(),
                style: Style::new(),
                children: vec![
                    VNode::Component {
                        node_id: "h1".to_string(),
                        component_type: "Heading".to_string(),
                        props,
                        style: Style::new(),
                        children: vec![],
                    },
                    VNode::Error {
                        node_id: "x1".to_string(),
                        component_type: "Ghost".to_string(),
                        message: "Unknown component 'Ghost'".to_string(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_find_and_errors() {
        let page = page();
        assert_eq!(page.find("h1").unwrap().component_type(), "Heading");
        assert!(page.find("missing").is_none());

        let errors = page.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].node_id(), "x1");
    }

    #[test]
    fn test_outline() {
        let outline = page().outline();
        assert_eq!(
            outline,
            "Container #c1\n  Heading #h1 text=\"Hello\"\n  !! Unknown component 'Ghost' #x1\n"
        );
    }

    #[test]
    fn test_vnode_json_is_tagged() {
        let json = serde_json::to_value(&page().nodes[0]).unwrap();
        assert_eq!(json["kind"], "Component");
        assert_eq!(json["node_id"], "c1");

        let error = &json["children"][1];
        assert_eq!(error["kind"], "Error");
        assert_eq!(error["message"], "Unknown component 'Ghost'");
    }
}
