//! # Page Tree Model
//!
//! A page is an ordered list of root [`ComponentNode`]s, each of which owns an
//! ordered list of children. Children are held behind [`Arc`] so that edits
//! can rebuild the path from the root to the touched node and share every
//! other subtree with the previous version of the tree.
//!
//! Nodes are never mutated once they are inside an `Arc`; a new version of
//! the tree is always a new set of roots.

use crate::error::CommonError;
use crate::id_generator::IdGenerator;
use crate::result::CommonResult;
use crate::value::PropValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Instance prop overrides
pub type Props = BTreeMap<String, PropValue>;

/// Instance style overrides (CSS property → value)
pub type Style = BTreeMap<String, String>;

/// Component type seeded into every new page
pub const SEED_COMPONENT_TYPE: &str = "Container";

/// Directory (relative to the content root) holding page documents
pub const PAGES_DIR: &str = "pages";

/// Directory (relative to the content root) holding custom component schemas
pub const COMPONENTS_DIR: &str = "components";

/// One element of a page's component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: String,

    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub props: Props,

    #[serde(default, deserialize_with = "deserialize_style")]
    pub style: Style,

    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Arc<ComponentNode>>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            props: Props::new(),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }
}

/// Ordered roots of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTree {
    roots: Vec<Arc<ComponentNode>>,
}

impl ComponentTree {
    pub fn new(roots: Vec<ComponentNode>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_shared(roots: Vec<Arc<ComponentNode>>) -> Self {
        Self { roots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[Arc<ComponentNode>] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ComponentNode>> {
        self.roots.iter()
    }
}

impl From<Vec<ComponentNode>> for ComponentTree {
    fn from(roots: Vec<ComponentNode>) -> Self {
        Self::new(roots)
    }
}

/// A page and its component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub components: ComponentTree,
}

impl PageDocument {
    pub fn new(name: impl Into<String>, title: impl Into<String>, components: ComponentTree) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            components,
        }
    }

    /// Create a fresh page seeded with a single empty container
    pub fn new_page(name: &str, title: &str, ids: &mut IdGenerator) -> CommonResult<Self> {
        validate_page_name(name)?;
        let seed = ComponentNode::new(ids.new_id(), SEED_COMPONENT_TYPE);
        Ok(Self::new(name, title, ComponentTree::new(vec![seed])))
    }

    /// Location of this page relative to the content root
    pub fn path(&self) -> String {
        page_path(&self.name)
    }

    pub fn from_json(json: &str) -> CommonResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize with the conventional 2-space indentation
    pub fn to_json(&self) -> CommonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `pages/<name>.json`
pub fn page_path(name: &str) -> String {
    format!("{}/{}.json", PAGES_DIR, name)
}

/// `components/<Name>.json`
pub fn schema_path(name: &str) -> String {
    format!("{}/{}.json", COMPONENTS_DIR, name)
}

/// Page names double as file names, so they are restricted to a safe slug
pub fn validate_page_name(name: &str) -> CommonResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(CommonError::InvalidPageName(name.to_string()))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Style maps drop null and empty values on the way in
fn deserialize_style<'de, D>(deserializer: D) -> Result<Style, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_page_document() {
        let json = r#"{
            "name": "home",
            "title": "Home",
            "components": [
                {
                    "id": "c1",
                    "type": "Container",
                    "props": {},
                    "style": { "padding": "16px" },
                    "children": [
                        { "id": "h1", "type": "Heading", "props": { "text": "Hi" } }
                    ]
                }
            ]
        }"#;

        let page = PageDocument::from_json(json).unwrap();
        assert_eq!(page.name, "home");
        assert_eq!(page.components.len(), 1);

        let root = &page.components.roots()[0];
        assert_eq!(root.component_type, "Container");
        assert_eq!(root.style.get("padding").map(String::as_str), Some("16px"));
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn test_null_children_and_style_values() {
        let node: ComponentNode = serde_json::from_value(json!({
            "id": "n1",
            "type": "Text",
            "props": null,
            "style": { "color": null, "margin": "", "padding": "4px" },
            "children": null
        }))
        .unwrap();

        assert!(node.props.is_empty());
        assert!(node.children.is_empty());
        assert_eq!(node.style.len(), 1);
        assert_eq!(node.style["padding"], "4px");
    }

    #[test]
    fn test_round_trip_keeps_shape() {
        let page = PageDocument::new(
            "about",
            "About",
            ComponentTree::new(vec![ComponentNode::new("c1", "Container")
                .with_child(ComponentNode::new("h1", "Heading").with_prop("text", "About"))]),
        );

        let json = page.to_json().unwrap();
        assert!(json.contains("\n  \"name\": \"about\""));

        let parsed = PageDocument::from_json(&json).unwrap();
        assert_eq!(parsed, page);
    }

    #[test]
    fn test_round_trip_keeps_prop_objects_and_integers() {
        let json = r#"{
            "name": "home",
            "title": "Home",
            "components": [
                {
                    "id": "b1",
                    "type": "Button",
                    "props": { "meta": { "$fn": "track", "label": "x" }, "count": 3 }
                }
            ]
        }"#;

        let page = PageDocument::from_json(json).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&page.to_json().unwrap()).unwrap();
        assert_eq!(
            saved["components"][0]["props"],
            json!({ "meta": { "$fn": "track", "label": "x" }, "count": 3 })
        );
    }

    #[test]
    fn test_new_page_seeds_container() {
        let mut ids = IdGenerator::new();
        let page = PageDocument::new_page("landing", "Landing", &mut ids).unwrap();

        assert_eq!(page.components.len(), 1);
        assert_eq!(page.components.roots()[0].component_type, SEED_COMPONENT_TYPE);
        assert_eq!(page.path(), "pages/landing.json");
    }

    #[test]
    fn test_page_name_validation() {
        assert!(validate_page_name("about-us_2").is_ok());
        assert!(validate_page_name("").is_err());
        assert!(validate_page_name("../etc").is_err());
        assert!(validate_page_name("About").is_err());
    }
}
