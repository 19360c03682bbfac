use crate::builtins::builtin_schemas;
use crate::error::SchemaResult;
use crate::schema::ComponentSchema;
use pagewright_common::{ComponentNode, IdGenerator, Props, Style};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Lookup table from component type name to schema
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ComponentSchema>,

    /// Names shipped with the editor
    builtin: BTreeSet<String>,

    /// Names registered at runtime that are not built-ins
    custom: BTreeSet<String>,
}

impl SchemaRegistry {
    /// Empty registry (no built-ins)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in component set
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for schema in builtin_schemas() {
            registry.builtin.insert(schema.name.clone());
            registry.schemas.insert(schema.name.clone(), schema);
        }
        registry
    }

    pub fn get_component(&self, component_type: &str) -> Option<&ComponentSchema> {
        self.schemas.get(component_type)
    }

    /// All registered type names, sorted
    pub fn get_all_components(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.schemas.contains_key(component_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Whether `parent_type` may hold a `child_type` child.
    ///
    /// Unknown parents accept anything. This fails open on purpose so that
    /// pages referencing unregistered custom components stay editable.
    pub fn can_contain_child(&self, parent_type: &str, child_type: &str) -> bool {
        match self.schemas.get(parent_type) {
            Some(schema) => schema.allowed_children.allows(child_type),
            None => true,
        }
    }

    /// Insert or replace a schema under `name`.
    ///
    /// The key is authoritative: `schema.name` is overwritten with `name`.
    /// Replacing a built-in keeps it a built-in.
    pub fn register_component(&mut self, name: impl Into<String>, mut schema: ComponentSchema) {
        let name = name.into();
        schema.name = name.clone();
        let overrides_builtin = self.builtin.contains(&name);
        debug!(component = %name, overrides_builtin, "Registering component schema");
        if !overrides_builtin {
            self.custom.insert(name.clone());
        }
        self.schemas.insert(name, schema);
    }

    /// Parse, validate and register a schema document; returns its name
    pub fn register_json(&mut self, json: &str) -> SchemaResult<String> {
        let schema = ComponentSchema::from_json(json)?;
        let name = schema.name.clone();
        self.register_component(name.clone(), schema);
        Ok(name)
    }

    /// Whether `name` was registered at runtime
    pub fn is_custom(&self, name: &str) -> bool {
        self.custom.contains(name)
    }

    /// Schemas registered at runtime, sorted by name
    pub fn custom_schemas(&self) -> Vec<&ComponentSchema> {
        self.custom
            .iter()
            .filter_map(|name| self.schemas.get(name))
            .collect()
    }

    /// Declared prop defaults for a type (empty for unknown types)
    pub fn default_props(&self, component_type: &str) -> Props {
        self.schemas
            .get(component_type)
            .map(|schema| {
                schema
                    .props
                    .iter()
                    .filter_map(|(key, prop)| prop.default.clone().map(|value| (key.clone(), value)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Schema defaults overlaid with the node's own props (override wins)
    pub fn merge_props(&self, node: &ComponentNode) -> Props {
        let mut props = self.default_props(&node.component_type);
        for (key, value) in &node.props {
            props.insert(key.clone(), value.clone());
        }
        props
    }

    /// Schema default style overlaid with the node's own style; empty values dropped
    pub fn merge_style(&self, node: &ComponentNode) -> Style {
        let mut style = self
            .schemas
            .get(&node.component_type)
            .map(|schema| schema.default_style.clone())
            .unwrap_or_default();
        for (key, value) in &node.style {
            style.insert(key.clone(), value.clone());
        }
        style.retain(|_, value| !value.is_empty());
        style
    }

    /// New node of a registered type with a fresh id.
    ///
    /// The node carries no overrides; schema defaults are applied at render
    /// time so later schema changes flow through.
    pub fn create_node(&self, component_type: &str, ids: &mut IdGenerator) -> Option<ComponentNode> {
        self.schemas
            .contains_key(component_type)
            .then(|| ComponentNode::new(ids.new_id(), component_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AllowedChildren, PropSchema};
    use pagewright_common::PropValue;

    #[test]
    fn test_builtin_lookup() {
        let registry = SchemaRegistry::with_builtins();
        assert!(registry.get_component("Heading").is_some());
        assert!(registry.get_component("Marquee").is_none());

        let names = registry.get_all_components();
        assert!(names.contains(&"Container".to_string()));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_can_contain_child() {
        let registry = SchemaRegistry::with_builtins();

        // Wildcard
        assert!(registry.can_contain_child("Container", "Heading"));
        // Explicit list
        assert!(registry.can_contain_child("Card", "Button"));
        assert!(!registry.can_contain_child("Card", "Grid"));
        // Leaf
        assert!(!registry.can_contain_child("Heading", "Paragraph"));
        // Unknown parent fails open
        assert!(registry.can_contain_child("Mystery", "Heading"));
    }

    #[test]
    fn test_register_is_upsert() {
        let mut registry = SchemaRegistry::with_builtins();
        let before = registry.len();

        registry.register_component("Hero", ComponentSchema::new("Hero", "v1"));
        registry.register_component("Hero", ComponentSchema::new("Hero", "v2"));

        assert_eq!(registry.len(), before + 1);
        assert_eq!(registry.get_component("Hero").unwrap().description, "v2");
        assert!(registry.is_custom("Hero"));
        assert!(!registry.is_custom("Heading"));
        assert_eq!(registry.custom_schemas().len(), 1);
    }

    #[test]
    fn test_register_fills_missing_name() {
        let mut registry = SchemaRegistry::new();
        registry.register_component("Banner", ComponentSchema::new("", "unnamed"));
        assert_eq!(registry.get_component("Banner").unwrap().name, "Banner");
    }

    #[test]
    fn test_register_key_overrides_embedded_name() {
        let mut registry = SchemaRegistry::new();
        registry.register_component("Banner", ComponentSchema::new("Billboard", "renamed"));

        assert_eq!(registry.get_component("Banner").unwrap().name, "Banner");
        assert!(!registry.contains("Billboard"));
    }

    #[test]
    fn test_builtin_override_stays_builtin() {
        let mut registry = SchemaRegistry::with_builtins();
        let before = registry.len();

        registry.register_component("Heading", ComponentSchema::new("Heading", "house style"));

        assert_eq!(registry.len(), before);
        assert_eq!(registry.get_component("Heading").unwrap().description, "house style");
        assert!(!registry.is_custom("Heading"));
        assert!(registry.custom_schemas().is_empty());
    }

    #[test]
    fn test_register_json() {
        let mut registry = SchemaRegistry::new();
        let name = registry
            .register_json(r#"{ "name": "Quote", "props": { "text": { "type": "string" } } }"#)
            .unwrap();
        assert_eq!(name, "Quote");
        assert!(registry.contains("Quote"));
        assert!(registry.register_json("{").is_err());
    }

    #[test]
    fn test_merge_props_override_wins() {
        let registry = SchemaRegistry::with_builtins();
        let node = ComponentNode::new("b1", "Button").with_prop("label", "Buy");

        let props = registry.merge_props(&node);
        assert_eq!(props["label"], PropValue::from("Buy"));
        assert_eq!(props["variant"], PropValue::from("primary"));
        assert!(!props.contains_key("href"));
    }

    #[test]
    fn test_merge_style_prunes_empty() {
        let mut registry = SchemaRegistry::new();
        registry.register_component(
            "Box",
            ComponentSchema::new("Box", "")
                .children(AllowedChildren::any())
                .style("padding", "8px")
                .style("color", "black"),
        );

        let mut node = ComponentNode::new("x", "Box").with_style("color", "red");
        node.style.insert("padding".to_string(), String::new());

        let style = registry.merge_style(&node);
        assert_eq!(style.get("color").map(String::as_str), Some("red"));
        assert!(!style.contains_key("padding"));
    }

    #[test]
    fn test_unknown_type_has_no_defaults() {
        let registry = SchemaRegistry::with_builtins();
        let node = ComponentNode::new("x", "Unknown").with_prop("a", 1i64);
        assert_eq!(registry.merge_props(&node).len(), 1);
        assert!(registry.merge_style(&node).is_empty());
    }

    #[test]
    fn test_create_node() {
        let mut registry = SchemaRegistry::new();
        registry.register_component(
            "Badge",
            ComponentSchema::new("Badge", "").prop("text", PropSchema::string().default_value("New")),
        );
        let mut ids = IdGenerator::new();

        let node = registry.create_node("Badge", &mut ids).unwrap();
        assert_eq!(node.component_type, "Badge");
        assert!(node.props.is_empty());
        assert!(registry.create_node("Nope", &mut ids).is_none());
    }
}
