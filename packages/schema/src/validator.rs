//! Schema checks over a page tree
use crate::registry::SchemaRegistry;
use pagewright_common::{ComponentNode, ComponentTree};
use std::collections::HashSet;

/// Validation warning level
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    /// Warning that should be addressed
    Warning,
    /// Error that will cause issues
    Error,
}

/// Validation warning
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
    pub node_id: Option<String>,
}

impl ValidationWarning {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == ValidationLevel::Error
    }
}

/// Check a tree against the registry.
///
/// Reports unknown component types and duplicate ids as errors; containment
/// violations, missing required props, values of the wrong type and values
/// outside declared options as warnings.
pub fn validate_tree(registry: &SchemaRegistry, tree: &ComponentTree) -> Vec<ValidationWarning> {
    let mut checker = TreeChecker {
        registry,
        seen_ids: HashSet::new(),
        warnings: Vec::new(),
    };

    for root in tree.iter() {
        checker.check_node(root, None);
    }

    checker.warnings
}

struct TreeChecker<'a> {
    registry: &'a SchemaRegistry,
    seen_ids: HashSet<String>,
    warnings: Vec<ValidationWarning>,
}

impl TreeChecker<'_> {
    fn check_node(&mut self, node: &ComponentNode, parent_type: Option<&str>) {
        if !self.seen_ids.insert(node.id.clone()) {
            self.warnings.push(
                ValidationWarning::error(format!("Duplicate node id '{}'", node.id))
                    .with_node_id(&node.id),
            );
        }

        if let Some(parent) = parent_type {
            if !self.registry.can_contain_child(parent, &node.component_type) {
                self.warnings.push(
                    ValidationWarning::warning(format!(
                        "{} cannot contain {}",
                        parent, node.component_type
                    ))
                    .with_node_id(&node.id),
                );
            }
        }

        match self.registry.get_component(&node.component_type) {
            None => {
                self.warnings.push(
                    ValidationWarning::error(format!(
                        "Unknown component type '{}'",
                        node.component_type
                    ))
                    .with_node_id(&node.id),
                );
            }
            Some(schema) => {
                let merged = self.registry.merge_props(node);

                for (key, prop) in &schema.props {
                    match merged.get(key) {
                        None if prop.required => {
                            self.warnings.push(
                                ValidationWarning::warning(format!(
                                    "{} is missing required prop '{}'",
                                    node.component_type, key
                                ))
                                .with_node_id(&node.id),
                            );
                        }
                        Some(value) if !prop.prop_type.accepts(value) => {
                            self.warnings.push(
                                ValidationWarning::warning(format!(
                                    "Prop '{}' expects {} but got {}",
                                    key,
                                    prop.prop_type,
                                    value.type_name()
                                ))
                                .with_node_id(&node.id),
                            );
                        }
                        Some(value) if !prop.allows_option(value) => {
                            self.warnings.push(
                                ValidationWarning::warning(format!(
                                    "Prop '{}' value '{}' is not one of the allowed options",
                                    key, value
                                ))
                                .with_node_id(&node.id),
                            );
                        }
                        _ => {}
                    }
                }
            }
        }

        for child in &node.children {
            self.check_node(child, Some(&node.component_type));
        }
    }
}
