use crate::node::ComponentNode;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Largest magnitude an `f64` holds without losing integer precision
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// `{"$fn": "name"}` marker. Any other key makes the object a plain
/// [`PropValue::Object`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionRef {
    #[serde(rename = "$fn")]
    pub name: String,
}

/// `{"$node": {...}}` marker holding an inline component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRef {
    #[serde(rename = "$node")]
    pub node: Box<ComponentNode>,
}

/// Dynamically typed prop value.
///
/// Serialized untagged so page documents stay plain JSON. Component
/// references and function references use `{"$node": ...}` and
/// `{"$fn": "name"}` markers respectively. Integral numbers are written
/// back without a fractional part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    String(String),
    Array(Vec<PropValue>),
    Function(FunctionRef),
    Node(NodeRef),
    Object(BTreeMap<String, PropValue>),
}

fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

impl PropValue {
    pub fn function(name: impl Into<String>) -> Self {
        PropValue::Function(FunctionRef { name: name.into() })
    }

    pub fn node(node: ComponentNode) -> Self {
        PropValue::Node(NodeRef {
            node: Box::new(node),
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            PropValue::Null => "null",
            PropValue::Bool(_) => "boolean",
            PropValue::Number(_) => "number",
            PropValue::String(_) => "string",
            PropValue::Array(_) => "array",
            PropValue::Function(_) => "function",
            PropValue::Node(_) => "node",
            PropValue::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Null or empty string
    pub fn is_blank(&self) -> bool {
        match self {
            PropValue::Null => true,
            PropValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => Ok(()),
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::String(s) => f.write_str(s),
            PropValue::Function(func) => write!(f, "fn {}", func.name),
            PropValue::Node(r) => write!(f, "<{} #{}>", r.node.component_type, r.node.id),
            PropValue::Array(_) | PropValue::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Number(n as f64)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(items: Vec<PropValue>) -> Self {
        PropValue::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json_values() {
        let value: PropValue = serde_json::from_value(json!({
            "label": "Go",
            "count": 3,
            "enabled": true,
            "tags": ["a", "b"],
            "nothing": null
        }))
        .unwrap();

        let PropValue::Object(map) = value else {
            panic!("Expected object");
        };
        assert_eq!(map["label"], PropValue::from("Go"));
        assert_eq!(map["count"], PropValue::Number(3.0));
        assert_eq!(map["enabled"], PropValue::Bool(true));
        assert_eq!(map["tags"].type_name(), "array");
        assert_eq!(map["nothing"], PropValue::Null);
    }

    #[test]
    fn test_function_and_node_markers() {
        let func: PropValue = serde_json::from_value(json!({ "$fn": "onSubmit" })).unwrap();
        assert_eq!(func, PropValue::function("onSubmit"));

        let node: PropValue =
            serde_json::from_value(json!({ "$node": { "id": "n1", "type": "Heading" } })).unwrap();
        match node {
            PropValue::Node(r) => {
                assert_eq!(r.node.id, "n1");
                assert!(r.node.children.is_empty());
            }
            other => panic!("Expected node, got {:?}", other),
        }

        let json = serde_json::to_value(&func).unwrap();
        assert_eq!(json, json!({ "$fn": "onSubmit" }));
    }

    #[test]
    fn test_marker_with_extra_keys_stays_object() {
        let value: PropValue =
            serde_json::from_value(json!({ "$fn": "track", "label": "x" })).unwrap();
        let PropValue::Object(map) = &value else {
            panic!("Expected object, got {:?}", value);
        };
        assert_eq!(map["$fn"], PropValue::from("track"));
        assert_eq!(map["label"], PropValue::from("x"));

        let value: PropValue =
            serde_json::from_value(json!({ "$node": { "id": "n1", "type": "Heading" }, "slot": 1 }))
                .unwrap();
        assert_eq!(value.type_name(), "object");
    }

    #[test]
    fn test_integers_serialize_without_fraction() {
        let value = PropValue::Array(vec![
            PropValue::Number(3.0),
            PropValue::Number(-12.0),
            PropValue::Number(2.5),
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[3,-12,2.5]");
        assert_eq!(serde_json::to_string(&PropValue::Number(1e300)).unwrap(), "1e300");
    }

    #[test]
    fn test_blank_values() {
        assert!(PropValue::Null.is_blank());
        assert!(PropValue::from("").is_blank());
        assert!(!PropValue::from("x").is_blank());
        assert!(!PropValue::Bool(false).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(PropValue::Number(2.5).to_string(), "2.5");
        assert_eq!(PropValue::from("hi").to_string(), "hi");
        assert_eq!(
            PropValue::Array(vec![PropValue::Number(1.0)]).to_string(),
            "[1]"
        );
    }
}
