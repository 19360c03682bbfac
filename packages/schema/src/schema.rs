use crate::coerce;
use crate::error::{SchemaError, SchemaResult};
use pagewright_common::{PropValue, Style};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Wildcard entry in `allowedChildren`
pub const ANY_CHILD: &str = "*";

/// Declared type of a prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Node,
    Function,
}

impl PropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropType::String => "string",
            PropType::Number => "number",
            PropType::Boolean => "boolean",
            PropType::Array => "array",
            PropType::Object => "object",
            PropType::Node => "node",
            PropType::Function => "function",
        }
    }

    /// Whether a value already has this type. Null is accepted everywhere.
    pub fn accepts(&self, value: &PropValue) -> bool {
        matches!(
            (self, value),
            (_, PropValue::Null)
                | (PropType::String, PropValue::String(_))
                | (PropType::Number, PropValue::Number(_))
                | (PropType::Boolean, PropValue::Bool(_))
                | (PropType::Array, PropValue::Array(_))
                | (PropType::Object, PropValue::Object(_))
                | (PropType::Node, PropValue::Node(_))
                | (PropType::Function, PropValue::Function(_))
        )
    }

    /// Coerce raw editor input into a value of this type
    pub fn coerce(&self, raw: &str) -> PropValue {
        match self {
            PropType::String => PropValue::String(raw.to_string()),
            PropType::Number => coerce::to_number(raw),
            PropType::Boolean => coerce::to_boolean(raw),
            PropType::Array => coerce::to_array(raw),
            PropType::Object => coerce::to_object(raw),
            PropType::Node => coerce::to_node(raw),
            PropType::Function => coerce::to_function(raw),
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a single prop on a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSchema {
    #[serde(rename = "type")]
    pub prop_type: PropType,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PropValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl PropSchema {
    pub fn new(prop_type: PropType) -> Self {
        Self {
            prop_type,
            required: false,
            default: None,
            options: None,
        }
    }

    pub fn string() -> Self {
        Self::new(PropType::String)
    }

    pub fn number() -> Self {
        Self::new(PropType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(PropType::Boolean)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<PropValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Coerce raw editor input according to the declared type
    pub fn coerce(&self, raw: &str) -> PropValue {
        self.prop_type.coerce(raw)
    }

    /// Whether a string value is one of the declared options (if any)
    pub fn allows_option(&self, value: &PropValue) -> bool {
        match (&self.options, value) {
            (Some(options), PropValue::String(s)) => options.iter().any(|o| o == s),
            _ => true,
        }
    }
}

/// Child containment rule: explicit type names, or `["*"]` for anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedChildren(pub Vec<String>);

impl AllowedChildren {
    pub fn any() -> Self {
        Self(vec![ANY_CHILD.to_string()])
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn only<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(types.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, child_type: &str) -> bool {
        self.0.iter().any(|t| t == ANY_CHILD || t == child_type)
    }

    pub fn is_leaf(&self) -> bool {
        self.0.is_empty()
    }
}

/// Declarative description of a component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub props: BTreeMap<String, PropSchema>,

    #[serde(default)]
    pub allowed_children: AllowedChildren,

    #[serde(default)]
    pub default_style: Style,
}

impl ComponentSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            props: BTreeMap::new(),
            allowed_children: AllowedChildren::none(),
            default_style: Style::new(),
        }
    }

    pub fn prop(mut self, key: impl Into<String>, prop: PropSchema) -> Self {
        self.props.insert(key.into(), prop);
        self
    }

    pub fn children(mut self, allowed: AllowedChildren) -> Self {
        self.allowed_children = allowed;
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_style.insert(property.into(), value.into());
        self
    }

    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let schema: ComponentSchema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structural checks for schemas coming from outside the process
    pub fn validate(&self) -> SchemaResult<()> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        for (key, prop) in &self.props {
            if let Some(default) = &prop.default {
                if !prop.prop_type.accepts(default) {
                    return Err(SchemaError::DefaultTypeMismatch {
                        prop: key.clone(),
                        expected: prop.prop_type.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
