use crate::schema::{AllowedChildren, ComponentSchema, PropSchema, PropType};
use pagewright_common::SEED_COMPONENT_TYPE;

/// Schemas available in every registry created with `with_builtins`
pub fn builtin_schemas() -> Vec<ComponentSchema> {
    vec![
        ComponentSchema::new(SEED_COMPONENT_TYPE, "Generic block that holds other components")
            .prop("tag", PropSchema::string().default_value("div").options(["div", "main", "article", "aside"]))
            .children(AllowedChildren::any())
            .style("display", "flex")
            .style("flexDirection", "column")
            .style("padding", "16px"),
        ComponentSchema::new("Section", "Full-width page section")
            .prop("anchor", PropSchema::string())
            .children(AllowedChildren::any())
            .style("padding", "48px 16px"),
        ComponentSchema::new("Grid", "Responsive grid of equal columns")
            .prop("columns", PropSchema::number().default_value(3.0))
            .prop("gap", PropSchema::string().default_value("16px"))
            .children(AllowedChildren::any())
            .style("display", "grid"),
        ComponentSchema::new("Card", "Bordered content card")
            .prop("elevated", PropSchema::boolean().default_value(false))
            .children(AllowedChildren::only(["Heading", "Paragraph", "Image", "Button", "Link", "Spacer"]))
            .style("border", "1px solid #e5e7eb")
            .style("borderRadius", "8px")
            .style("padding", "16px"),
        ComponentSchema::new("Heading", "Section heading")
            .prop("text", PropSchema::string().required().default_value("Heading"))
            .prop("level", PropSchema::string().default_value("h2").options(["h1", "h2", "h3", "h4", "h5", "h6"]))
            .style("margin", "0 0 12px"),
        ComponentSchema::new("Paragraph", "Block of body text")
            .prop("text", PropSchema::string().required().default_value("Lorem ipsum dolor sit amet."))
            .style("lineHeight", "1.6"),
        ComponentSchema::new("Button", "Call-to-action button")
            .prop("label", PropSchema::string().required().default_value("Click me"))
            .prop("href", PropSchema::string())
            .prop("variant", PropSchema::string().default_value("primary").options(["primary", "secondary", "ghost"]))
            .prop("disabled", PropSchema::boolean().default_value(false))
            .prop("onClick", PropSchema::new(PropType::Function))
            .style("padding", "8px 16px")
            .style("borderRadius", "4px"),
        ComponentSchema::new("Image", "Responsive image")
            .prop("src", PropSchema::string().required())
            .prop("alt", PropSchema::string().default_value(""))
            .prop("width", PropSchema::number())
            .style("maxWidth", "100%"),
        ComponentSchema::new("Link", "Inline hyperlink")
            .prop("text", PropSchema::string().required().default_value("Link"))
            .prop("href", PropSchema::string().required().default_value("#"))
            .prop("newTab", PropSchema::boolean().default_value(false)),
        ComponentSchema::new("Spacer", "Fixed vertical gap")
            .prop("size", PropSchema::number().default_value(24.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_valid() {
        for schema in builtin_schemas() {
            assert!(schema.validate().is_ok(), "{} should be valid", schema.name);
        }
    }

    #[test]
    fn test_seed_type_is_builtin() {
        assert!(builtin_schemas().iter().any(|s| s.name == SEED_COMPONENT_TYPE));
    }
}
