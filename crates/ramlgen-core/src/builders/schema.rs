//! Draft-04 JSON schema generation for resource bodies.

use serde_json::{json, Map as JsonMap, Value as JsonValue};

use super::SchemaGenerator;
use crate::metadata::{ApiProperty, ApiResource};
use crate::raml::ParameterType;

const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Builds an object schema from the resource's properties
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaGenerator;

impl SchemaGenerator for JsonSchemaGenerator {
    fn generate(&self, resource: &ApiResource) -> crate::Result<JsonValue> {
        let mut properties = JsonMap::new();
        let mut required = Vec::new();

        for property in &resource.properties {
            if property.id.is_empty() {
                return Err(crate::Error::schema(format!(
                    "Resource '{}' has a property without an id",
                    resource.title
                )));
            }
            if property.is_required {
                required.push(JsonValue::String(property.id.clone()));
            }
            properties.insert(property.id.clone(), property_schema(property));
        }

        let mut schema = json!({
            "$schema": DRAFT_04,
            "title": resource.type_name.as_deref().unwrap_or(&resource.title),
            "type": "object",
            "properties": properties,
        });
        if let Some(description) = &resource.description {
            schema["description"] = json!(description);
        }
        if !required.is_empty() {
            schema["required"] = JsonValue::Array(required);
        }
        Ok(schema)
    }
}

fn property_schema(property: &ApiProperty) -> JsonValue {
    let item = json!({ "type": json_type(&property.property_type) });
    let mut schema = if property.is_repeatable {
        json!({ "type": "array", "items": item })
    } else {
        item
    };

    if let Some(title) = &property.title {
        schema["title"] = json!(title);
    }
    if let Some(description) = &property.description {
        schema["description"] = json!(description);
    }
    if let Some(values) = &property.allowed_values {
        schema["enum"] = json!(values);
    }
    schema
}

fn json_type(type_name: &str) -> &'static str {
    match ParameterType::from_type_name(type_name) {
        ParameterType::Integer => "integer",
        ParameterType::Number => "number",
        ParameterType::Boolean => "boolean",
        _ => "string",
    }
}
