//! Structured output schema for the generation call.
//!
//! The schema is derived from [`DiagramResult`] and tightened for strict mode:
//! every object forbids additional properties, and draft meta keys are
//! dropped so the provider sees a bare object schema.

use serde_json::Value;

use umlsketch_types::diagram::DiagramResult;
use umlsketch_types::llm::{OutputConfig, OutputFormat, OutputJsonSchema};

/// Schema name sent alongside the JSON schema.
pub const DIAGRAM_SCHEMA_NAME: &str = "diagram_response";

/// JSON schema for [`DiagramResult`] with `additionalProperties: false`.
pub fn diagram_response_schema() -> Value {
    let mut schema = Value::from(schemars::schema_for!(DiagramResult));
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    add_additional_properties_false(&mut schema);
    schema
}

/// Strict `json_schema` output config for the generation call.
pub fn diagram_output_config() -> OutputConfig {
    OutputConfig {
        format: OutputFormat {
            type_field: "json_schema".to_string(),
            json_schema: OutputJsonSchema {
                name: DIAGRAM_SCHEMA_NAME.to_string(),
                schema: diagram_response_schema(),
                strict: Some(true),
            },
        },
    }
}

/// Recursively set `additionalProperties: false` on every object schema.
pub fn add_additional_properties_false(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for value in map.values_mut() {
                add_additional_properties_false(value);
            }
        }
        Value::Array(items) => {
            for item in items {
                add_additional_properties_false(item);
            }
        }
        _ => {}
    }
}
