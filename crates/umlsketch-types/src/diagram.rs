//! Diagram request/response types.
//!
//! Wire shapes for the two endpoints plus [`DiagramResult`], the object the
//! generation model must return.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Literal that opens every PlantUML document.
pub const START_MARKER: &str = "@startuml";

/// Literal that closes every PlantUML document.
pub const END_MARKER: &str = "@enduml";

/// Body of a generate request.
///
/// Both fields are optional on the wire; the generator decides what a missing
/// description means. Neither field fails the body on an unexpected JSON type:
/// a non-string description is read by its truthiness, and a non-string
/// access code is kept as [`PresentedCode::Other`], which never matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "truthy_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub access_code: Option<PresentedCode>,
}

impl GenerationRequest {
    /// Request with a description and no access code.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            access_code: None,
        }
    }

    /// Attach an access code.
    pub fn with_access_code(mut self, code: impl Into<String>) -> Self {
        self.access_code = Some(PresentedCode::Text(code.into()));
        self
    }
}

/// Access code as sent by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresentedCode {
    Text(String),
    /// Any non-string JSON value. Compared against nothing.
    Other(Value),
}

impl PresentedCode {
    /// The code when it was sent as a JSON string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PresentedCode::Text(code) => Some(code),
            PresentedCode::Other(_) => None,
        }
    }
}

impl From<String> for PresentedCode {
    fn from(code: String) -> Self {
        PresentedCode::Text(code)
    }
}

/// Read any JSON value as optional text.
///
/// `null`, `false` and numeric zero count as absent. Other scalars become
/// their textual form and arrays or objects their compact JSON. Strings pass
/// through untouched, including the empty string.
fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }))
}

/// Body of a render request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Structured output returned by the generation model.
///
/// The JSON schema derived from this type is sent with every generation call,
/// so the field descriptions below are part of the model contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DiagramResult {
    #[schemars(
        description = "Сырой код PlantUML, начинающийся с @startuml и заканчивающийся @enduml"
    )]
    pub plantuml_code: String,

    #[schemars(
        description = "Тип созданной диаграммы на русском языке (например: Диаграмма последовательности, Диаграмма классов)"
    )]
    pub diagram_type: String,

    #[schemars(
        description = "Краткое объяснение логики и компонентов диаграммы на русском языке"
    )]
    pub explanation: String,
}

/// Successful generate response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDiagram {
    /// Normalized PlantUML markup.
    pub code: String,
    pub image_url: String,
    pub diagram_type: String,
    pub explanation: String,
}

/// Successful render response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDiagram {
    pub image_url: String,
}
