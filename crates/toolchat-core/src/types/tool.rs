//! Tool descriptor and invocation types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A capability advertised to the model for function calling
///
/// Fetched from the tool provider at startup and immutable for the process
/// lifetime. `parameters` holds the provider's input schema verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name
    pub name: String,
    /// What the tool does; the model uses this to decide when to call it
    pub description: String,
    /// JSON Schema for the accepted arguments
    pub parameters: Value,
}

impl ToolDescriptor {
    /// Create a descriptor with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({ "type": "object" }),
        }
    }

    /// Set the parameter schema
    pub fn with_parameters(mut self, schema: Value) -> Self {
        self.parameters = schema;
        self
    }

    /// Check `arguments` against the parameter schema before invocation.
    ///
    /// Covers the shapes tool schemas actually use: an object type tag,
    /// `required` names, and per-property `type` tags. Anything the schema
    /// does not constrain passes.
    pub fn validate_arguments(&self, arguments: &Value) -> Result<(), ArgumentError> {
        let schema = match self.parameters.as_object() {
            Some(schema) => schema,
            None => return Ok(()),
        };

        if schema.get("type").and_then(Value::as_str) == Some("object") && !arguments.is_object() {
            return Err(ArgumentError::NotAnObject {
                got: json_type_name(arguments),
            });
        }

        let args = match arguments.as_object() {
            Some(args) => args,
            None => return Ok(()),
        };

        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if !args.contains_key(name) {
                    return Err(ArgumentError::MissingRequired { name: name.into() });
                }
            }
        }

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (name, value) in args {
                let declared = properties
                    .get(name)
                    .and_then(|p| p.get("type"))
                    .and_then(Value::as_str);
                if let Some(expected) = declared {
                    if !matches_type(value, expected) {
                        return Err(ArgumentError::WrongType {
                            name: name.clone(),
                            expected: expected.into(),
                            got: json_type_name(value),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// A function-call request emitted by the model instead of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the tool to invoke
    pub name: String,
    /// Arguments, expected to conform to the matching descriptor's schema
    pub arguments: Value,
}

impl ToolInvocation {
    /// Create a tool invocation
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Argument rejected before invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("arguments must be a JSON object, got {got}")]
    NotAnObject { got: &'static str },

    #[error("missing required argument `{name}`")]
    MissingRequired { name: String },

    #[error("argument `{name}` must be of type {expected}, got {got}")]
    WrongType {
        name: String,
        expected: String,
        got: &'static str,
    },
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown type tags are not ours to enforce
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post_tool() -> ToolDescriptor {
        ToolDescriptor::new("create_post", "Create a post").with_parameters(json!({
            "type": "object",
            "properties": {
                "status": { "type": "string" }
            },
            "required": ["status"]
        }))
    }

    #[test]
    fn test_valid_arguments() {
        let tool = post_tool();
        assert_eq!(tool.validate_arguments(&json!({ "status": "gm" })), Ok(()));
        // Extra keys the schema does not mention are allowed
        assert_eq!(
            tool.validate_arguments(&json!({ "status": "gm", "extra": 1 })),
            Ok(())
        );
    }

    #[test]
    fn test_missing_required_argument() {
        let tool = post_tool();
        assert_eq!(
            tool.validate_arguments(&json!({})),
            Err(ArgumentError::MissingRequired {
                name: "status".into()
            })
        );
    }

    #[test]
    fn test_wrong_argument_type() {
        let tool = post_tool();
        assert_eq!(
            tool.validate_arguments(&json!({ "status": 42 })),
            Err(ArgumentError::WrongType {
                name: "status".into(),
                expected: "string".into(),
                got: "number",
            })
        );
    }

    #[test]
    fn test_non_object_arguments() {
        let tool = post_tool();
        assert_eq!(
            tool.validate_arguments(&json!("gm")),
            Err(ArgumentError::NotAnObject { got: "string" })
        );
    }

    #[test]
    fn test_unconstrained_schema_passes_everything() {
        let tool = ToolDescriptor::new("anything", "No schema").with_parameters(Value::Null);
        assert_eq!(tool.validate_arguments(&json!([1, 2, 3])), Ok(()));
    }
}
