//! Tool specifications sent to the model.
//!
//! A specification describes a tool in the JSON-Schema-like shape chat
//! providers understand: a name, a description, a mapping of parameter
//! names to typed schemas, and the set of required parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema for one tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// JSON-Schema type, e.g. `integer`, `string`, `number`.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed values, when the parameter is an enumeration.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl ParameterSchema {
    /// Create a schema with the given type.
    #[must_use]
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: schema_type.into(),
            description: None,
            enum_values: None,
        }
    }

    /// An integer parameter.
    #[must_use]
    pub fn integer() -> Self {
        Self::new("integer")
    }

    /// A string parameter.
    #[must_use]
    pub fn string() -> Self {
        Self::new("string")
    }

    /// A number parameter.
    #[must_use]
    pub fn number() -> Self {
        Self::new("number")
    }

    /// A boolean parameter.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict to an enumeration of values.
    #[must_use]
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Parameter schema for a tool: an ordered property map plus required set.
///
/// Property order is preserved because it is part of what the model sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Parameter definitions, in declaration order.
    pub properties: IndexMap<String, ParameterSchema>,
    /// Names of required parameters.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,
}

impl ToolParameters {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter.
    pub fn add_parameter(&mut self, name: &str, schema: ParameterSchema) {
        self.properties.insert(name.to_string(), schema);
        if !self.required.contains(&name.to_string()) {
            self.required.push(name.to_string());
        }
    }

    /// Add an optional parameter.
    pub fn add_optional_parameter(&mut self, name: &str, schema: ParameterSchema) {
        self.properties.insert(name.to_string(), schema);
    }

    /// Check if a parameter is required.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Check if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Complete description of a tool the model may call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpecification {
    /// Tool name (must be a valid identifier).
    pub name: String,
    /// What the tool does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter schema.
    #[serde(skip_serializing_if = "ToolParameters::is_empty", default)]
    pub parameters: ToolParameters,
}

impl ToolSpecification {
    /// Create a new tool specification.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: ToolParameters::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a required parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: &str, schema: ParameterSchema) -> Self {
        self.parameters.add_parameter(name, schema);
        self
    }

    /// Add an optional parameter.
    #[must_use]
    pub fn with_optional_parameter(mut self, name: &str, schema: ParameterSchema) -> Self {
        self.parameters.add_optional_parameter(name, schema);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> ToolSpecification {
        ToolSpecification::new("calculator")
            .with_description("returns a sum of two numbers")
            .with_parameter("first", ParameterSchema::integer())
            .with_parameter("second", ParameterSchema::integer())
    }

    #[test]
    fn test_parameter_order_preserved() {
        let spec = calculator();
        let names: Vec<_> = spec.parameters.properties.keys().cloned().collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(spec.parameters.is_required("first"));
        assert!(spec.parameters.is_required("second"));
    }

    #[test]
    fn test_optional_parameter_not_required() {
        let spec = ToolSpecification::new("weather")
            .with_parameter("city", ParameterSchema::string())
            .with_optional_parameter(
                "unit",
                ParameterSchema::string().with_enum_values(["celsius", "fahrenheit"]),
            );
        assert!(spec.parameters.is_required("city"));
        assert!(!spec.parameters.is_required("unit"));
    }

    #[test]
    fn test_serde_shape() {
        let spec = calculator();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["parameters"]["properties"]["first"]["type"], "integer");
        assert_eq!(json["parameters"]["required"][0], "first");
    }
}
