//! Pipeline and trigger environment properties

use serde::{Deserialize, Serialize};

/// Property value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Plain string value
    Text,
    /// Value stored and returned redacted
    Secure,
    /// Value selected from a tool integration in the parent toolchain
    Integration,
    /// Value restricted to one of the options in `enum`
    SingleSelect,
    /// Value sourced from an App Configuration property
    Appconfig,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PropertyType::Text => "text",
            PropertyType::Secure => "secure",
            PropertyType::Integration => "integration",
            PropertyType::SingleSelect => "single_select",
            PropertyType::Appconfig => "appconfig",
        };
        write!(f, "{}", s)
    }
}

/// A pipeline environment property
///
/// Properties are exposed to every run of the pipeline. A trigger property
/// with the same name overrides the pipeline property unless the pipeline
/// property is locked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Options for `single_select` properties
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "enum")]
    pub options: Vec<String>,
    /// When true, trigger properties and run requests cannot override this
    /// property; overriding attempts are rejected
    #[serde(default)]
    pub locked: bool,
    /// Dot-notation path selecting a value out of the tool integration data,
    /// for `integration` properties only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// A trigger property, overriding or supplementing pipeline properties for
/// runs started by that trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerProperty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "enum")]
    pub options: Vec<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&PropertyType::SingleSelect).unwrap(),
            "\"single_select\""
        );
        let parsed: PropertyType = serde_json::from_str("\"secure\"").unwrap();
        assert_eq!(parsed, PropertyType::Secure);
    }

    #[test]
    fn test_property_enum_field_rename() {
        let json = r#"{
            "name": "deploy-target",
            "value": "staging",
            "type": "single_select",
            "enum": ["staging", "production"]
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.options, vec!["staging", "production"]);
        assert!(!property.locked);

        let back = serde_json::to_value(&property).unwrap();
        assert_eq!(back["enum"][1], "production");
    }
}
