//! Field configuration
//!
//! A field can be configured in code or from TOML:
//!
//! ```toml
//! name = "query"
//! class_name = "sql-editor"
//! placeholder = "SELECT ..."
//! required = true
//! preserve_scroll_position = true
//!
//! [options]
//! mode = "text/x-sql"
//! lineWrapping = true
//! ```
//!
//! The `[options]` table is handed to the editor untouched.

use mirrorfield_core::{EditorOptions, OptionValue};
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::widget::TextAreaAnchor;

/// Configuration for one editor field
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldConfig {
    /// `name` of the anchor element
    #[serde(default = "default_name")]
    pub name: String,
    /// Class applied to the anchor element
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub autofocus: bool,
    /// Keep the scroll offset when the host replaces the value
    #[serde(default)]
    pub preserve_scroll_position: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Editor options, passed through opaquely
    #[serde(default)]
    pub options: EditorOptions,
}

fn default_name() -> String {
    "mirrorfield".to_string()
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            class_name: String::new(),
            autofocus: false,
            preserve_scroll_position: false,
            placeholder: None,
            required: false,
            options: EditorOptions::new(),
        }
    }
}

impl FieldConfig {
    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, FieldError> {
        Ok(toml::from_str(source)?)
    }

    /// Build the anchor element described by this configuration
    pub fn anchor(&self) -> TextAreaAnchor {
        TextAreaAnchor::new(self.name.clone())
            .class_name(self.class_name.clone())
            .autofocus(self.autofocus)
    }
}

/// Turn a JSON value into an options map
///
/// `null` is an empty map; anything other than an object is rejected.
pub fn parse_options(value: OptionValue) -> Result<EditorOptions, FieldError> {
    match value {
        OptionValue::Null => Ok(EditorOptions::new()),
        OptionValue::Object(map) => Ok(map.into_iter().collect()),
        other => Err(FieldError::InvalidOptions(json_kind(&other).to_string())),
    }
}

fn json_kind(value: &OptionValue) -> &'static str {
    match value {
        OptionValue::Null => "null",
        OptionValue::Bool(_) => "a boolean",
        OptionValue::Number(_) => "a number",
        OptionValue::String(_) => "a string",
        OptionValue::Array(_) => "an array",
        OptionValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = FieldConfig::from_toml_str("").unwrap();
        assert_eq!(config, FieldConfig::default());
        assert_eq!(config.name, "mirrorfield");
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_full_document() {
        let config = FieldConfig::from_toml_str(
            r#"
            name = "query"
            class_name = "sql-editor"
            autofocus = true
            placeholder = "SELECT ..."
            required = true
            preserve_scroll_position = true

            [options]
            mode = "text/x-sql"
            tabSize = 2
            lineWrapping = true
            extraKeys = { "Ctrl-Space" = "autocomplete" }
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "query");
        assert!(config.required);
        assert!(config.preserve_scroll_position);
        assert_eq!(config.placeholder.as_deref(), Some("SELECT ..."));
        assert_eq!(config.options.get("tabSize"), Some(&json!(2)));
        assert_eq!(
            config.options.get("extraKeys"),
            Some(&json!({"Ctrl-Space": "autocomplete"}))
        );
        assert_eq!(config.options.len(), 4);

        let anchor = config.anchor();
        assert_eq!(anchor.name, "query");
        assert_eq!(anchor.class_name, "sql-editor");
        assert!(anchor.autofocus);
        assert!(!anchor.augmented);
    }

    #[test]
    fn test_bad_document_is_config_error() {
        let err = FieldConfig::from_toml_str("required = \"yes\"").unwrap_err();
        assert!(matches!(err, FieldError::Config(_)));
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(json!({"mode": "gfm", "readOnly": false})).unwrap();
        assert_eq!(options.len(), 2);
        assert!(parse_options(json!(null)).unwrap().is_empty());

        let err = parse_options(json!([1, 2])).unwrap_err();
        assert!(matches!(err, FieldError::InvalidOptions(ref kind) if kind == "an array"));
    }
}
