//! Built-in template collaborators.
//!
//! | Template | Direction | Behaviour |
//! |----------|-----------|-----------|
//! | [`JsonPointerTemplate`] | inbound | Extracts a scalar from a JSON payload |
//! | [`FormatTemplate`] | outbound | Substitutes `{value}` in a fixed pattern |

use serde_json::Value;

use crate::ports::{PayloadTemplate, RenderError};

/// Extracts the scalar at a JSON pointer (RFC 6901) from a JSON payload.
///
/// `{"position": 42}` with pointer `/position` renders as `42`.
#[derive(Debug, Clone)]
pub struct JsonPointerTemplate {
    pointer: String,
}

impl JsonPointerTemplate {
    #[must_use]
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
        }
    }
}

impl PayloadTemplate for JsonPointerTemplate {
    fn render(&self, input: &str) -> Result<String, RenderError> {
        let document: Value = serde_json::from_str(input).map_err(RenderError::InvalidJson)?;
        match document.pointer(&self.pointer) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(value.to_string()),
            _ => Err(RenderError::MissingValue(self.pointer.clone())),
        }
    }
}

/// Replaces every `{value}` placeholder of a pattern with the input.
///
/// `{"pos": {value}}` rendered with `42` gives `{"pos": 42}`.
#[derive(Debug, Clone)]
pub struct FormatTemplate {
    pattern: String,
}

impl FormatTemplate {
    pub const PLACEHOLDER: &'static str = "{value}";

    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl PayloadTemplate for FormatTemplate {
    fn render(&self, input: &str) -> Result<String, RenderError> {
        Ok(self.pattern.replace(Self::PLACEHOLDER, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_extract_number_at_pointer() {
        let template = JsonPointerTemplate::new("/position");
        assert_eq!(template.render(r#"{"position": 42}"#).unwrap(), "42");
        assert_eq!(template.render(r#"{"position": 12.5}"#).unwrap(), "12.5");
    }

    #[test]
    fn should_extract_string_without_quotes() {
        let template = JsonPointerTemplate::new("/state/value");
        let rendered = template
            .render(r#"{"state": {"value": "closed"}}"#)
            .unwrap();
        assert_eq!(rendered, "closed");
    }

    #[test]
    fn should_fail_on_invalid_json() {
        let template = JsonPointerTemplate::new("/position");
        let result = template.render("42%");
        assert!(matches!(result, Err(RenderError::InvalidJson(_))));
    }

    #[test]
    fn should_fail_on_missing_or_structured_value() {
        let template = JsonPointerTemplate::new("/position");
        assert!(matches!(
            template.render(r#"{"other": 1}"#),
            Err(RenderError::MissingValue(_))
        ));
        assert!(matches!(
            template.render(r#"{"position": {"raw": 1}}"#),
            Err(RenderError::MissingValue(_))
        ));
    }

    #[test]
    fn should_substitute_every_placeholder() {
        let template = FormatTemplate::new(r#"{"pos": {value}, "echo": "{value}"}"#);
        assert_eq!(
            template.render("42").unwrap(),
            r#"{"pos": 42, "echo": "42"}"#
        );
    }

    #[test]
    fn should_return_pattern_unchanged_without_placeholder() {
        let template = FormatTemplate::new("GO");
        assert_eq!(template.render("42").unwrap(), "GO");
    }
}
