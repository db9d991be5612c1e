//! Error types for span configuration.

use serde::{Deserialize, Serialize};

use crate::value::ValueKind;

/// Errors raised while configuring or (de)serializing a span.
///
/// Every variant is a caller error detected at configuration time; stepping a
/// configured span never fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SpanError {
    /// A field required by the selected mode is absent
    #[error("'{mode}' span requires field '{field}'")]
    MissingField { mode: String, field: String },

    /// A keyed table (gradient steps, curve keys) has no entries
    #[error("'{mode}' span has an empty key set")]
    EmptyKeys { mode: String },

    /// `array` mode without elements
    #[error("'array' span requires at least one element")]
    EmptyArray,

    /// Unknown easing, curve shape, pick policy or value kind name
    #[error("unknown {what} '{name}'")]
    UnknownName { what: String, name: String },

    /// A literal does not have the component count of the span's value kind
    #[error("value shape mismatch: expected {expected:?} ({} components), got {actual} components", .expected.components())]
    ShapeMismatch { expected: ValueKind, actual: usize },

    /// Configuration JSON could not be interpreted
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Configuration could not be written out
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl SpanError {
    pub(crate) fn missing(mode: &str, field: &str) -> Self {
        Self::MissingField {
            mode: mode.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn unknown(what: &str, name: &str) -> Self {
        Self::UnknownName {
            what: what.to_string(),
            name: name.to_string(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingField { .. }
            | Self::EmptyKeys { .. }
            | Self::EmptyArray
            | Self::UnknownName { .. }
            | Self::ShapeMismatch { .. }
            | Self::InvalidConfiguration { .. } => "configuration",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for SpanError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfiguration {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = SpanError::missing("lerp", "end");
        assert_eq!(error.to_string(), "'lerp' span requires field 'end'");

        let error = SpanError::ShapeMismatch {
            expected: ValueKind::Vec4,
            actual: 3,
        };
        assert!(error.to_string().contains("4 components"));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SpanError::EmptyArray.category(), "configuration");
        let ser = SpanError::Serialization {
            reason: "x".to_string(),
        };
        assert_eq!(ser.category(), "serialization");
    }

    #[test]
    fn test_json_errors_become_configuration_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let span_err: SpanError = err.into();
        assert_eq!(span_err.category(), "configuration");
    }

    #[test]
    fn test_serialization() {
        let error = SpanError::unknown("easing", "bouncy");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: SpanError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
