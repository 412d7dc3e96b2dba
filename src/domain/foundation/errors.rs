//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised while validating caller-supplied input.
///
/// These never reach a provider or the mail transport; the HTTP adapter
/// turns them into a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } => field,
            ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Returns the value if it is present and not blank.
///
/// Required text fields arrive as optional JSON members; an absent member,
/// an empty string, and a whitespace-only string are all treated as missing.
pub fn require_text<'a>(
    field: &str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::empty_field(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("userMessage");
        assert_eq!(format!("{}", err), "Field 'userMessage' cannot be empty");
        assert_eq!(err.field(), "userMessage");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("state_transition", "bad");
        assert_eq!(
            format!("{}", err),
            "Field 'state_transition' has invalid format: bad"
        );
    }

    #[test]
    fn require_text_accepts_non_blank() {
        assert_eq!(require_text("name", Some("Jane")), Ok("Jane"));
    }

    #[test]
    fn require_text_rejects_missing_empty_and_blank() {
        assert!(require_text("name", None).is_err());
        assert!(require_text("name", Some("")).is_err());
        assert!(require_text("name", Some("   ")).is_err());
    }
}
