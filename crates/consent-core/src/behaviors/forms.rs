//! Client-side form validation.
//!
//! Pure validation over submitted field values: required fields must be
//! non-blank, and email fields must match the same loose pattern the site
//! has always used. Decorating the page with error markers is left to the
//! embedder; this module only decides.

use std::sync::OnceLock;

use regex::Regex;

/// Error message attached to a blank required field
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Error message attached to a malformed email field
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Input kind, driving which checks apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

/// A submitted form field
#[derive(Debug, Clone)]
pub struct FormField {
    /// Field name, echoed back in errors
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Raw submitted value
    pub value: String,
}

impl FormField {
    /// Required text field
    pub fn required_text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Text,
            required: true,
            value: value.to_string(),
        }
    }

    /// Required email field
    pub fn required_email(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Email,
            required: true,
            value: value.to_string(),
        }
    }
}

/// A validation failure for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: &'static str,
}

/// Whether a value passes the email format check
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Validate one field.
///
/// A blank required field reports only the required error; the email
/// format check applies to non-blank values.
pub fn validate_field(field: &FormField) -> Option<FieldError> {
    let trimmed = field.value.trim();

    if field.required && trimmed.is_empty() {
        return Some(FieldError {
            field: field.name.clone(),
            message: REQUIRED_MESSAGE,
        });
    }

    if field.kind == FieldKind::Email && !trimmed.is_empty() && !is_valid_email(trimmed) {
        return Some(FieldError {
            field: field.name.clone(),
            message: INVALID_EMAIL_MESSAGE,
        });
    }

    None
}

/// Validate a whole form, collecting errors in field order.
///
/// An empty result means the submit may proceed.
pub fn validate_form(fields: &[FormField]) -> Vec<FieldError> {
    fields.iter().filter_map(validate_field).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_required_field() {
        let field = FormField::required_text("name", "   ");
        let err = validate_field(&field).unwrap();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, REQUIRED_MESSAGE);
    }

    #[test]
    fn test_filled_required_field_passes() {
        let field = FormField::required_text("name", "Ada");
        assert!(validate_field(&field).is_none());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_blank_email_reports_required_only() {
        let field = FormField::required_email("email", "");
        let err = validate_field(&field).unwrap();
        assert_eq!(err.message, REQUIRED_MESSAGE);
    }

    #[test]
    fn test_malformed_email() {
        let field = FormField::required_email("email", "nope");
        let err = validate_field(&field).unwrap();
        assert_eq!(err.message, INVALID_EMAIL_MESSAGE);
    }

    #[test]
    fn test_optional_email_left_blank_passes() {
        let field = FormField {
            name: "email".to_string(),
            kind: FieldKind::Email,
            required: false,
            value: String::new(),
        };
        assert!(validate_field(&field).is_none());
    }

    #[test]
    fn test_form_errors_in_field_order() {
        let fields = [
            FormField::required_text("name", ""),
            FormField::required_email("email", "bad"),
            FormField::required_text("message", "hello"),
        ];
        let errors = validate_form(&fields);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "email");
    }
}
