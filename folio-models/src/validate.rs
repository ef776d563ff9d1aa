//! Input validation helpers.
//!
//! Validation accumulates every violated constraint into a
//! [`ValidationErrors`] collection before failing, so a submission with a
//! missing name and an overlong message reports both problems at once.

use lazy_static::lazy_static;
use regex::Regex;

use folio_core::error::{FieldError, FolioError};

lazy_static! {
    /// Standard email syntax: local part, "@", domain with at least one dot.
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex");
}

/// Accumulator for violated input constraints.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation on a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The violations recorded so far.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Ok when nothing was recorded, otherwise the full violation list.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FolioError {
    fn from(v: ValidationErrors) -> Self {
        FolioError::Validation(v.errors)
    }
}

/// Check a required string field against `1..=max` character bounds.
pub fn check_length(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.is_empty() {
        errors.push(field, "must not be empty");
    } else if value.chars().count() > max {
        errors.push(field, format!("must be at most {max} characters"));
    }
}

/// Check an optional string field against `1..=max` bounds when supplied.
pub fn check_length_opt(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(v) = value {
        check_length(errors, field, v, max);
    }
}

/// Check a sequence field against `min..=max` entry-count bounds.
pub fn check_items(
    errors: &mut ValidationErrors,
    field: &str,
    count: usize,
    min: usize,
    max: usize,
) {
    if count < min {
        errors.push(field, format!("must have at least {min} entries"));
    } else if count > max {
        errors.push(field, format!("must have at most {max} entries"));
    }
}

/// Check that a value matches standard email syntax.
pub fn check_email(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !EMAIL_RE.is_match(value) {
        errors.push(field, "must be a valid email address");
    }
}

/// Check that a value is a member of a closed string set. The error
/// message lists every legal value.
pub fn check_one_of(errors: &mut ValidationErrors, field: &str, value: &str, legal: &[&str]) {
    if !legal.contains(&value) {
        errors.push(field, format!("must be one of: {}", legal.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_every_violation() {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "name", "", 100);
        check_email(&mut errors, "email", "not-an-email");
        check_length(&mut errors, "subject", "hello", 200);
        assert_eq!(errors.len(), 2);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_length_bounds() {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "msg", &"x".repeat(2000), 2000);
        assert!(errors.is_empty());
        check_length(&mut errors, "msg", &"x".repeat(2001), 2000);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_optional_length_skips_absent_fields() {
        let mut errors = ValidationErrors::new();
        check_length_opt(&mut errors, "title", None, 200);
        assert!(errors.is_empty());
        check_length_opt(&mut errors, "title", Some(""), 200);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_email_syntax() {
        let valid = ["a@b.co", "first.last+tag@sub.example.org"];
        let invalid = ["", "plain", "a@b", "@example.com", "a b@example.com"];
        for v in valid {
            let mut errors = ValidationErrors::new();
            check_email(&mut errors, "email", v);
            assert!(errors.is_empty(), "{v} should be accepted");
        }
        for v in invalid {
            let mut errors = ValidationErrors::new();
            check_email(&mut errors, "email", v);
            assert_eq!(errors.len(), 1, "{v} should be rejected");
        }
    }

    #[test]
    fn test_one_of_lists_legal_values() {
        let mut errors = ValidationErrors::new();
        check_one_of(&mut errors, "status", "archived", &["new", "read", "responded"]);
        let message = &errors.errors()[0].message;
        assert!(message.contains("new"));
        assert!(message.contains("read"));
        assert!(message.contains("responded"));
    }

    #[test]
    fn test_item_count_bounds() {
        let mut errors = ValidationErrors::new();
        check_items(&mut errors, "tech_stack", 0, 1, 20);
        check_items(&mut errors, "tags", 11, 0, 10);
        assert_eq!(errors.len(), 2);
    }
}
