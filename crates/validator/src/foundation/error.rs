//! Error types
//!
//! Two kinds of errors exist:
//!
//! - [`ValidationError`]: an object failed a rule. Carries the rendered report
//!   and the failing member paths. Only produced by the convenience
//!   [`Validator::check`](crate::Validator::check); the engine itself answers
//!   with a [`Status`](crate::foundation::Status).
//! - [`RuleError`]: a rule, locale or configuration could not be built.
//!
//! All string fields use `Cow<'static, str>` so canned codes stay borrowed.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation failure.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::foundation::ValidationError;
///
/// let error = ValidationError::new("rule_failed", "field1 must be greater than 10")
///     .with_field("field1")
///     .with_param("status", "fail");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    pub code: Cow<'static, str>,

    /// Rendered report text.
    pub message: Cow<'static, str>,

    /// First failing member, if any was recorded.
    pub field: Option<Cow<'static, str>>,

    /// Ordered key-value pairs (typically 0-3 params).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Every failing member path, in the order the engine recorded them.
    pub failed_members: Vec<String>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            failed_members: Vec::new(),
        }
    }

    /// Error raised by [`Validator::check`](crate::Validator::check) on `Fail`.
    pub fn rule_failed(report: impl Into<Cow<'static, str>>, failed_members: Vec<String>) -> Self {
        let field = failed_members.first().cloned().map(Cow::Owned);
        Self {
            field,
            failed_members,
            ..Self::new("rule_failed", report)
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if the given dotted member path failed.
    #[must_use]
    pub fn is_member_failed(&self, path: &str) -> bool {
        self.failed_members.iter().any(|m| m == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// RULE ERROR
// ============================================================================

/// Errors raised while building rules, locales or configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// A member binding was given an empty path.
    #[error("member path must not be empty")]
    EmptyPath,

    /// JSON for a locale or configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A grammar category name is not known.
    #[error("unknown grammar category '{0}'")]
    UnknownGrammar(String),

    /// An environment variable holds an unsupported value.
    #[error("invalid value '{value}' for {variable}")]
    InvalidEnv {
        variable: &'static str,
        value: String,
    },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_params() {
        let error = ValidationError::new("min", "Too small")
            .with_param("min", "5")
            .with_param("actual", "3");

        assert_eq!(error.param("min"), Some("5"));
        assert_eq!(error.param("actual"), Some("3"));
        assert_eq!(error.param("max"), None);
    }

    #[test]
    fn test_rule_failed_takes_first_member_as_field() {
        let error = ValidationError::rule_failed(
            "field1 must be greater than 10",
            vec!["field1".into(), "field2".into()],
        );
        assert_eq!(error.code, "rule_failed");
        assert_eq!(error.field.as_deref(), Some("field1"));
        assert!(error.is_member_failed("field2"));
        assert_eq!(
            error.to_string(),
            "[field1] rule_failed: field1 must be greater than 10"
        );
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::new("required", "This field is required");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_rule_error_display() {
        assert_eq!(
            RuleError::UnknownGrammar("vocative".into()).to_string(),
            "unknown grammar category 'vocative'"
        );
        assert_eq!(RuleError::EmptyPath.to_string(), "member path must not be empty");
    }
}
