//! Declarative per-field rules.
//!
//! Each rule checks one value and reports the first problem it finds as a
//! human-readable string. Cross-field rules live in the
//! [`ValidatorRegistry`](crate::ValidatorRegistry).

use crate::error::FormError;
use crate::form::FieldSpec;
use regex::Regex;

/// Compiled rules for one field.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    pub required: bool,
    pub restrict: bool,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
}

impl FieldRules {
    /// Compile the rules declared by a field spec.
    pub fn compile(spec: &FieldSpec) -> Result<Self, FormError> {
        let pattern = match &spec.pattern {
            Some(p) => Some(Regex::new(p).map_err(|source| FormError::InvalidPattern {
                field: spec.label.clone(),
                source,
            })?),
            None => None,
        };

        Ok(Self {
            required: spec.required,
            restrict: spec.restrict,
            max_length: spec.max_length,
            pattern,
        })
    }

    /// Check a value, returning the problem text (empty when valid).
    pub fn check(&self, value: &str, choices: &[String]) -> String {
        check_required(self.required, value)
            .or_else(|| check_choice(self.restrict, value, choices))
            .or_else(|| check_max_length(self.max_length, value))
            .or_else(|| check_pattern(self.pattern.as_ref(), value))
            .unwrap_or_default()
    }
}

/// A required value must contain something other than whitespace.
pub fn check_required(required: bool, value: &str) -> Option<String> {
    if required && value.trim().is_empty() {
        Some("This field is required.".to_string())
    } else {
        None
    }
}

/// A restricted value must be empty or one of the choices (ignoring case).
pub fn check_choice(restrict: bool, value: &str, choices: &[String]) -> Option<String> {
    if !restrict || value.is_empty() || choices.is_empty() {
        return None;
    }
    if choices.iter().any(|c| c.eq_ignore_ascii_case(value)) {
        None
    } else {
        Some(format!("Must be one of: {}.", choices.join(", ")))
    }
}

/// Values are measured in characters, not bytes.
pub fn check_max_length(max: Option<usize>, value: &str) -> Option<String> {
    let max = max?;
    let len = value.chars().count();
    if len > max {
        Some(format!("Too long ({len} characters, at most {max})."))
    } else {
        None
    }
}

/// Empty values are not pattern-checked; `required` covers them.
pub fn check_pattern(pattern: Option<&Regex>, value: &str) -> Option<String> {
    let pattern = pattern?;
    if value.is_empty() || pattern.is_match(value) {
        None
    } else {
        Some("Not in the expected format.".to_string())
    }
}
