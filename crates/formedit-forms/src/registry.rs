//! Explicit mapping from message-type tag to cross-field validator.
//!
//! Validators are plain functions registered once at startup. A form looks
//! its validator up by tag when it is built and runs it after the per-field
//! rules on every [`apply_edits`](crate::Message::apply_edits).

use crate::types::EditField;
use std::collections::HashMap;
use tracing::debug;

/// A cross-field validation function.
///
/// Called after the per-field rules ran; it may set `problem` on any field
/// and should leave fields that already have a problem alone.
pub type Validator = fn(&mut [EditField]);

/// Registry of validators keyed by message-type tag.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Validator>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in validators registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(GENERAL_MESSAGE_TAG, validate_general_message);
        registry
    }

    /// Register (or replace) the validator for a tag.
    pub fn register(&mut self, tag: impl Into<String>, validator: Validator) {
        let tag = tag.into();
        debug!(tag = %tag, "registered validator");
        self.validators.insert(tag, validator);
    }

    /// Look up the validator for a tag.
    pub fn get(&self, tag: &str) -> Option<Validator> {
        self.validators.get(tag).copied()
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Tag of the general message form shipped with the editor.
pub const GENERAL_MESSAGE_TAG: &str = "general-message";

/// A reply deadline is needed once a reply has been requested.
fn validate_general_message(fields: &mut [EditField]) {
    let wants_reply = fields
        .iter()
        .find(|f| f.label == "Reply")
        .is_some_and(|f| f.value.eq_ignore_ascii_case("yes"));

    if let Some(reply_by) = fields.iter_mut().find(|f| f.label == "Reply By") {
        if wants_reply && reply_by.value.trim().is_empty() && reply_by.problem.is_empty() {
            reply_by.problem = "Required when a reply is requested.".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark_all(fields: &mut [EditField]) {
        for f in fields {
            f.problem = "marked".to_string();
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ValidatorRegistry::new();
        assert!(registry.is_empty());
        registry.register("test", mark_all);
        assert_eq!(registry.len(), 1);

        let validator = registry.get("test").unwrap();
        let mut fields = vec![EditField::new("A")];
        validator(&mut fields);
        assert_eq!(fields[0].problem, "marked");
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_general_message_reply_by() {
        let validator = ValidatorRegistry::with_builtins()
            .get(GENERAL_MESSAGE_TAG)
            .unwrap();

        let mut fields = vec![
            EditField::new("Reply").with_value("Yes"),
            EditField::new("Reply By"),
        ];
        validator(&mut fields);
        assert!(fields[1].has_problem());

        fields[0].value = "No".to_string();
        fields[1].problem.clear();
        validator(&mut fields);
        assert!(!fields[1].has_problem());
    }
}
