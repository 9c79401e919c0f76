//! A generic form described by a JSON document.

use crate::error::FormError;
use crate::message::Message;
use crate::registry::{Validator, ValidatorRegistry};
use crate::types::{EditField, FieldRole, SaveStatus, SavedField, SavedForm};
use crate::validator::FieldRules;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A form document: a tag, a title and an ordered list of fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    pub tag: String,
    #[serde(default)]
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

/// Declaration of one field in a [`FormDefinition`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    pub label: String,
    pub value: String,
    pub help: String,
    pub hint: String,
    pub choices: Vec<String>,
    pub multiline: bool,
    pub width: u16,
    pub role: FieldRole,
    pub required: bool,
    /// The value must be one of `choices`.
    pub restrict: bool,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
}

/// A form built from a [`FormDefinition`], editable through [`Message`].
#[derive(Debug, Clone)]
pub struct Form {
    tag: String,
    title: String,
    fields: Vec<EditField>,
    rules: Vec<FieldRules>,
    committed: Vec<String>,
    validator: Option<Validator>,
}

impl Form {
    /// Build a form, resolving its cross-field validator from `registry`.
    pub fn new(definition: FormDefinition, registry: &ValidatorRegistry) -> Result<Self, FormError> {
        if definition.fields.is_empty() {
            return Err(FormError::Empty(definition.tag));
        }
        check_unique_role(&definition.fields, FieldRole::MessageId)?;
        check_unique_role(&definition.fields, FieldRole::Destination)?;

        let rules = definition
            .fields
            .iter()
            .map(FieldRules::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let fields: Vec<EditField> = definition
            .fields
            .into_iter()
            .map(|spec| EditField {
                label: spec.label,
                value: spec.value,
                help: spec.help,
                hint: spec.hint,
                choices: spec.choices,
                multiline: spec.multiline,
                width: spec.width,
                problem: String::new(),
                role: spec.role,
            })
            .collect();

        let validator = registry.get(&definition.tag);
        debug!(
            tag = %definition.tag,
            fields = fields.len(),
            validator = validator.is_some(),
            "built form"
        );

        let mut form = Self {
            committed: vec![String::new(); fields.len()],
            tag: definition.tag,
            title: definition.title,
            fields,
            rules,
            validator,
        };
        form.apply_edits();
        Ok(form)
    }

    /// Parse a JSON form document and build the form.
    pub fn from_json(json: &str, registry: &ValidatorRegistry) -> Result<Self, FormError> {
        let definition: FormDefinition = serde_json::from_str(json)?;
        Self::new(definition, registry)
    }

    /// Display title (falls back to the tag).
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.tag
        } else {
            &self.title
        }
    }

    /// The committed values, in field order.
    pub fn values(&self) -> &[String] {
        &self.committed
    }

    /// Check whether any field has a problem.
    pub fn has_problems(&self) -> bool {
        self.fields.iter().any(EditField::has_problem)
    }

    /// Snapshot the committed values for saving.
    pub fn to_saved(&self, status: SaveStatus) -> SavedForm {
        SavedForm {
            tag: self.tag.clone(),
            status,
            fields: self
                .fields
                .iter()
                .zip(&self.committed)
                .map(|(f, v)| SavedField {
                    label: f.label.clone(),
                    value: v.clone(),
                })
                .collect(),
        }
    }
}

impl Message for Form {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn edit_fields(&self) -> &[EditField] {
        &self.fields
    }

    fn edit_fields_mut(&mut self) -> &mut [EditField] {
        &mut self.fields
    }

    fn apply_edits(&mut self) {
        for ((field, rules), committed) in self
            .fields
            .iter_mut()
            .zip(&self.rules)
            .zip(self.committed.iter_mut())
        {
            // Choices are stored in their declared spelling.
            *committed = match field.matching_choice(&field.value) {
                Some(choice) => choice.to_string(),
                None => field.value.clone(),
            };
            field.problem = rules.check(&field.value, &field.choices);
        }
        if let Some(validator) = self.validator {
            validator(&mut self.fields);
        }
    }
}

fn check_unique_role(fields: &[FieldSpec], role: FieldRole) -> Result<(), FormError> {
    if fields.iter().filter(|f| f.role == role).count() > 1 {
        return Err(FormError::DuplicateRole(format!("{role:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "tag": "general-message",
        "title": "General Message",
        "fields": [
            {"label": "Msg #", "role": "message_id", "required": true, "pattern": "^[A-Z0-9]{3}-\\d+$"},
            {"label": "To", "role": "destination", "required": true},
            {"label": "Handling", "choices": ["ROUTINE", "PRIORITY"], "restrict": true},
            {"label": "Reply", "choices": ["Yes", "No"]},
            {"label": "Reply By"},
            {"label": "Message", "multiline": true, "value": "hello"}
        ]
    }"#;

    fn form() -> Form {
        Form::from_json(DOC, &ValidatorRegistry::with_builtins()).unwrap()
    }

    #[test]
    fn test_initial_validation() {
        let form = form();
        let fields = form.edit_fields();
        assert!(fields[0].has_problem());
        assert!(fields[1].has_problem());
        assert!(!fields[2].has_problem());
        assert_eq!(form.values()[5], "hello");
        assert_eq!(form.title(), "General Message");
    }

    #[test]
    fn test_apply_edits_commits_canonical_choice() {
        let mut form = form();
        form.edit_fields_mut()[2].value = "priority".to_string();
        form.apply_edits();
        assert_eq!(form.values()[2], "PRIORITY");
        assert_eq!(form.edit_fields()[2].value, "priority");
        assert!(!form.edit_fields()[2].has_problem());
    }

    #[test]
    fn test_apply_edits_is_idempotent() {
        let mut form = form();
        form.edit_fields_mut()[0].value = "XND-12".to_string();
        form.edit_fields_mut()[3].value = "yes".to_string();
        form.apply_edits();
        let fields = form.edit_fields().to_vec();
        let values = form.values().to_vec();

        form.apply_edits();
        assert_eq!(form.edit_fields(), fields.as_slice());
        assert_eq!(form.values(), values.as_slice());
        assert!(form.edit_fields()[4].has_problem());
    }

    #[test]
    fn test_pattern_problem() {
        let mut form = form();
        form.edit_fields_mut()[0].value = "bad".to_string();
        form.apply_edits();
        assert_eq!(form.edit_fields()[0].problem, "Not in the expected format.");
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let doc = r#"{"tag": "t", "fields": [
            {"label": "A", "role": "destination"},
            {"label": "B", "role": "destination"}
        ]}"#;
        let err = Form::from_json(doc, &ValidatorRegistry::new()).unwrap_err();
        assert!(matches!(err, FormError::DuplicateRole(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let doc = r#"{"tag": "t", "fields": [{"label": "A", "pattern": "("}]}"#;
        let err = Form::from_json(doc, &ValidatorRegistry::new()).unwrap_err();
        assert!(matches!(err, FormError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_form_rejected() {
        let err = Form::from_json(r#"{"tag": "t", "fields": []}"#, &ValidatorRegistry::new())
            .unwrap_err();
        assert!(matches!(err, FormError::Empty(_)));
    }

    #[test]
    fn test_to_saved() {
        let form = form();
        let saved = form.to_saved(SaveStatus::Draft);
        assert_eq!(saved.tag, "general-message");
        assert_eq!(saved.fields.len(), 6);
        assert_eq!(saved.fields[5].value, "hello");
    }
}
