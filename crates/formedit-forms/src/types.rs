//! Core types shared between the form layer and the editor.

use serde::{Deserialize, Serialize};

/// Special meaning a field carries for readiness gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// No special meaning.
    #[default]
    Ordinary,
    /// The locally assigned message identifier.
    MessageId,
    /// Where the message is going.
    Destination,
}

/// One editable value of a form, as presented to the editor.
///
/// The editor mutates `value` in place and asks the owning [`Message`] to
/// re-validate; `problem` is only ever written by the form layer.
///
/// [`Message`]: crate::Message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditField {
    /// Label shown next to the value.
    pub label: String,
    /// Current value.
    pub value: String,
    /// Longer help text, shown on request.
    pub help: String,
    /// Short hint shown when there is nothing else to show.
    pub hint: String,
    /// Suggested or allowed values, in display order.
    pub choices: Vec<String>,
    /// Whether the value may span several lines.
    pub multiline: bool,
    /// Preferred display width in columns (0 = fill the row).
    pub width: u16,
    /// Validation problem; empty when the value is acceptable.
    pub problem: String,
    /// Readiness role.
    pub role: FieldRole,
}

impl EditField {
    /// Create an empty field with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the hint text.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Set the declared choices.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the field as multi-line.
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Set the preferred display width.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Set the readiness role.
    pub fn with_role(mut self, role: FieldRole) -> Self {
        self.role = role;
        self
    }

    /// Check whether the field currently has a validation problem.
    pub fn has_problem(&self) -> bool {
        !self.problem.is_empty()
    }

    /// Find the declared choice equal to `value`, ignoring ASCII case.
    pub fn matching_choice(&self, value: &str) -> Option<&str> {
        self.choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(value))
            .map(String::as_str)
    }
}

/// How a saved form should be treated by whoever picks it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// Saved for later editing.
    Draft,
    /// Complete and ready to send.
    Ready,
}

impl SaveStatus {
    /// Get the label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Draft => "draft",
            SaveStatus::Ready => "ready",
        }
    }
}

/// A single committed field value in saved output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedField {
    pub label: String,
    pub value: String,
}

/// The committed contents of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedForm {
    pub tag: String,
    pub status: SaveStatus,
    pub fields: Vec<SavedField>,
}
