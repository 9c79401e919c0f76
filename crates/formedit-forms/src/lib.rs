//! Editable form records for formedit.
//!
//! This library holds the contracts the terminal editor consumes: the
//! [`EditField`] view of a value, the [`Message`] host trait, a generic
//! JSON-described [`Form`] implementing it, declarative per-field rules and
//! the explicit [`ValidatorRegistry`] for cross-field checks.
//!
//! # Example
//!
//! ```no_run
//! use formedit_forms::{load_form, Message, ValidatorRegistry};
//! use std::path::Path;
//!
//! let registry = ValidatorRegistry::with_builtins();
//! let mut form = load_form(Path::new("general_message.json"), &registry)?;
//!
//! form.edit_fields_mut()[0].value = "XND-101".to_string();
//! form.apply_edits();
//!
//! if form.has_problems() {
//!     eprintln!("form still has problems");
//! }
//! # Ok::<(), formedit_forms::FormError>(())
//! ```

mod error;
mod form;
mod message;
mod registry;
mod types;
mod validator;

use std::path::Path;

pub use error::FormError;
pub use form::{FieldSpec, Form, FormDefinition};
pub use message::Message;
pub use registry::{Validator, ValidatorRegistry, GENERAL_MESSAGE_TAG};
pub use types::{EditField, FieldRole, SaveStatus, SavedField, SavedForm};

// Re-export rule checks for advanced usage
pub use validator::{check_choice, check_max_length, check_pattern, check_required, FieldRules};

/// Load a form document from a JSON file.
pub fn load_form(path: &Path, registry: &ValidatorRegistry) -> Result<Form, FormError> {
    let content = std::fs::read_to_string(path).map_err(|source| FormError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Form::from_json(&content, registry)
}
