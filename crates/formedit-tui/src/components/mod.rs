//! Reusable UI components
//!
//! - `InputField` / `MultilineField` - the two field controls, wrapped by
//!   `FieldControl`
//! - `TextEditor` - the multi-line text widget inside `MultilineField`
//! - `HeaderBar` - title and button strip
//! - `HelpOverlay` / `ConfirmDialog` - the modal dialogs

mod confirm;
mod control;
mod header;
mod help;
mod input;
mod multiline;
mod text_editor;

pub use confirm::{centered, ConfirmChoice, ConfirmDialog};
pub use control::{finish_key, ControlOutcome, FieldControl, Finish, FocusEntry};
pub use header::{HeaderBar, Trigger};
pub use help::{placement, HelpOverlay};
pub use input::InputField;
pub use multiline::MultilineField;
pub use text_editor::{EditorAction, Position, TextEditor};
