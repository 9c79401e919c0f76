//! The host contract an editable record fulfils.

use crate::types::{EditField, FieldRole};

/// A record that can be edited field by field.
///
/// The editor only ever sees the record through this trait. It edits the
/// values of [`edit_fields_mut`](Message::edit_fields_mut) in place and calls
/// [`apply_edits`](Message::apply_edits) after each change so the record can
/// take the values over and refresh every field's `problem`.
pub trait Message {
    /// Message-type tag (used to pick the validator).
    fn tag(&self) -> &str;

    /// The editable fields, in display order.
    fn edit_fields(&self) -> &[EditField];

    /// Mutable access to the editable fields.
    fn edit_fields_mut(&mut self) -> &mut [EditField];

    /// Commit pending field values into the record and re-validate.
    ///
    /// Must be idempotent: calling it again without intervening edits leaves
    /// values and problems unchanged.
    fn apply_edits(&mut self);

    /// Find the first field with the given role.
    fn field_with_role(&self, role: FieldRole) -> Option<(usize, &EditField)> {
        self.edit_fields()
            .iter()
            .enumerate()
            .find(|(_, f)| f.role == role)
    }
}
