//! The editing panel: a header bar over a scrollable column of field
//! controls.
//!
//! Controls draw into an off-screen [`Compositor`] as tall as all of their
//! rows; each frame the panel copies the window starting at `scroll` onto
//! the real surface. Scroll follows the focused control's cursor ("strict")
//! unless the user has scrolled with the mouse wheel ("loose").

use crate::components::{
    ControlOutcome, EditorAction, FieldControl, Finish, FocusEntry, HeaderBar, Trigger,
};
use crate::compositor::Compositor;
use crate::config::EditorConfig;
use crate::surface::Surface;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use formedit_forms::{FieldRole, Message};
use ratatui::layout::{Position, Rect};
use std::rc::Rc;
use tracing::debug;

/// Longest label column the panel will reserve, as a fraction of the width.
const MAX_LABEL_SHARE: u16 = 3;

/// Something the panel needs its owner to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRequest {
    /// Show help for the selected field.
    Help,
    /// Save as draft.
    Draft,
    /// Save ready to send.
    Send,
    /// Clipboard work.
    Clipboard(EditorAction),
}

pub struct EditPanel<M: Message> {
    message: M,
    theme: Rc<Theme>,
    wheel_step: u16,
    controls: Vec<FieldControl>,
    /// Start row of each control plus the total, `controls.len() + 1` long.
    offsets: Vec<u16>,
    scroll: u16,
    selected: usize,
    loose: bool,
    header: HeaderBar,
    canvas: Compositor,
    label_width: u16,
    send_ready: bool,
    /// False while a modal dialog holds the focus.
    active: bool,
    /// Field window of the last draw, in surface coordinates.
    viewport: Rect,
}

impl<M: Message> EditPanel<M> {
    pub fn new(message: M, title: &str, theme: Rc<Theme>, config: &EditorConfig) -> Self {
        let controls = message
            .edit_fields()
            .iter()
            .map(|field| FieldControl::for_field(field, theme.clone(), config))
            .collect();
        let header = HeaderBar::new(theme.clone(), title)
            .with_button(Trigger::Escape, "Save Draft")
            .with_button(Trigger::Send, "Send");
        let mut panel = Self {
            message,
            theme,
            wheel_step: config.wheel_step.max(1),
            controls,
            offsets: Vec::new(),
            scroll: 0,
            selected: 0,
            loose: false,
            header,
            canvas: Compositor::default(),
            label_width: 0,
            send_ready: false,
            active: true,
            viewport: Rect::default(),
        };
        let fields = panel.message.edit_fields();
        for (control, field) in panel.controls.iter_mut().zip(fields) {
            control.prepare(field);
        }
        if let (Some(control), Some(field)) = (panel.controls.first_mut(), fields.first()) {
            control.focus(field, FocusEntry::Forward);
        }
        panel.update_readiness();
        panel
    }

    pub fn message(&self) -> &M {
        &self.message
    }

    pub fn into_message(self) -> M {
        self.message
    }

    pub fn field_count(&self) -> usize {
        self.controls.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn is_loose(&self) -> bool {
        self.loose
    }

    pub fn total_rows(&self) -> u16 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// First canvas row of field `index`, as of the last layout.
    pub fn field_start(&self, index: usize) -> Option<u16> {
        if index < self.controls.len() {
            self.offsets.get(index).copied()
        } else {
            None
        }
    }

    /// Whether the distinguished fields allow sending.
    pub fn send_ready(&self) -> bool {
        self.send_ready
    }

    /// Mark whether the panel holds the focus; the cursor is hidden while it
    /// does not. Focus state of the controls is left untouched.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether any field reports a problem.
    pub fn has_problems(&self) -> bool {
        self.message.edit_fields().iter().any(|f| f.has_problem())
    }

    /// Index of the first distinguished field that blocks sending.
    pub fn first_blocking_field(&self) -> Option<usize> {
        self.message
            .edit_fields()
            .iter()
            .position(|f| {
                matches!(f.role, FieldRole::MessageId | FieldRole::Destination) && f.has_problem()
            })
    }

    fn update_readiness(&mut self) {
        let clean = |role| {
            self.message
                .field_with_role(role)
                .is_some_and(|(_, field)| !field.has_problem())
        };
        let ready = clean(FieldRole::MessageId) && clean(FieldRole::Destination);
        if ready != self.send_ready {
            debug!(ready, "send readiness changed");
        }
        self.send_ready = ready;
        self.header.set_enabled(Trigger::Send, ready);
    }

    /// Push the selected control's value into the record and re-validate.
    fn commit(&mut self) {
        if let Some(field) = self.message.edit_fields_mut().get_mut(self.selected) {
            self.controls[self.selected].commit(field);
        }
        self.message.apply_edits();
        self.update_readiness();
    }

    /// Move the focus to field `index`.
    pub fn focus_field(&mut self, index: usize, entry: FocusEntry) {
        if index >= self.controls.len() {
            return;
        }
        self.commit();
        self.controls[self.selected].blur();
        self.selected = index;
        let field = &self.message.edit_fields()[index];
        self.controls[index].focus(field, entry);
        self.loose = false;
        debug!(index, label = %field.label, "focus");
    }

    fn finish(&mut self, finish: Finish) -> Option<PanelRequest> {
        self.commit();
        let n = self.controls.len();
        match finish {
            Finish::Next => {
                self.focus_field((self.selected + 1) % n, FocusEntry::Forward);
                None
            }
            Finish::Previous => {
                self.focus_field((self.selected + n - 1) % n, FocusEntry::Backward);
                None
            }
            Finish::Draft => Some(PanelRequest::Draft),
            Finish::Send => Some(PanelRequest::Send),
        }
    }

    fn trigger(&mut self, trigger: Trigger) -> Option<PanelRequest> {
        match trigger {
            Trigger::Escape => self.finish(Finish::Draft),
            Trigger::Send => self.finish(Finish::Send),
            Trigger::Char(_) => None,
        }
    }

    fn outcome(&mut self, outcome: ControlOutcome) -> Option<PanelRequest> {
        match outcome {
            ControlOutcome::Ignored | ControlOutcome::Handled => None,
            ControlOutcome::Changed => {
                self.commit();
                None
            }
            ControlOutcome::Finished(finish) => self.finish(finish),
            ControlOutcome::Action(action) => {
                if matches!(action, EditorAction::Cut(_)) {
                    self.commit();
                }
                Some(PanelRequest::Clipboard(action))
            }
            ControlOutcome::Help => Some(PanelRequest::Help),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PanelRequest> {
        if self.controls.is_empty() {
            return None;
        }
        self.loose = false;
        let plain = key.modifiers == KeyModifiers::NONE;
        match key.code {
            KeyCode::F(1) => return Some(PanelRequest::Help),
            KeyCode::PageUp if plain => {
                self.page(false);
                return None;
            }
            KeyCode::PageDown if plain => {
                self.page(true);
                return None;
            }
            _ => {}
        }

        let field = &mut self.message.edit_fields_mut()[self.selected];
        let outcome = self.controls[self.selected].handle_key(field, key);
        if outcome == ControlOutcome::Ignored {
            return self.header.handle_key(&key).and_then(|t| self.trigger(t));
        }
        self.outcome(outcome)
    }

    /// Focus the first field a viewport-height below (or above) the
    /// selected one, stopping at the last (or first) field.
    fn page(&mut self, down: bool) {
        if self.offsets.len() != self.controls.len() + 1 {
            return;
        }
        let start = self.offsets[self.selected];
        let height = self.viewport.height.max(1);
        let last = self.controls.len() - 1;
        let target = if down {
            let row = start.saturating_add(height);
            (self.selected + 1..=last)
                .find(|&i| self.offsets[i] >= row)
                .unwrap_or(last)
        } else {
            let row = start.saturating_sub(height);
            (0..self.selected)
                .rev()
                .find(|&i| self.offsets[i] <= row)
                .unwrap_or(0)
        };
        if target != self.selected {
            let entry = if down {
                FocusEntry::Forward
            } else {
                FocusEntry::Backward
            };
            self.focus_field(target, entry);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<PanelRequest> {
        if self.controls.is_empty() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.loose = true;
                self.scroll = self.scroll.saturating_sub(self.wheel_step);
                None
            }
            MouseEventKind::ScrollDown => {
                self.loose = true;
                self.scroll = self
                    .scroll
                    .saturating_add(self.wheel_step)
                    .min(self.max_scroll());
                None
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => None,
        }
    }

    fn click(&mut self, column: u16, row: u16) -> Option<PanelRequest> {
        if let Some(trigger) = self.header.handle_click(column, row) {
            return self.trigger(trigger);
        }
        if !self.viewport.contains(Position::new(column, row)) {
            return None;
        }
        let x = column - self.viewport.x;
        let y = row - self.viewport.y + self.scroll;
        let index = (0..self.controls.len())
            .find(|&i| y >= self.offsets[i] && y < self.offsets[i + 1])?;
        if index != self.selected {
            self.focus_field(index, FocusEntry::Pointer);
        }
        self.loose = false;
        let field = &mut self.message.edit_fields_mut()[index];
        let outcome = self.controls[index].handle_click(field, x, y - self.offsets[index]);
        self.outcome(outcome)
    }

    /// Paste clipboard text into the selected field.
    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.message.edit_fields_mut().get_mut(self.selected) {
            self.controls[self.selected].paste(field, text);
            self.commit();
        }
    }

    fn max_scroll(&self) -> u16 {
        self.total_rows().saturating_sub(self.viewport.height)
    }

    fn layout(&mut self, width: u16) {
        let fields = self.message.edit_fields();
        let longest = fields
            .iter()
            .filter(|f| !f.multiline)
            .map(|f| f.label.chars().count() as u16)
            .max()
            .unwrap_or(0);
        self.label_width = longest.min(width / MAX_LABEL_SHARE);

        self.offsets.clear();
        self.offsets.push(0);
        let mut total = 0u16;
        for (control, field) in self.controls.iter_mut().zip(fields) {
            control.prepare(field);
            total = total.saturating_add(control.rows(field, width, self.label_width));
            self.offsets.push(total);
        }
    }

    fn reconcile_scroll(&mut self, width: u16, height: u16) {
        if !self.loose && height > 0 {
            let field = &self.message.edit_fields()[self.selected];
            let control = &self.controls[self.selected];
            let start = self.offsets[self.selected];
            let line = start + control.cursor_row(field, width, self.label_width);
            if line < self.scroll {
                self.scroll = line;
            } else if line >= self.scroll + height {
                self.scroll = line + 1 - height;
            }
            // Keep the control's first row in view along with the cursor
            // line; a stacked input in a one-row window shows its label.
            if line - start < height {
                self.scroll = self.scroll.min(start);
            } else if matches!(control, FieldControl::Input(_)) {
                self.scroll = start;
            }
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// On-screen rows of the selected control, clipped to the field window.
    pub fn selected_area(&self) -> Rect {
        let (Some(&start), Some(&end)) = (
            self.offsets.get(self.selected),
            self.offsets.get(self.selected + 1),
        ) else {
            return Rect::new(self.viewport.x, self.viewport.y, self.viewport.width, 1);
        };
        let top = start.max(self.scroll);
        let bottom = end.min(self.scroll + self.viewport.height);
        if top >= bottom {
            return Rect::new(self.viewport.x, self.viewport.y, self.viewport.width, 1);
        }
        Rect::new(
            self.viewport.x,
            self.viewport.y + (top - self.scroll),
            self.viewport.width,
            bottom - top,
        )
    }

    /// Draw the header on the first row of `area` and the fields below it.
    pub fn draw(&mut self, surface: &mut dyn Surface, area: Rect) {
        surface.hide_cursor();
        if self.controls.is_empty() || area.height == 0 {
            return;
        }
        self.header.draw(surface, area);
        self.viewport = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(1),
        );
        let viewport = self.viewport;
        surface.fill(viewport, ' ', self.theme.text());
        if viewport.is_empty() {
            return;
        }

        self.layout(viewport.width);
        self.reconcile_scroll(viewport.width, viewport.height);

        self.canvas.set_size(viewport.width, self.total_rows());
        self.canvas.clear();
        let fields = self.message.edit_fields();
        for (i, (control, field)) in self.controls.iter_mut().zip(fields).enumerate() {
            let rows = Rect::new(
                0,
                self.offsets[i],
                viewport.width,
                self.offsets[i + 1] - self.offsets[i],
            );
            control.draw(field, &mut self.canvas, rows, self.label_width);
        }

        let source = Rect::new(0, self.scroll, viewport.width, viewport.height);
        let dest = Position::new(viewport.x, viewport.y);
        self.canvas.copy(source, dest, surface);
        if self.active {
            if let Some(cursor) = self.canvas.translate_cursor(source, dest) {
                surface.show_cursor(cursor.x, cursor.y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formedit_forms::EditField;

    /// A bare record for exercising the panel.
    struct Record {
        fields: Vec<EditField>,
        applied: usize,
    }

    impl Record {
        fn new(fields: Vec<EditField>) -> Self {
            Self { fields, applied: 0 }
        }
    }

    impl Message for Record {
        fn tag(&self) -> &str {
            "record"
        }

        fn edit_fields(&self) -> &[EditField] {
            &self.fields
        }

        fn edit_fields_mut(&mut self) -> &mut [EditField] {
            &mut self.fields
        }

        fn apply_edits(&mut self) {
            self.applied += 1;
            for field in &mut self.fields {
                field.problem = match field.role {
                    FieldRole::Ordinary => String::new(),
                    _ if field.value.is_empty() => "Required.".to_string(),
                    _ => String::new(),
                };
            }
        }
    }

    fn panel(fields: Vec<EditField>) -> EditPanel<Record> {
        let mut record = Record::new(fields);
        record.apply_edits();
        EditPanel::new(
            record,
            "Test",
            Rc::new(Theme::default()),
            &EditorConfig::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn numbered(n: usize) -> Vec<EditField> {
        (0..n).map(|i| EditField::new(format!("F{i}"))).collect()
    }

    #[test]
    fn test_tab_wraps_both_ways() {
        let mut panel = panel(numbered(3));
        assert_eq!(panel.selected(), 0);
        panel.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(panel.selected(), 2);
        panel.handle_key(key(KeyCode::Tab));
        assert_eq!(panel.selected(), 0);
        panel.handle_key(key(KeyCode::Tab));
        assert_eq!(panel.selected(), 1);
    }

    #[test]
    fn test_strict_scroll_follows_multiline_cursor() {
        let mut fields = numbered(15);
        fields.push(EditField::new("Body").multiline().with_value("a\nb"));
        fields.push(EditField::new("Last"));
        let mut panel = panel(fields);
        let mut screen = Compositor::new(40, 11);

        panel.focus_field(15, FocusEntry::Forward);
        panel.handle_key(key(KeyCode::Down));
        panel.draw(&mut screen, Rect::new(0, 0, 40, 11));

        assert_eq!(panel.total_rows(), 20);
        assert_eq!(panel.scroll(), 8);
    }

    #[test]
    fn test_scroll_clamped_after_draw() {
        let mut panel = panel(numbered(5));
        let mut screen = Compositor::new(40, 11);
        panel.handle_mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        panel.draw(&mut screen, Rect::new(0, 0, 40, 11));
        assert_eq!(panel.scroll(), 0);
        assert!(panel.is_loose());
    }

    #[test]
    fn test_wheel_is_loose_and_keys_are_strict() {
        let mut panel = panel(numbered(30));
        let mut screen = Compositor::new(40, 11);
        panel.draw(&mut screen, Rect::new(0, 0, 40, 11));

        for _ in 0..5 {
            panel.handle_mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 5,
                modifiers: KeyModifiers::NONE,
            });
        }
        panel.draw(&mut screen, Rect::new(0, 0, 40, 11));
        assert_eq!(panel.scroll(), 5, "selected field may leave the view");
        assert_eq!(panel.selected(), 0);

        panel.handle_key(key(KeyCode::Tab));
        panel.draw(&mut screen, Rect::new(0, 0, 40, 11));
        assert!(!panel.is_loose());
        assert_eq!(panel.scroll(), 1);
    }

    #[test]
    fn test_click_focuses_field_under_pointer() {
        let mut panel = panel(numbered(30));
        let mut screen = Compositor::new(40, 11);
        panel.draw(&mut screen, Rect::new(0, 0, 40, 11));

        // Header on row 0, field 3 on row 4.
        panel.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 20,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(panel.selected(), 3);
    }

    #[test]
    fn test_page_down_moves_a_viewport() {
        let mut panel = panel(numbered(30));
        let mut screen = Compositor::new(40, 11);
        panel.draw(&mut screen, Rect::new(0, 0, 40, 11));
        panel.handle_key(key(KeyCode::PageDown));
        assert_eq!(panel.selected(), 10);
        panel.handle_key(key(KeyCode::PageUp));
        assert_eq!(panel.selected(), 0);
    }

    #[test]
    fn test_readiness_follows_roles() {
        let fields = vec![
            EditField::new("Msg Id").with_role(FieldRole::MessageId),
            EditField::new("To").with_role(FieldRole::Destination),
        ];
        let mut panel = panel(fields);
        assert!(!panel.send_ready());
        assert_eq!(panel.first_blocking_field(), Some(0));

        panel.handle_key(key(KeyCode::Char('1')));
        panel.handle_key(key(KeyCode::Tab));
        panel.handle_key(key(KeyCode::Char('X')));
        assert!(panel.send_ready());
        assert_eq!(panel.first_blocking_field(), None);
    }

    #[test]
    fn test_missing_role_is_never_ready() {
        let panel = panel(vec![EditField::new("To").with_role(FieldRole::Destination)]);
        assert!(!panel.send_ready());
    }

    #[test]
    fn test_escape_and_f10_commit_and_request() {
        let mut panel = panel(numbered(2));
        let before = panel.message().applied;
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Some(PanelRequest::Draft));
        assert_eq!(panel.selected(), 0);
        assert_eq!(panel.handle_key(key(KeyCode::F(10))), Some(PanelRequest::Send));
        assert!(panel.message().applied > before);
    }

    #[test]
    fn test_zero_fields_render_nothing() {
        let mut panel = panel(Vec::new());
        let mut screen = Compositor::new(10, 3);
        panel.draw(&mut screen, Rect::new(0, 0, 10, 3));
        assert_eq!(screen.content(0, 0).map(|c| c.0), Some(' '));
        assert_eq!(panel.handle_key(key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_draw_places_cursor_through_window() {
        let mut panel = panel(numbered(3));
        let mut screen = Compositor::new(40, 5);
        panel.handle_key(key(KeyCode::Tab));
        panel.draw(&mut screen, Rect::new(0, 0, 40, 5));
        // Labels are 2 wide: box at column 3 of row 1 + header.
        assert_eq!(screen.cursor(), Some(Position::new(3, 2)));

        panel.set_active(false);
        panel.draw(&mut screen, Rect::new(0, 0, 40, 5));
        assert!(screen.cursor().is_none());
    }

    #[test]
    fn test_one_row_window_shows_stacked_label() {
        // Too narrow for an inline box: every input takes two rows.
        let mut panel = panel(numbered(3));
        let mut screen = Compositor::new(10, 2);
        panel.handle_key(key(KeyCode::Tab));
        panel.draw(&mut screen, Rect::new(0, 0, 10, 2));

        assert_eq!(panel.total_rows(), 6);
        assert_eq!(panel.field_start(1), Some(2));
        assert_eq!(panel.scroll(), 2);
        assert_eq!(screen.content(0, 1).map(|c| c.0), Some('F'));
    }

    #[test]
    fn test_scrolling_up_keeps_stacked_label_visible() {
        let mut panel = panel(numbered(4));
        let mut screen = Compositor::new(10, 4);
        panel.focus_field(3, FocusEntry::Forward);
        panel.draw(&mut screen, Rect::new(0, 0, 10, 4));
        assert_eq!(panel.scroll(), 5);

        panel.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        panel.draw(&mut screen, Rect::new(0, 0, 10, 4));
        assert_eq!(panel.scroll(), 4);
    }
}
