//! Editor state: the panel, the modal stack and the final outcome

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::components::{ConfirmChoice, ConfirmDialog, EditorAction, FocusEntry, HelpOverlay};
use crate::config::EditorConfig;
use crate::panel::{EditPanel, PanelRequest};
use crate::surface::Surface;
use crate::theme::Theme;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use formedit_forms::Message;
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a status message stays up.
const STATUS_TTL: Duration = Duration::from_secs(5);

/// How editing ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Draft,
    Send,
}

/// Status message level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A dialog stacked over the panel.
#[derive(Debug)]
pub enum Modal {
    Help(HelpOverlay),
    Confirm(ConfirmDialog),
}

impl Modal {
    fn draw(&mut self, surface: &mut dyn Surface) {
        match self {
            Modal::Help(help) => help.draw(surface),
            Modal::Confirm(confirm) => confirm.draw(surface),
        }
    }
}

/// Top-level coordinator: routes events to the top modal or the panel and
/// acts on the panel's requests.
pub struct Editor<M: Message> {
    panel: EditPanel<M>,
    theme: Rc<Theme>,
    help_width: u16,
    modals: Vec<Modal>,
    outcome: Option<Outcome>,
    pub status_message: Option<(String, StatusLevel, Instant)>,
    clipboard: Box<dyn Clipboard>,
}

impl<M: Message> Editor<M> {
    pub fn new(message: M, title: &str, theme: Theme, config: &EditorConfig) -> Self {
        let theme = Rc::new(theme);
        Self {
            panel: EditPanel::new(message, title, theme.clone(), config),
            theme,
            help_width: config.help_width,
            modals: Vec::new(),
            outcome: None,
            status_message: None,
            clipboard: Box::new(SystemClipboard),
        }
    }

    /// Use another clipboard than the system one.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn panel(&self) -> &EditPanel<M> {
        &self.panel
    }

    pub fn message(&self) -> &M {
        self.panel.message()
    }

    pub fn into_message(self) -> M {
        self.panel.into_message()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modals.last()
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some((message.into(), level, Instant::now()));
    }

    /// Clear status if expired
    pub fn clear_expired_status(&mut self) {
        if let Some((_, _, time)) = &self.status_message {
            if time.elapsed() > STATUS_TTL {
                self.status_message = None;
            }
        }
    }

    fn push_modal(&mut self, modal: Modal) {
        debug!(depth = self.modals.len() + 1, "modal opened");
        self.panel.set_active(false);
        self.modals.push(modal);
    }

    /// Close the top modal; focus goes back to the control that had it.
    fn close_modal(&mut self) {
        self.modals.pop();
        debug!(depth = self.modals.len(), "modal closed");
        if self.modals.is_empty() {
            self.panel.set_active(true);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(?outcome, tag = self.panel.message().tag(), "editing finished");
        self.outcome = Some(outcome);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.modals.last_mut() {
            Some(Modal::Help(help)) => {
                if help.handle_key(&key) {
                    self.close_modal();
                }
            }
            Some(Modal::Confirm(confirm)) => {
                if let Some(choice) = confirm.handle_key(&key) {
                    self.close_modal();
                    self.confirmed(choice);
                }
            }
            None => {
                if let Some(request) = self.panel.handle_key(key) {
                    self.handle_request(request);
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let click = mouse.kind == MouseEventKind::Down(MouseButton::Left);
        match self.modals.last_mut() {
            Some(Modal::Help(help)) => {
                if click && help.handle_click(mouse.column, mouse.row) {
                    self.close_modal();
                }
            }
            Some(Modal::Confirm(confirm)) => {
                if click {
                    if let Some(choice) = confirm.handle_click(mouse.column, mouse.row) {
                        self.close_modal();
                        self.confirmed(choice);
                    }
                }
            }
            None => {
                if let Some(request) = self.panel.handle_mouse(mouse) {
                    self.handle_request(request);
                }
            }
        }
    }

    /// Bracketed paste from the terminal.
    pub fn handle_paste(&mut self, text: &str) {
        if self.modals.is_empty() {
            self.panel.paste(text);
        }
    }

    fn handle_request(&mut self, request: PanelRequest) {
        match request {
            PanelRequest::Help => self.open_help(),
            PanelRequest::Draft => self.finish(Outcome::Draft),
            PanelRequest::Send => self.request_send(),
            PanelRequest::Clipboard(EditorAction::Copy(text) | EditorAction::Cut(text)) => {
                self.copy_to_clipboard(&text)
            }
            PanelRequest::Clipboard(EditorAction::PasteRequest) => self.paste_from_clipboard(),
        }
    }

    fn open_help(&mut self) {
        let Some(field) = self.panel.message().edit_fields().get(self.panel.selected()) else {
            return;
        };
        let help = HelpOverlay::new(
            self.theme.clone(),
            field.label.clone(),
            field.help.clone(),
            self.panel.selected_area(),
            self.help_width,
        );
        self.push_modal(Modal::Help(help));
    }

    /// Send only when the distinguished fields are valid; offer a draft when
    /// other fields still have problems.
    fn request_send(&mut self) {
        if !self.panel.send_ready() {
            warn!("send refused: message id or destination invalid");
            self.set_status(
                "Message id and destination must be valid before sending",
                StatusLevel::Error,
            );
            if let Some(index) = self.panel.first_blocking_field() {
                self.panel.focus_field(index, FocusEntry::Forward);
            }
            return;
        }
        if self.panel.has_problems() {
            let confirm = ConfirmDialog::new(
                self.theme.clone(),
                "Problems found",
                "Some fields still have problems. Save as a draft instead?",
            );
            self.push_modal(Modal::Confirm(confirm));
            return;
        }
        self.finish(Outcome::Send);
    }

    fn confirmed(&mut self, choice: ConfirmChoice) {
        match choice {
            ConfirmChoice::Yes => self.finish(Outcome::Draft),
            ConfirmChoice::No => self.set_status("Send cancelled", StatusLevel::Info),
        }
    }

    /// Copy content to clipboard
    fn copy_to_clipboard(&mut self, content: &str) {
        match self.clipboard.set_text(content) {
            Ok(()) => self.set_status("Copied to clipboard", StatusLevel::Success),
            Err(e) => self.set_status(format!("Failed to copy: {}", e), StatusLevel::Error),
        }
    }

    fn paste_from_clipboard(&mut self) {
        match self.clipboard.get_text() {
            Ok(text) => self.panel.paste(&text),
            Err(e) => self.set_status(e.to_string(), StatusLevel::Warning),
        }
    }

    fn status_style(&self, level: StatusLevel) -> Style {
        let color = match level {
            StatusLevel::Info => self.theme.fg,
            StatusLevel::Success => self.theme.success,
            StatusLevel::Warning => self.theme.warning,
            StatusLevel::Error => self.theme.error,
        };
        Style::default().fg(color)
    }

    /// Transient message if any, else the focused field's problem or hint.
    fn draw_status(&self, surface: &mut dyn Surface, area: Rect) {
        let (text, style) = match &self.status_message {
            Some((message, level, _)) => (message.as_str(), self.status_style(*level)),
            None => match self.panel.message().edit_fields().get(self.panel.selected()) {
                Some(field) if field.has_problem() => (
                    field.problem.as_str(),
                    Style::default().fg(self.theme.problem),
                ),
                Some(field) => (field.hint.as_str(), self.theme.hint()),
                None => ("", self.theme.text()),
            },
        };
        surface.print(area.x + 1, area.y, text, area.width.saturating_sub(1), style);
    }

    /// Draw the panel, the status line on the last row and any modals.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return;
        }
        surface.fill(Rect::new(0, 0, width, height), ' ', self.theme.text());
        self.panel
            .draw(surface, Rect::new(0, 0, width, height.saturating_sub(1)));
        self.draw_status(surface, Rect::new(0, height - 1, width, 1));
        for modal in &mut self.modals {
            modal.draw(surface);
        }
    }
}
