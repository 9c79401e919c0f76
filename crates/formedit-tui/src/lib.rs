//! formedit TUI - terminal editor for structured multi-field forms
//!
//! The engine lays out a column of field controls (single-line inputs with
//! optional choice strips, multi-line text areas) under a header bar,
//! scrolls them inside the terminal viewport, and tracks focus, selection
//! and the help and confirmation dialogs stacked over them.
//!
//! # Example
//!
//! ```no_run
//! use formedit_forms::{load_form, ValidatorRegistry};
//! use formedit_tui::{EditorConfig, Editor, RunOptions, Theme};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = ValidatorRegistry::with_builtins();
//!     let form = load_form(Path::new("forms/general_message.json"), &registry)?;
//!     let title = form.title().to_string();
//!     let config = EditorConfig::default();
//!     let mut editor = Editor::new(form, &title, Theme::default(), &config);
//!     formedit_tui::run(&mut editor, &RunOptions::default()).await?;
//!     println!("{:?}", editor.outcome());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod clipboard;
pub mod components;
pub mod compositor;
pub mod config;
pub mod event;
pub mod panel;
pub mod surface;
pub mod theme;
pub mod ui;

pub use app::{Editor, Outcome, StatusLevel};
pub use config::{ConfigError, EditorConfig};
pub use event::{Event, EventHandler};
pub use surface::{Capabilities, ColorDepth, Surface};
pub use theme::Theme;

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use formedit_forms::Message;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

/// Terminal options for [`run`].
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Tick interval for expiring status messages.
    pub tick_rate: Duration,
    /// Capabilities reported to drawing code; `mouse` also decides whether
    /// mouse capture is enabled.
    pub capabilities: Capabilities,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            capabilities: Capabilities::default(),
        }
    }
}

/// Run the editor until the user saves.
///
/// This function handles terminal setup, runs the main event loop,
/// and restores the terminal on exit.
pub async fn run<M: Message>(editor: &mut Editor<M>, options: &RunOptions) -> anyhow::Result<()> {
    let mouse = options.capabilities.mouse;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the editor
    let result = run_editor(&mut terminal, editor, options).await;

    // Restore terminal
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

/// Main event loop
async fn run_editor<M: Message>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    editor: &mut Editor<M>,
    options: &RunOptions,
) -> anyhow::Result<()> {
    let mut events = EventHandler::new(options.tick_rate);
    info!(tag = editor.message().tag(), "editor started");

    while !editor.is_done() {
        terminal.draw(|f| ui::draw(f, editor, options.capabilities))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => editor.handle_key(key),
            Event::Mouse(mouse) => editor.handle_mouse(mouse),
            Event::Paste(text) => editor.handle_paste(&text),
            Event::Tick => editor.clear_expired_status(),
            Event::Resize(_, _) => {
                // Terminal will auto-redraw
            }
        }
    }

    Ok(())
}
