//! Frame rendering for the TUI

use crate::app::Editor;
use crate::surface::{BufferSurface, Capabilities};
use formedit_forms::Message;
use ratatui::Frame;

/// Main draw function
pub fn draw<M: Message>(frame: &mut Frame, editor: &mut Editor<M>, capabilities: Capabilities) {
    let mut surface = BufferSurface::new(frame.buffer_mut(), capabilities);
    editor.draw(&mut surface);
    if let Some(cursor) = surface.cursor() {
        frame.set_cursor_position(cursor);
    }
}
