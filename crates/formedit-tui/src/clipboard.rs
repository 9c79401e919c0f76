//! Clipboard access.

/// Errors from clipboard access.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard not available: {0}")]
    Unavailable(#[from] arboard::Error),
    #[error("Clipboard is empty")]
    Empty,
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn get_text(&mut self) -> Result<String, ClipboardError>;
}

/// The system clipboard. A handle is opened per operation so a clipboard
/// that appears or disappears while the editor runs is picked up.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        arboard::Clipboard::new()?.set_text(text.to_string())?;
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        let text = arboard::Clipboard::new()?.get_text()?;
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        Ok(text)
    }
}

/// In-process clipboard, for terminals without a system clipboard and for
/// tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.text.clone().ok_or(ClipboardError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::default();
        assert!(matches!(clipboard.get_text(), Err(ClipboardError::Empty)));
        clipboard.set_text("hello").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "hello");
    }
}
