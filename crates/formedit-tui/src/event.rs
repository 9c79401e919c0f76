//! Event handling for the TUI

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input (presses and repeats only)
    Key(KeyEvent),
    /// Mouse input
    Mouse(MouseEvent),
    /// Bracketed paste
    Paste(String),
    /// Tick for expiring status messages
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

impl Event {
    /// Convert a crossterm event, dropping the ones the editor ignores.
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
            _ => None,
        }
    }
}

/// Handles terminal events and produces Event stream
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // Spawn event polling task
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if tx_clone.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(Duration::from_millis(20)) => {
                        // Drain everything crossterm has queued
                        while event::poll(Duration::from_millis(0)).unwrap_or(false) {
                            let Ok(evt) = event::read() else {
                                break;
                            };
                            if let Some(e) = Event::from_crossterm(evt) {
                                if tx_clone.send(e).is_err() {
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_key_releases_are_dropped() {
        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(matches!(
            Event::from_crossterm(CrosstermEvent::Key(press)),
            Some(Event::Key(_))
        ));
        assert!(Event::from_crossterm(CrosstermEvent::Key(release)).is_none());
        assert!(Event::from_crossterm(CrosstermEvent::FocusGained).is_none());
        assert!(matches!(
            Event::from_crossterm(CrosstermEvent::Paste("x".into())),
            Some(Event::Paste(_))
        ));
    }

    #[tokio::test]
    async fn test_handler_delivers_ticks() {
        let mut events = EventHandler::new(Duration::from_millis(10));
        assert!(matches!(events.next().await, Some(Event::Tick)));
    }
}
