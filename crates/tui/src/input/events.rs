use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream as TerminalEvents, KeyEvent, KeyEventKind};
use futures_util::StreamExt;

pub struct EventStream {
    inner: TerminalEvents,
}

impl EventStream {
    pub fn new() -> Self {
        Self {
            inner: TerminalEvents::new(),
        }
    }

    /// Next terminal event, or `None` after a short timeout so the main loop
    /// can pick up channel updates between key presses.
    pub async fn next(&mut self) -> Result<Option<Event>> {
        match tokio::time::timeout(Duration::from_millis(100), self.inner.next()).await {
            Ok(Some(Ok(event))) => Ok(Some(event)),
            Ok(Some(Err(err))) => Err(err.into()),
            Ok(None) | Err(_) => Ok(None),
        }
    }
}

impl Default for EventStream {
    fn default() -> Self {
        Self::new()
    }
}

pub fn extract_key_event(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(key),
        _ => None,
    }
}
