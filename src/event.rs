use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Next key press, or `None` once `timeout` passes without one.
pub fn next_key_event(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    while event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
            _ => continue,
        }
    }
    Ok(None)
}
