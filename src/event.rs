use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Wait up to `timeout` for a key press. Releases, repeats and non-key
/// events are skipped without resetting the timeout.
pub fn next_key_event(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}
