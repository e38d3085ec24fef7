use std::io::{self, Stdout};
use std::thread::{self, ThreadId};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> io::Result<Tui> {
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    Ok(())
}

/// Put the terminal back before the panic report is printed.
///
/// Only panics on the calling (UI) thread touch the terminal. A panic inside a
/// load task is recovered by the dashboard, so it is logged and the screen is
/// left as is.
pub fn install_panic_hook() {
    set_terminal_hook(thread::current().id(), || {
        let _ = restore();
    });
}

fn set_terminal_hook<F>(ui_thread: ThreadId, restore_terminal: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if thread::current().id() == ui_thread {
            restore_terminal();
            original_hook(panic_info);
        } else {
            tracing::error!(
                thread = thread::current().name().unwrap_or("unnamed"),
                "background task panicked: {}",
                panic_info
            );
        }
    }));
}
