mod app;
mod cli;
mod components;
mod config;
mod dashboard;
mod event;
mod holiday;
mod logging;
mod report;
mod theme;
mod tui;

use std::sync::Arc;
use std::time::Duration;

use app::{App, InputMode};
use chrono::Local;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use config::{Config, DisplayMode};
use crossterm::event::{KeyCode, KeyModifiers};
use dashboard::DashboardView;
use holiday::ReqwestTransport;
use ratatui::layout::{Constraint, Layout, Rect};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let log_path = logging::init(cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    if config.site_url.trim().is_empty() {
        eprintln!("No site_url configured. Set it in config.toml or pass --site-url.");
    }
    tracing::info!(
        site = %config.site_url,
        list = %config.list_name,
        log = %log_path.display(),
        "starting holiday dashboard"
    );

    let transport = ReqwestTransport::new(config.request_timeout(), config.access_token.clone())
        .wrap_err("Failed to build HTTP client")?;

    let runtime = tokio::runtime::Runtime::new().wrap_err("Failed to start async runtime")?;
    let _guard = runtime.enter();

    let mut app = App::new(&config, Arc::new(transport));

    if cli.print {
        runtime.block_on(app.dashboard.wait_for_load());
        let mut stdout = std::io::stdout().lock();
        return report::write_report(
            app.dashboard.state(),
            app.dashboard.list_name(),
            Local::now(),
            &mut stdout,
        );
    }

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    settle(result, tui::restore())
}

/// The loop's own error wins over a failed terminal restore.
fn settle(result: Result<()>, restored: std::io::Result<()>) -> Result<()> {
    result?;
    restored.wrap_err("Failed to restore terminal")
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.tick();

        terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: content + status bar
            let layout = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            let content_area = layout[0];
            let now = Local::now();

            match app.dashboard.view() {
                DashboardView::Loading => {
                    components::Notice::loading(frame, centered(content_area, 40, 3));
                }
                DashboardView::Failed(message) => {
                    components::Notice::error(frame, centered(content_area, 64, 7), message);
                }
                DashboardView::Card(holiday) => {
                    let height = match app.display_mode {
                        DisplayMode::Edit => 5,
                        DisplayMode::Read => 12,
                    };
                    components::HolidayCard::render(
                        frame,
                        centered(content_area, 64, height),
                        holiday,
                        app.display_mode,
                        app.description.as_deref(),
                        now,
                    );
                }
                DashboardView::List(holidays) => {
                    components::HolidayList::render(
                        frame,
                        content_area,
                        holidays,
                        app.list_scroll,
                        now,
                    );
                }
            }

            // Render list name form overlay
            if let Some(ref form) = app.form_state {
                components::ListNameForm::render(frame, area, form);
            }

            // Render help overlay
            if app.show_help {
                render_help(frame, area);
            }

            components::StatusBar::render(
                frame,
                layout[1],
                app.dashboard.view(),
                app.dashboard.list_name(),
                app.status_message.as_deref(),
            );
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::ListName => handle_form_input(app, key.code),
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Enter, _) => app.select_card(),
        (KeyCode::Esc, _) | (KeyCode::Backspace, _) | (KeyCode::Char('b'), _) => app.back(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.scroll_down(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.scroll_up(),
        (KeyCode::Char('r'), _) => app.refresh(),
        (KeyCode::Char('e'), _) => app.toggle_display_mode(),
        (KeyCode::Char('L'), _) => app.open_list_form(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_list_form(),
        KeyCode::Enter => app.submit_list_form(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = area.width.min(width);
    let h = area.height.min(height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(52).max(30);
    let popup_h = area.height.min(18).max(12);
    let popup_area = centered(area, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = theme::HEADER_STYLE.add_modifier(Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Views", section_style)),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Open the full holiday list", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Esc", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("b     ", key_style),
            Span::styled("Back to the next-holiday card", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  j/k ", key_style),
            Span::styled("or ", theme::DIM_STYLE),
            Span::styled("\u{2191}/\u{2193}  ", key_style),
            Span::styled("Scroll the list", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  e         ", key_style),
            Span::styled("Compact / full card", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Data", section_style)),
        Line::from(vec![
            Span::styled("  r         ", key_style),
            Span::styled("Reload holidays", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  L         ", key_style),
            Span::styled("Change the holiday list", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q         ", key_style),
            Span::styled("Quit", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Esc", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("?     ", key_style),
            Span::styled("Close this popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    #[test]
    fn test_run_error_survives_failed_restore() {
        let err = settle(
            Err(eyre!("draw failed")),
            Err(std::io::Error::other("terminal gone")),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_run() {
        let err = settle(Ok(()), Err(std::io::Error::other("terminal gone"))).unwrap_err();
        assert_eq!(err.to_string(), "Failed to restore terminal");
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
