use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::theme;

/// Loading and error panels shown in place of the holiday views.
pub struct Notice;

impl Notice {
    pub fn loading(frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::current().border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let msg = Paragraph::new(Span::styled("Loading holidays...", theme::current().dim));
        frame.render_widget(msg, inner);
    }

    pub fn error(frame: &mut Frame, area: Rect, message: &str) {
        let block = Block::default()
            .title(" Error ")
            .title_style(theme::current().error)
            .borders(Borders::ALL)
            .border_style(theme::current().error);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(message.to_string(), theme::current().error)),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to retry or L to change the list",
                theme::current().dim,
            )),
        ];
        let para = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(para, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_string;
    use crate::dashboard::LOAD_FAILED_MESSAGE;

    #[test]
    fn test_error_panel_shows_message() {
        let out = render_to_string(140, 8, |frame, area| {
            Notice::error(frame, area, LOAD_FAILED_MESSAGE)
        });
        assert!(out.contains("Failed to load holiday data."));
        assert!(out.contains("Press r to retry"));
    }

    #[test]
    fn test_loading_panel() {
        let out = render_to_string(40, 3, |frame, area| Notice::loading(frame, area));
        assert!(out.contains("Loading holidays..."));
    }
}
