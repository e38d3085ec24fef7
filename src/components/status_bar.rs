use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::dashboard::DashboardView;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        view: DashboardView<'_>,
        list_name: &str,
        status_message: Option<&str>,
    ) {
        let w = area.width as usize;

        let mode_str = match view {
            DashboardView::Loading => "Loading",
            DashboardView::Failed(_) => "Error",
            DashboardView::Card(_) => "Card",
            DashboardView::List(_) => "List",
        };

        let right_text = if let Some(msg) = status_message {
            format!(" {} ", msg)
        } else {
            let hints = match view {
                DashboardView::List(_) if w >= 70 => {
                    " jk:Scroll Esc:Back r:Refresh L:List ?:Help q:Quit"
                }
                DashboardView::Card(_) if w >= 70 => {
                    " Enter:All e:Layout r:Refresh L:List ?:Help q:Quit"
                }
                _ if w >= 40 => " r:Refresh ?:Help q:Quit",
                _ => " q:Quit",
            };
            hints.to_string()
        };

        let left = if w >= 50 {
            format!(" [{}] {} ", mode_str, list_name)
        } else {
            format!(" [{}] ", mode_str)
        };
        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right_text.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, theme::current().status),
            Span::styled(padding, theme::current().status),
            Span::styled(right_text, theme::current().status),
        ]);

        let bar = Paragraph::new(line).style(theme::current().status);
        frame.render_widget(bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_string;

    #[test]
    fn test_status_bar_hints_follow_view() {
        let out = render_to_string(100, 1, |frame, area| {
            StatusBar::render(frame, area, DashboardView::List(&[]), "Company Holidays", None)
        });
        assert!(out.contains("[List] Company Holidays"));
        assert!(out.contains("Esc:Back"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let out = render_to_string(100, 1, |frame, area| {
            StatusBar::render(frame, area, DashboardView::Card(None), "Holidays", Some("List unchanged"))
        });
        assert!(out.contains("List unchanged"));
        assert!(!out.contains("q:Quit"));
    }
}
