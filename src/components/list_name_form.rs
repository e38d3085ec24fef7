use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

#[derive(Debug, Clone)]
pub struct ListNameFormState {
    pub value: String,
}

impl ListNameFormState {
    pub fn new(current: &str) -> Self {
        Self {
            value: current.to_string(),
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }
}

pub struct ListNameForm;

impl ListNameForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &ListNameFormState) {
        // Center the form popup
        let form_w = area.width.min(50).max(30);
        let form_h = area.height.min(7).max(6);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" Holiday List ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // field
            Constraint::Length(1), // note
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let field = Line::from(vec![
            Span::styled("Name: ", theme::current().dim),
            Span::styled(
                format!("{}_", state.value),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(field), rows[0]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Blank uses \"Company Holidays\"",
                theme::current().dim,
            )),
            rows[1],
        );

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Load ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[3]);
    }
}
