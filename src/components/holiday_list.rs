use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::holiday::date_math::{days_until, format_long, relative_label};
use crate::holiday::{HolidayRecord, LabelStyle};
use crate::theme;

/// Width of the countdown column, e.g. "Next week".
const COUNTDOWN_W: usize = 11;

pub struct HolidayList;

impl HolidayList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        holidays: &[HolidayRecord],
        scroll: usize,
        now: DateTime<Local>,
    ) {
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" Upcoming Holidays ({}) ", holidays.len())
        } else {
            " Upcoming Holidays ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .title_bottom(Line::from(Span::styled(" Esc:Back ", theme::current().dim)))
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        if holidays.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new(vec![
                Line::from(Span::styled("No upcoming holidays found", theme::current().header)),
                Line::from(Span::styled("Check back later for updates", theme::current().dim)),
            ]);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = holidays
            .iter()
            .enumerate()
            .skip(scroll)
            .map(|(i, h)| format_holiday(h, now, inner_w, i == scroll))
            .collect();

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

fn format_holiday(
    holiday: &HolidayRecord,
    now: DateTime<Local>,
    max_width: usize,
    selected: bool,
) -> ListItem<'static> {
    let days = days_until(&holiday.holiday_date, &now);
    let countdown = relative_label(days, LabelStyle::List);
    let date = format_long(&holiday.holiday_date.with_timezone(&Local));
    let indent = " ".repeat(COUNTDOWN_W + 1);

    let countdown_style = if selected {
        theme::current().selected
    } else {
        theme::current().countdown
    };

    let mut title_line = vec![
        Span::styled(format!("{:<width$}", countdown, width = COUNTDOWN_W), countdown_style),
        Span::raw(" "),
        Span::styled(
            super::truncate(&holiday.title, max_width.saturating_sub(COUNTDOWN_W + 1)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    // Badge only if there's room
    if let Some(badge) = super::type_badge(holiday) {
        let used = COUNTDOWN_W + 1 + holiday.title.chars().count();
        if used + 1 + badge.width() <= max_width {
            title_line.push(Span::raw(" "));
            title_line.push(badge);
        }
    }

    let mut lines = vec![
        Line::from(title_line),
        Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(date, theme::current().dim),
        ]),
    ];

    if let Some(ref tag) = holiday.holiday_tag {
        if !tag.is_empty() {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(
                    super::truncate(tag, max_width.saturating_sub(COUNTDOWN_W + 1)),
                    Style::default().add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
    }

    if let (Some(label), Some(graphic)) = (holiday.graphic_label(), holiday.graphic.as_ref()) {
        let text = format!("[{}] {}", label, graphic.url);
        lines.push(Line::from(vec![
            Span::raw(indent),
            Span::styled(
                super::truncate(&text, max_width.saturating_sub(COUNTDOWN_W + 1)),
                theme::current().dim,
            ),
        ]));
    }

    lines.push(Line::from(""));
    ListItem::new(lines)
}
