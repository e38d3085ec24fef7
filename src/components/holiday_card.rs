use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::DisplayMode;
use crate::holiday::date_math::{days_until, format_long, relative_label};
use crate::holiday::{HolidayRecord, LabelStyle};
use crate::theme;

pub struct HolidayCard;

impl HolidayCard {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        holiday: Option<&HolidayRecord>,
        display_mode: DisplayMode,
        description: Option<&str>,
        now: DateTime<Local>,
    ) {
        let title = match description.filter(|d| !d.trim().is_empty()) {
            Some(d) => format!(" {} ", d.trim()),
            None => " Next Holiday ".to_string(),
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match holiday {
            Some(h) => holiday_lines(h, display_mode, now, inner.width as usize),
            None => vec![
                Line::from(Span::styled(
                    "No upcoming holidays",
                    theme::current().header,
                )),
                Line::from(Span::styled(
                    "Press Enter to view all holidays",
                    theme::current().dim,
                )),
            ],
        };

        let para = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(para, inner);
    }
}

fn holiday_lines(
    holiday: &HolidayRecord,
    display_mode: DisplayMode,
    now: DateTime<Local>,
    width: usize,
) -> Vec<Line<'static>> {
    let compact = display_mode == DisplayMode::Edit;
    let days = days_until(&holiday.holiday_date, &now);
    let date = format_long(&holiday.holiday_date.with_timezone(&Local));

    let mut lines: Vec<Line> = Vec::new();

    let title_style = if compact {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        theme::current().header
    };
    let mut header = vec![Span::styled(holiday.title.clone(), title_style)];
    if let Some(badge) = super::type_badge(holiday) {
        header.push(Span::raw(" "));
        header.push(badge);
    }
    lines.push(Line::from(header));

    lines.push(Line::from(Span::styled(
        date,
        if compact {
            theme::current().dim
        } else {
            Style::default()
        },
    )));
    lines.push(Line::from(Span::styled(
        relative_label(days, LabelStyle::Card),
        theme::current().countdown,
    )));

    if compact {
        return lines;
    }

    if let (Some(label), Some(graphic)) = (holiday.graphic_label(), holiday.graphic.as_ref()) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Image: ", theme::current().dim),
            Span::raw(label.to_string()),
        ]));
        lines.push(Line::from(Span::styled(
            super::truncate(&graphic.url, width),
            theme::current().dim.add_modifier(Modifier::UNDERLINED),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to view all upcoming holidays",
        theme::current().dim,
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_string;
    use chrono::{Duration, Utc};

    fn holiday(days_ahead: i64, now: DateTime<Local>) -> HolidayRecord {
        HolidayRecord {
            id: 1,
            title: "Founders Day".to_string(),
            holiday_date: (now + Duration::days(days_ahead)).with_timezone(&Utc),
            holiday_type: Some("Company".to_string()),
            holiday_tag: None,
            graphic: Some(crate::holiday::record::Graphic {
                description: "Cake".to_string(),
                url: "https://contoso.example/cake.png".to_string(),
            }),
            created: None,
            modified: None,
        }
    }

    #[test]
    fn test_full_card_shows_graphic_and_hint() {
        let now = Local::now();
        let h = holiday(3, now);
        let out = render_to_string(60, 12, |frame, area| {
            HolidayCard::render(frame, area, Some(&h), DisplayMode::Read, None, now)
        });

        assert!(out.contains("Next Holiday"));
        assert!(out.contains("Founders Day"));
        assert!(out.contains("Company"));
        assert!(out.contains("In 3 days"));
        assert!(out.contains("Image: Cake"));
        assert!(out.contains("Press Enter to view all upcoming holidays"));
    }

    #[test]
    fn test_compact_card_hides_extras() {
        let now = Local::now();
        let h = holiday(1, now);
        let out = render_to_string(60, 12, |frame, area| {
            HolidayCard::render(
                frame,
                area,
                Some(&h),
                DisplayMode::Edit,
                Some("Team Holidays"),
                now,
            )
        });

        assert!(out.contains("Team Holidays"));
        assert!(out.contains("Tomorrow"));
        assert!(!out.contains("Image:"));
        assert!(!out.contains("Press Enter"));
    }

    #[test]
    fn test_empty_card() {
        let out = render_to_string(50, 6, |frame, area| {
            HolidayCard::render(frame, area, None, DisplayMode::Read, None, Local::now())
        });
        assert!(out.contains("No upcoming holidays"));
        assert!(out.contains("Press Enter to view all holidays"));
    }
}
