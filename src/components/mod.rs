pub mod holiday_card;
pub mod holiday_list;
pub mod list_name_form;
pub mod notice;
pub mod status_bar;

pub use holiday_card::HolidayCard;
pub use holiday_list::HolidayList;
pub use list_name_form::ListNameForm;
pub use notice::Notice;
pub use status_bar::StatusBar;

use ratatui::text::Span;

use crate::holiday::HolidayRecord;
use crate::theme;

/// Category badge for a holiday, styled by its known category.
fn type_badge(holiday: &HolidayRecord) -> Option<Span<'static>> {
    let category = holiday.category()?;
    let label = holiday.holiday_type.as_deref()?.trim();
    Some(Span::styled(
        format!(" {} ", label),
        theme::current().tags.for_category(category),
    ))
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame, ratatui::layout::Rect),
) -> String {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            draw(frame, area);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Holiday", 10), "Holiday");
        assert_eq!(truncate("Thanksgiving Day", 10), "Thanksg...");
        assert_eq!(truncate("Día de los Muertos", 6), "Día...");
        assert_eq!(truncate("Holiday", 2), "Ho");
    }
}
