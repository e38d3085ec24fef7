use std::io::Write;

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;

use crate::dashboard::DashboardState;
use crate::holiday::date_math::{days_until, format_long, relative_label};
use crate::holiday::LabelStyle;

/// Plain-text rendering of a settled dashboard, for `--print`.
pub fn write_report<W: Write>(
    state: &DashboardState,
    list_name: &str,
    now: DateTime<Local>,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", list_name)?;
    writeln!(out, "---")?;

    if let Some(ref error) = state.error {
        writeln!(out, "Error: {}", error)?;
        return Ok(());
    }

    match state.next_holiday {
        Some(ref h) => writeln!(
            out,
            "Next: {} ({}) - {}",
            h.title,
            format_long(&h.holiday_date.with_timezone(&Local)),
            relative_label(days_until(&h.holiday_date, &now), LabelStyle::Card)
        )?,
        None => writeln!(out, "Next: No upcoming holidays")?,
    }
    writeln!(out, "---")?;

    writeln!(out, "  {:<12} {:<30} {}", "When", "Date", "Holiday")?;
    for h in &state.all_holidays {
        let when = relative_label(days_until(&h.holiday_date, &now), LabelStyle::List);
        let date = format_long(&h.holiday_date.with_timezone(&Local));
        match h.holiday_type.as_deref().filter(|t| !t.is_empty()) {
            Some(kind) => writeln!(out, "  {:<12} {:<30} {} [{}]", when, date, h.title, kind)?,
            None => writeln!(out, "  {:<12} {:<30} {}", when, date, h.title)?,
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", state.all_holidays.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::LOAD_FAILED_MESSAGE;
    use crate::holiday::HolidayRecord;
    use chrono::{Duration, Utc};

    fn holiday(id: i64, title: &str, days_ahead: i64, now: DateTime<Local>) -> HolidayRecord {
        HolidayRecord {
            id,
            title: title.to_string(),
            holiday_date: (now + Duration::days(days_ahead)).with_timezone(&Utc),
            holiday_type: Some("Federal".to_string()),
            holiday_tag: None,
            graphic: None,
            created: None,
            modified: None,
        }
    }

    fn report(state: &DashboardState, now: DateTime<Local>) -> String {
        let mut buf = Vec::new();
        write_report(state, "Company Holidays", now, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_lists_holidays() {
        let now = Local::now();
        let first = holiday(1, "Memorial Day", 1, now);
        let state = DashboardState {
            next_holiday: Some(first.clone()),
            all_holidays: vec![first, holiday(2, "Labor Day", 40, now)],
            is_loading: false,
            ..DashboardState::default()
        };
        let out = report(&state, now);

        assert!(out.starts_with("Company Holidays\n"));
        assert!(out.contains("Next: Memorial Day"));
        assert!(out.contains("- Tomorrow"));
        assert!(out.contains("2 months"));
        assert!(out.contains("Labor Day [Federal]"));
        assert!(out.contains("Total: 2 holiday(s)"));
    }

    #[test]
    fn test_report_empty() {
        let state = DashboardState {
            is_loading: false,
            ..DashboardState::default()
        };
        let out = report(&state, Local::now());
        assert!(out.contains("Next: No upcoming holidays"));
        assert!(out.contains("Total: 0 holiday(s)"));
    }

    #[test]
    fn test_report_error() {
        let state = DashboardState {
            is_loading: false,
            error: Some(LOAD_FAILED_MESSAGE.to_string()),
            ..DashboardState::default()
        };
        let out = report(&state, Local::now());
        assert!(out.contains("Error: Failed to load holiday data."));
        assert!(!out.contains("Total:"));
    }
}
