use std::fmt::Display;

use chrono::{DateTime, TimeZone};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Which countdown wording to use. The card reads as a sentence ("In 3 days"),
/// the list column drops the preposition ("3 days").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Card,
    List,
}

/// Whole days from `now` until `date`, rounded up. Negative once the date has passed.
pub fn days_until<A: TimeZone, B: TimeZone>(date: &DateTime<A>, now: &DateTime<B>) -> i64 {
    let millis = date
        .clone()
        .signed_duration_since(now.clone())
        .num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// "Wednesday, January 15, 2025" in the date's own timezone.
pub fn format_long<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn relative_label(days: i64, style: LabelStyle) -> String {
    let prefix = match style {
        LabelStyle::Card => "In ",
        LabelStyle::List => "",
    };

    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d < 7 => format!("{}{} days", prefix, d),
        d if d < 14 => "Next week".to_string(),
        d if d < 30 => format!("{}{} weeks", prefix, ceil_div(d, 7)),
        d => format!("{}{} months", prefix, ceil_div(d, 30)),
    }
}

fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}
