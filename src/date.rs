//! Parsing of order dates and the dashboard's date filter.
//!
//! Orders store their date as `month/day/year` while the date picker on the
//! dashboard sends `year-month-day`. Both are reduced to a [time::Date], so
//! comparing two of them is a calendar-day comparison.

use time::{Date, Month};

/// Parse an order date in `month/day/year` form, e.g. "1/15/2024".
///
/// Leading zeros are optional. Returns `None` unless the text has exactly
/// three `/`-separated groups of ASCII digits that form a real calendar date,
/// so "13/40/2024" and "02/30/2023" are both `None`.
pub fn parse_order_date(text: &str) -> Option<Date> {
    let [month, day, year] = split_numeric_fields(text.trim(), '/')?;

    calendar_date(year, month, day)
}

/// Parse the dashboard date filter in `year-month-day` form, e.g. "2024-01-15".
///
/// Falls back to the `month/day/year` order format so that dates copied from
/// the dataset can be used as filter values too.
pub fn parse_date_criterion(text: &str) -> Option<Date> {
    let text = text.trim();

    match split_numeric_fields(text, '-') {
        Some([year, month, day]) => calendar_date(year, month, day),
        None => parse_order_date(text),
    }
}

/// Whether an order date and the filter date fall on the same calendar day.
///
/// An unparseable order date never matches.
pub fn is_same_day(order_date: Option<Date>, filter_date: Date) -> bool {
    order_date.is_some_and(|date| date == filter_date)
}

fn split_numeric_fields(text: &str, separator: char) -> Option<[u32; 3]> {
    let mut fields = [0; 3];
    let mut parts = text.split(separator);

    for field in fields.iter_mut() {
        let part = parts.next()?;

        if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        *field = part.parse().ok()?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(fields)
}

fn calendar_date(year: u32, month: u32, day: u32) -> Option<Date> {
    let year = i32::try_from(year).ok()?;
    let month = Month::try_from(u8::try_from(month).ok()?).ok()?;
    let day = u8::try_from(day).ok()?;

    Date::from_calendar_date(year, month, day).ok()
}
