//! Legislative-day arithmetic.
//!
//! Legislative days skip Saturdays and Sundays. Recesses and holidays are not
//! modeled, so dates past a recess come out early.

use chrono::{Datelike, Days, NaiveDate, Weekday};

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// Next weekday strictly after `date`
fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut next = add_days(date, 1);
    while is_weekend(next) && next != NaiveDate::MAX {
        next = add_days(next, 1);
    }
    next
}

/// Calendar date of legislative day `day`, where day 1 is the session start
/// itself. Day 0 is treated as day 1.
pub fn date_for_legislative_day(session_start: NaiveDate, day: u32) -> NaiveDate {
    let mut remaining = u64::from(day.saturating_sub(1));
    let mut date = session_start;

    // Land on a weekday first so whole weeks are exactly seven days
    if remaining > 0 && is_weekend(date) {
        date = next_weekday(date);
        remaining -= 1;
    }

    date = add_days(date, (remaining / 5) * 7);
    for _ in 0..remaining % 5 {
        date = next_weekday(date);
    }
    date
}
