//! Availability resolution against blocked intervals and weekly schedules.
//!
//! Pure predicates over entry attributes; the dialogue never reaches in.
//! Stay checks use half-open intervals so a check-out on the first blocked
//! day is still bookable. Visit checks treat blocked bounds as inclusive
//! and consult the weekday schedule row when one exists.

use chrono::{Datelike, NaiveDate, NaiveTime};

use super::entry::CatalogEntry;

/// Fallback closing time when a row omits it or declares a closing that
/// does not follow its opening.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 0) {
    Some(t) => t,
    None => unreachable!(),
};

const START_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(0, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Returns true when no blocked interval `[start, end)` overlaps the
/// requested stay `[check_in, check_out)`.
///
/// Exactly-adjacent intervals do not conflict: a stay whose check-out
/// equals a block's start (or whose check-in equals its end) is available.
pub fn is_available_for_stay(
    entry: &CatalogEntry,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> bool {
    entry
        .blocked
        .iter()
        .all(|block| check_out <= block.start || check_in >= block.end)
}

/// Returns true when the entry can take a visit on `date` at `time`.
///
/// A date inside any blocked interval (inclusive bounds) rejects the visit.
/// Otherwise the weekday's schedule row decides: no row means unrestricted,
/// a closed row rejects, and an open row requires the time to fall within
/// `[opening, closing]` inclusive. Missing opening defaults to midnight,
/// missing closing to 23:59; a closing at or before its opening is coerced
/// to 23:59.
pub fn is_available_for_visit(entry: &CatalogEntry, date: NaiveDate, time: NaiveTime) -> bool {
    if entry
        .blocked
        .iter()
        .any(|block| block.start <= date && date <= block.end)
    {
        return false;
    }

    let weekday = date.weekday().num_days_from_monday() as u8;
    let row = entry.schedule.iter().find(|row| {
        match normalize_weekday(row.day_of_week) {
            Some(day) => day == weekday,
            None => {
                tracing::warn!(
                    entry_id = %entry.id,
                    day_of_week = row.day_of_week,
                    "ignoring schedule row with out-of-contract weekday"
                );
                false
            }
        }
    });

    let Some(row) = row else {
        return true;
    };
    if row.is_closed {
        return false;
    }

    let opening = row.opening_time.unwrap_or(START_OF_DAY);
    let mut closing = row.closing_time.unwrap_or(END_OF_DAY);
    if closing <= opening {
        closing = END_OF_DAY;
    }
    opening <= time && time <= closing
}

/// Normalizes a stored weekday to the 0-6 Monday-based scale.
///
/// Accepted contract: `0..=6` is already Monday-based and taken verbatim;
/// `7` is the 1-based Sunday and maps to `6`. Anything else is invalid and
/// yields `None` (callers treat the row as absent).
pub fn normalize_weekday(value: i32) -> Option<u8> {
    match value {
        0..=6 => Some(value as u8),
        7 => Some(6),
        _ => None,
    }
}
