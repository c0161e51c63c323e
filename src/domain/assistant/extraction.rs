//! Text-to-structured-data extraction.
//!
//! Pure functions turning a user-text fragment into a number, a calendar
//! date, a date pair, a clock time, a time pair, or a full slot record for
//! a bundle turn. Patterns are tried in priority order; the first
//! structural match wins and there is no backtracking across patterns.

use chrono::{Datelike, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::preferences::TravelPreferences;
use super::step::DialogueStep;

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];
const TIME_FORMATS: &[&str] = &["%H:%M", "%H.%M"];

// Range shapes: "del X al Y", "X al Y", "X-Y". X/Y are D/M or D-M tokens
// with an optional year.
static DATE_RANGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    const TOKEN: &str = r"(\d{1,2}[/-]\d{1,2}(?:[/-]\d{4})?)";
    [
        format!(r"(?i)del?\s+{TOKEN}\s+al?\s+{TOKEN}"),
        format!(r"(?i){TOKEN}\s+al?\s+{TOKEN}"),
        format!(r"(?i){TOKEN}\s*[-–—]\s*{TOKEN}"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static date-range pattern"))
    .collect()
});

// Range shapes: "de H a H", "H a H", "H-H" with ':' or '.' separators.
static TIME_RANGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    const TOKEN: &str = r"(\d{1,2}[:.]\d{2})";
    [
        format!(r"(?i)de\s+{TOKEN}\s+a\s+{TOKEN}"),
        format!(r"(?i){TOKEN}\s+a\s+{TOKEN}"),
        format!(r"(?i){TOKEN}\s*[-–—]\s*{TOKEN}"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static time-range pattern"))
    .collect()
});

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static digit pattern"));

/// Why a bundle turn could not populate the remaining slots.
///
/// The `Display` strings double as the corrective hints sent back to the
/// user, so each variant names the field that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("Necesito los tres datos: ubicación, fecha o rango, y horario o rango, separados por comas.")]
    MissingRestaurantFields,

    #[error("No pude leer la fecha. Usá un formato como 05/12/2025 o 05/12/2025 al 12/12/2025.")]
    UnreadableDate,

    #[error("No pude leer el horario. Usá 20:30 o un rango como 20:00 a 23:00.")]
    UnreadableTime,

    #[error("Necesito: ubicación, precio mínimo, precio máximo, huéspedes y rango de fechas, separados por comas.")]
    MissingLodgingFields,

    #[error("Revisá los precios y la cantidad de huéspedes. Usá números, por ejemplo 40000, 120000, 4.")]
    UnreadableNumbers,

    #[error("El precio mínimo no puede superar al máximo. Revisá los valores.")]
    PriceOrderInverted,

    #[error("Indicá un rango de fechas como 05/12/2025 al 12/12/2025.")]
    MissingDateRange,
}

/// First maximal digit run as an integer, tolerating `.` and `,` thousands
/// separators anywhere in the text.
pub fn extract_number(text: &str) -> Option<i64> {
    let stripped = text.replace(['.', ','], "");
    DIGIT_RUN
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Parses a date in `D/M/Y`, `D-M-Y`, or `Y-M-D`, in that order.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Parses a time in `HH:MM` or `HH.MM`.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

/// Scans for a "from X to Y" date range; falls back to a single date.
///
/// Returns `[start, end]` when a range shape matches and both ends parse,
/// `[date]` when only a single date is present, or an empty vec. A matched
/// token without a year is completed with `reference.year()` before
/// parsing.
pub fn parse_date_range(text: &str, reference: NaiveDate) -> Vec<NaiveDate> {
    for pattern in DATE_RANGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let start = parse_date_token(&caps[1], reference);
            let end = parse_date_token(&caps[2], reference);
            if let (Some(start), Some(end)) = (start, end) {
                return vec![start, end];
            }
        }
    }
    parse_date(text).into_iter().collect()
}

/// Scans for a "from H to H" time range; falls back to a single time.
pub fn parse_time_range(text: &str) -> Vec<NaiveTime> {
    for pattern in TIME_RANGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let start = parse_time(&caps[1]);
            let end = parse_time(&caps[2]);
            if let (Some(start), Some(end)) = (start, end) {
                return vec![start, end];
            }
        }
    }
    parse_time(text).into_iter().collect()
}

/// Fills every remaining slot for the current category from one
/// comma-delimited utterance.
///
/// Restaurant bundles need location, a date-or-range field and a
/// time-or-range field; lodging bundles need location, both price bounds,
/// the guest count and a two-date range. On success the returned copy has
/// `step` advanced to `Complete`; on failure the input record is untouched.
pub fn parse_bundle(
    prefs: &TravelPreferences,
    text: &str,
    reference: NaiveDate,
) -> Result<TravelPreferences, BundleError> {
    let parts: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if prefs.is_restaurant() {
        if parts.len() < 3 {
            return Err(BundleError::MissingRestaurantFields);
        }
        let (location, date_part, time_part) = (parts[0], parts[1], parts[2]);
        let dates = parse_date_range(date_part, reference);
        let times = parse_time_range(time_part);
        // An inverted range counts as unreadable: the slot is only
        // assigned once end >= start holds.
        if dates.is_empty() || dates.get(1).is_some_and(|end| *end < dates[0]) {
            return Err(BundleError::UnreadableDate);
        }
        if times.is_empty() || times.get(1).is_some_and(|end| *end < times[0]) {
            return Err(BundleError::UnreadableTime);
        }
        return Ok(prefs
            .with_location(location, prefs.step)
            .with_visit_dates(dates[0], dates.get(1).copied(), prefs.step)
            .with_visit_times(times[0], times.get(1).copied(), DialogueStep::Complete));
    }

    // Hotels / lodgings
    if parts.len() < 5 {
        return Err(BundleError::MissingLodgingFields);
    }
    let (location, min_part, max_part, guests_part, date_part) =
        (parts[0], parts[1], parts[2], parts[3], parts[4]);
    let min_price = extract_number(min_part);
    let max_price = extract_number(max_part);
    let guests = extract_number(guests_part);
    let (Some(min_price), Some(max_price), Some(guests)) = (min_price, max_price, guests) else {
        return Err(BundleError::UnreadableNumbers);
    };
    if min_price > max_price {
        return Err(BundleError::PriceOrderInverted);
    }
    let dates = parse_date_range(date_part, reference);
    if dates.len() < 2 || dates[1] < dates[0] {
        return Err(BundleError::MissingDateRange);
    }
    Ok(prefs
        .with_location(location, prefs.step)
        .with_min_price(min_price as f64, prefs.step)
        .with_max_price(max_price as f64, prefs.step)
        .with_guests(guests as u32, prefs.step)
        .with_check_in(dates[0], prefs.step)
        .with_check_out(dates[1], DialogueStep::Complete))
}

/// Completes a yearless `D/M` or `D-M` token with the reference year, then
/// delegates to [`parse_date`].
fn parse_date_token(token: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let separators = token.matches(['/', '-']).count();
    if separators == 1 {
        let sep = if token.contains('/') { '/' } else { '-' };
        let completed = format!("{}{}{}", token, sep, reference.year());
        return parse_date(&completed);
    }
    parse_date(token)
}
