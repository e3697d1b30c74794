//! Clock-time codec.
//!
//! # Design
//!
//! Time of day is a linear `f64` count of minutes since midnight.  Routing
//! adds travel and waiting minutes to it without wrapping, so values past
//! 1440 simply mean "after midnight of the next day"; only [`format_clock`]
//! wraps.
//!
//! The textual form is the 12-hour clock used on the command line,
//! `H:MMam` / `H:MMpm`.  Parsing is deliberately lenient and never fails:
//! input that does not match yields `0.0` (midnight).

/// Minutes in one day; the wrap modulus for [`format_clock`].
pub const MINUTES_PER_DAY: f64 = 1_440.0;

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse `H:MM` followed by a two-letter meridiem marker into minutes.
///
/// - `12am` is hour 0, `12pm` stays 12, other `pm` hours add 12.
/// - The marker is case-insensitive and may be preceded by whitespace.
/// - A marker other than `am`/`pm` leaves the hour as written.
/// - Anything that does not have the hour, minute and marker tokens returns
///   `0.0`.
pub fn parse_clock(s: &str) -> f64 {
    parse_tokens(s).map_or(0.0, |minutes| minutes as f64)
}

/// Minutes since midnight, or `None` if a token is missing or the hour is
/// too large to convert.
fn parse_tokens(s: &str) -> Option<i64> {
    let (hour_part, rest) = s.trim_start().split_once(':')?;
    let mut hours: i64 = hour_part.parse().ok()?;

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let minutes: i64 = rest[..digits].parse().ok()?;

    let marker: String = rest[digits..]
        .trim_start()
        .chars()
        .take_while(|c| !c.is_whitespace())
        .take(2)
        .collect::<String>()
        .to_ascii_lowercase();
    if marker.is_empty() {
        return None;
    }

    match marker.as_str() {
        "pm" if hours < 12 => hours += 12,
        "am" if hours == 12 => hours = 0,
        _ => {}
    }
    hours.checked_mul(60)?.checked_add(minutes)
}

// ── Formatting ───────────────────────────────────────────────────────────────

/// Render minutes as `HH:MMam` / `HH:MMpm`, wrapping modulo one day.
///
/// Fractional minutes are truncated.  Hour 0 is shown as 12.
pub fn format_clock(minutes: f64) -> String {
    let total = (minutes as i64).rem_euclid(MINUTES_PER_DAY as i64);
    let hours = total / 60;
    let mins = total % 60;

    let period = if hours >= 12 { "pm" } else { "am" };
    let display_hour = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour:02}:{mins:02}{period}")
}

// ── Departure slots ──────────────────────────────────────────────────────────

/// Minutes to wait at `arrival` until the next departure slot.
///
/// Scheduled services leave every `interval` minutes starting from midnight.
/// Returns `0.0` when `arrival` is exactly on a slot boundary.
#[inline]
pub fn wait_for_departure(arrival: f64, interval: f64) -> f64 {
    let offset = arrival.rem_euclid(interval);
    if offset > 0.0 { interval - offset } else { 0.0 }
}
