//! Time utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{MICROS_PER_MILLI, MICROS_PER_SECOND};

/// A number followed by one of the unit suffixes printed by the solutions.
/// Either `.` or `,` may separate the decimals.
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*(µs|μs|us|ms|s)").expect("duration pattern is valid")
});

/// Parse a duration such as `"150 µs"`, `"8 ms"` or `"1.234 s"` into microseconds.
///
/// Returns `None` when no number with a known unit is present or the value
/// does not fit in a `u64`.
pub fn parse_elapsed_micros(text: &str) -> Option<u64> {
    let caps = DURATION.captures(text)?;
    let value: f64 = caps[1].replace(',', ".").parse().ok()?;

    let scale = match &caps[2] {
        "ms" => MICROS_PER_MILLI as f64,
        "s" => MICROS_PER_SECOND as f64,
        _ => 1.0,
    };

    let micros = (value * scale).round();
    if !micros.is_finite() || micros >= u64::MAX as f64 {
        return None;
    }

    Some(micros as u64)
}

/// Format microseconds for the report table.
///
/// One second and above is shown in seconds with one decimal, one millisecond
/// and above in whole milliseconds, anything shorter in milliseconds with two
/// decimals. Rounding is half-up.
pub fn format_micros(micros: u64) -> String {
    if micros >= MICROS_PER_SECOND {
        let tenths = micros.saturating_add(50_000) / 100_000;
        format!("{}.{} s", tenths / 10, tenths % 10)
    } else if micros >= MICROS_PER_MILLI {
        format!("{} ms", micros.saturating_add(500) / MICROS_PER_MILLI)
    } else {
        let hundredths = micros.saturating_add(5) / 10;
        format!("{}.{:02} ms", hundredths / 100, hundredths % 100)
    }
}
