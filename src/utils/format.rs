//! Elapsed-time formatting for the two display lines

use std::time::Duration;

/// Format an elapsed duration into the two counter lines.
///
/// Breaks the duration down largest-unit-first with a plain divmod chain:
/// 365-day years and 30-day months, not calendar-exact arithmetic. Every
/// field is zero-padded to two digits so the matrix layout never shifts.
///
/// Returns `("YYy MMmo DDd", "HHh MMm SSs")`.
pub fn format_duration(elapsed: Duration) -> (String, String) {
    let total_seconds = elapsed.as_secs();
    let total_days = total_seconds / 86_400;

    let years = total_days / 365;
    let months = (total_days % 365) / 30;
    let days = (total_days % 365) % 30;
    let hours = total_seconds / 3600 % 24;
    let minutes = total_seconds % 3600 / 60;
    let seconds = total_seconds % 60;

    let line1 = format!("{:02}y {:02}mo {:02}d", years, months, days);
    let line2 = format!("{:02}h {:02}m {:02}s", hours, minutes, seconds);
    (line1, line2)
}
