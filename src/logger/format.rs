//! Argument rendering and duration formatting for query log lines.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};

use super::mask::MaskIndexSet;

/// Replacement text for a redacted argument.
pub const REDACTION_MARKER: &str = "* SECRET *";

/// Inline `args` after `query`, redacting the positions in `masks`.
///
/// Unmasked arguments use their `Debug` form, so strings appear quoted.
/// With no arguments the result is just `"<query>;"`.
#[must_use]
pub fn inline_args(query: &str, args: &[&dyn fmt::Debug], mut masks: MaskIndexSet) -> String {
    if args.is_empty() {
        return format!("{query};");
    }
    let mut out = String::with_capacity(query.len() + 4 + args.len() * 8);
    out.push_str(query);
    out.push_str("; [");
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        if masks.take_if_head(idx) {
            out.push_str(REDACTION_MARKER);
        } else {
            let _ = write!(out, "{arg:?}");
        }
    }
    out.push(']');
    out
}

/// Milliseconds elapsed between `start` and `now`. Negative if the clock
/// moved backwards.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_millis(start: DateTime<Local>, now: DateTime<Local>) -> f64 {
    let delta = now - start;
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64,
        |micros| micros as f64 / 1000.0,
    )
}

/// `12.3456` → `"12.35ms"`.
#[must_use]
pub fn format_duration(millis: f64) -> String {
    format!("{millis:.2}ms")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn masks_only_flagged_positions() {
        let masks: MaskIndexSet = [1].into_iter().collect();
        let line = inline_args("SELECT 1", &[&1, &2, &3], masks);
        assert_eq!(line, "SELECT 1; [1, * SECRET *, 3]");
    }

    #[test]
    fn strings_render_quoted() {
        let line = inline_args("Q", &[&"alice", &Some(7_i64), &2.5_f64], MaskIndexSet::default());
        assert_eq!(line, r#"Q; ["alice", Some(7), 2.5]"#);
    }

    #[test]
    fn no_args_appends_semicolon_only() {
        assert_eq!(inline_args("SELECT 1", &[], MaskIndexSet::default()), "SELECT 1;");
    }

    #[test]
    fn mask_positions_beyond_args_are_ignored() {
        let masks: MaskIndexSet = [0, 5].into_iter().collect();
        let line = inline_args("Q", &[&"x", &"y"], masks);
        assert_eq!(line, r#"Q; [* SECRET *, "y"]"#);
    }

    #[test]
    fn duration_uses_two_decimals() {
        assert_eq!(format_duration(12.3456), "12.35ms");
        assert_eq!(format_duration(0.0), "0.00ms");
    }

    #[test]
    fn elapsed_is_fractional_milliseconds() {
        let start = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let now = start + TimeDelta::microseconds(150_250);
        assert!((elapsed_millis(start, now) - 150.25).abs() < 1e-9);
    }
}
