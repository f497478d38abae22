use regex::Regex;
use std::sync::LazyLock;

/// Text accepted as a clickable timestamp: `[H:]MM:SS`, where the minutes may
/// drop their leading digit.
pub const TIMESTAMP_PATTERN: &str = r"^(\d+:)?[0-5]?\d:[0-5]\d$";

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is valid"));

/// Render a position as `[H:]MM:SS`, truncating fractions. `None` renders as
/// an empty string; negative or `NaN` input as zero.
pub fn format_timestamp(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return String::new();
    };

    let total = seconds.max(0.0).floor();
    let hours = (total / 3600.0).floor() as u64;
    let rem = total % 3600.0;
    let mins = (rem / 60.0).floor() as u64;
    let secs = (rem % 60.0) as u64;

    match hours {
        0 => format!("{mins:02}:{secs:02}"),
        _ => format!("{hours}:{mins:02}:{secs:02}"),
    }
}

/// Convert `SS`, `MM:SS` or `HH:MM:SS` into seconds. Any part that is not a
/// number, the empty string included, makes the result `NaN`.
pub fn parse_timestamp(text: &str) -> f64 {
    text.split(':')
        .rev()
        .enumerate()
        .map(|(pos, part)| {
            let value = part.trim().parse::<f64>().unwrap_or(f64::NAN);
            value * 60f64.powi(pos as i32)
        })
        .sum()
}

pub fn is_timestamp(text: &str) -> bool {
    TIMESTAMP_RE.is_match(text)
}

pub fn parse_checked(text: &str) -> Option<f64> {
    match is_timestamp(text) {
        true => Some(parse_timestamp(text)),
        false => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_boundaries() {
        assert_eq!(format_timestamp(Some(0.0)), "00:00");
        assert_eq!(format_timestamp(Some(59.0)), "00:59");
        assert_eq!(format_timestamp(Some(3599.0)), "59:59");
        assert_eq!(format_timestamp(Some(3600.0)), "1:00:00");
        assert_eq!(format_timestamp(Some(36_000.0 + 61.0)), "10:01:01");
        assert_eq!(format_timestamp(None), "");
    }

    #[test]
    fn format_truncates_fractions() {
        assert_eq!(format_timestamp(Some(61.999)), "01:01");
        assert_eq!(format_timestamp(Some(3599.9)), "59:59");
    }

    #[test]
    fn parses_each_arity() {
        assert_eq!(parse_timestamp("42"), 42.0);
        assert_eq!(parse_timestamp("01:05"), 65.0);
        assert_eq!(parse_timestamp("1:00:00"), 3600.0);
        assert_eq!(parse_timestamp("2:03:04"), 7384.0);
    }

    #[test]
    fn non_numeric_parts_poison_the_result() {
        assert!(parse_timestamp("ab:12").is_nan());
        assert!(parse_timestamp("1:xx:00").is_nan());
        assert!(parse_timestamp("").is_nan());
        assert!(parse_timestamp("1:").is_nan());
    }

    #[test]
    fn format_survives_huge_and_non_finite_input() {
        assert_eq!(format_timestamp(Some(f64::INFINITY)), format!("{}:00:00", u64::MAX));
        assert_eq!(format_timestamp(Some(3600.0 * 2f64.powi(70))), format!("{}:00:00", u64::MAX));
        assert_eq!(format_timestamp(Some(f64::NEG_INFINITY)), "00:00");
        assert_eq!(format_timestamp(Some(f64::NAN)), "00:00");
    }

    #[test]
    fn round_trips_every_second_below_100_hours() {
        for s in 0..=359_999u32 {
            let text = format_timestamp(Some(s as f64));
            assert_eq!(parse_timestamp(&text), s as f64, "failed at {text}");
        }
    }

    #[test]
    fn grammar_accepts_display_forms() {
        for ok in ["0:00", "00:00", "9:59", "59:59", "1:00:00", "123:05:09"] {
            assert!(is_timestamp(ok), "{ok} should match");
        }
    }

    #[test]
    fn grammar_rejects_everything_else() {
        for bad in ["", "60:00", "00:60", "1:2", "a:00", "00:00 ", "https://x", "1::00"] {
            assert!(!is_timestamp(bad), "{bad} should not match");
        }
        assert_eq!(parse_checked("12:3x"), None);
        assert_eq!(parse_checked("12:30"), Some(750.0));
    }
}
