/// Splits a second count into hours, minutes and seconds.
/// Negative counts are treated as zero.
fn split_seconds(seconds: i64) -> (i64, i64, i64) {
    let clamped = seconds.max(0);
    let hours = clamped / 3600;
    let minutes = (clamped % 3600) / 60;
    let secs = clamped % 60;
    (hours, minutes, secs)
}

/// Formats a duration as `"<H>h <MM>m <SS>s"`, e.g. `2h 17m 18s`.
pub fn to_hms(seconds: i64) -> String {
    let (hours, minutes, secs) = split_seconds(seconds);
    format!("{}h {:02}m {:02}s", hours, minutes, secs)
}

/// Formats a duration as a zero-padded clock, e.g. `02:17:18`.
pub fn to_clock(seconds: i64) -> String {
    let (hours, minutes, secs) = split_seconds(seconds);
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Formats a duration as `"<H>h <MM>m"`, dropping the seconds.
pub fn to_hours_minutes(seconds: i64) -> String {
    let (hours, minutes, _) = split_seconds(seconds);
    format!("{}h {:02}m", hours, minutes)
}

/// Formats a progress fraction as a whole percentage, e.g. `0.504` -> `50%`.
pub fn to_percent(progress: f64) -> String {
    format!("{}%", (progress * 100.0).round() as i64)
}

/// Rounds `value` to the nearest integer and inserts `,` every three digits.
///
/// Non-finite values are rendered as `0`.
pub fn to_grouped_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hms_and_clock_decomposition() {
        assert_eq!(to_hms(8238), "2h 17m 18s");
        assert_eq!(to_clock(8238), "02:17:18");
        assert_eq!(to_hms(0), "0h 00m 00s");
        assert_eq!(to_clock(59), "00:00:59");
        assert_eq!(to_clock(36_000 + 61), "10:01:01");
        assert_eq!(to_hms(44_280), "12h 18m 00s");
    }

    #[test]
    fn test_negative_seconds_are_clamped() {
        assert_eq!(to_hms(-5), "0h 00m 00s");
        assert_eq!(to_clock(-3600), "00:00:00");
        assert_eq!(to_hours_minutes(-1), "0h 00m");
    }

    #[test]
    fn test_every_second_matches_floor_decomposition() {
        for seconds in (0..200_000).step_by(997) {
            let expected = format!(
                "{:02}:{:02}:{:02}",
                seconds / 3600,
                (seconds % 3600) / 60,
                seconds % 60
            );
            assert_eq!(to_clock(seconds), expected);
        }
    }

    #[test]
    fn test_hours_minutes() {
        assert_eq!(to_hours_minutes(44_280), "12h 18m");
        assert_eq!(to_hours_minutes(3_659), "1h 00m");
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(to_percent(0.0), "0%");
        assert_eq!(to_percent(0.504), "50%");
        assert_eq!(to_percent(0.186), "19%");
        assert_eq!(to_percent(1.0), "100%");
    }

    #[test]
    fn test_grouped_number() {
        assert_eq!(to_grouped_number(6684.4), "6,684");
        assert_eq!(to_grouped_number(999.5), "1,000");
        assert_eq!(to_grouped_number(12.0), "12");
        assert_eq!(to_grouped_number(1_234_567.0), "1,234,567");
        assert_eq!(to_grouped_number(-4321.2), "-4,321");
        assert_eq!(to_grouped_number(f64::NAN), "0");
    }
}
