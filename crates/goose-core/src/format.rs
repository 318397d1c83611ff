//! Human-readable time formatting.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Milliseconds per second.
const MS_PER_SECOND: i64 = 1000;

/// Seconds per minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Format a duration in milliseconds as `MM:SS`.
///
/// Negative input is clamped to zero and the value is truncated to whole
/// seconds. Minutes are not capped at 59, so long durations render as
/// `125:07`.
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0).checked_div(MS_PER_SECOND).unwrap_or(0);
    let minutes = total_seconds.checked_div(SECONDS_PER_MINUTE).unwrap_or(0);
    let seconds = total_seconds.checked_rem(SECONDS_PER_MINUTE).unwrap_or(0);
    format!("{minutes:02}:{seconds:02}")
}

/// Format an instant as `DD.MM.YYYY, HH:MM:SS` in the process' local zone.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    format_timestamp_in(instant, &Local)
}

/// Format an instant as `DD.MM.YYYY, HH:MM:SS` in the given zone.
pub fn format_timestamp_in<Tz: TimeZone>(instant: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: core::fmt::Display,
{
    instant
        .with_timezone(zone)
        .format("%d.%m.%Y, %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn negative_durations_clamp_to_zero() {
        assert_eq!(format_duration(-1), "00:00");
        assert_eq!(format_duration(-90_000), "00:00");
        assert_eq!(format_duration(i64::MIN), "00:00");
    }

    #[test]
    fn durations_truncate_to_whole_seconds() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(999), "00:00");
        assert_eq!(format_duration(1_000), "00:01");
        assert_eq!(format_duration(59_999), "00:59");
        assert_eq!(format_duration(60_000), "01:00");
        assert_eq!(format_duration(754_321), "12:34");
    }

    #[test]
    fn minutes_are_not_capped() {
        assert_eq!(format_duration(7_507_000), "125:07");
    }

    #[test]
    fn seconds_field_always_below_sixty() {
        for ms in (0..600_000).step_by(997) {
            let text = format_duration(ms);
            let (minutes, seconds) = text.split_once(':').unwrap();
            assert!(minutes.len() >= 2, "{text}");
            assert_eq!(seconds.len(), 2, "{text}");
            assert!(seconds.parse::<u32>().unwrap() < 60, "{text}");
        }
    }

    #[test]
    fn timestamp_pads_every_field() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_timestamp_in(&instant, &Utc), "04.03.2026, 05:06:07");
    }

    #[test]
    fn timestamp_uses_the_given_zone() {
        let instant = Utc.with_ymd_and_hms(2026, 12, 31, 22, 30, 0).unwrap();
        let plus_three = FixedOffset::east_opt(10_800).unwrap();
        assert_eq!(
            format_timestamp_in(&instant, &plus_three),
            "01.01.2027, 01:30:00"
        );
    }

    #[test]
    fn timestamp_never_truncates_the_year() {
        let instant = Utc.with_ymd_and_hms(987, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp_in(&instant, &Utc), "02.01.0987, 03:04:05");
    }

    #[test]
    fn local_timestamp_has_the_expected_shape() {
        let text = format_timestamp(&Utc::now());
        assert_eq!(text.len(), "DD.MM.YYYY, HH:MM:SS".len());
        assert_eq!(text.chars().nth(2), Some('.'));
        assert_eq!(text.chars().nth(10), Some(','));
    }
}
