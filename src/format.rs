//! Time and pace rendering
//!
//! Both formatters floor fractional seconds and are total: negative or
//! non-finite input renders as zero.

use crate::error::{RacePaceError, Result};

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

/// Render a duration as `H:MM:SS`, or `M:SS` below one hour
pub fn format_duration(total_seconds: f64) -> String {
    let total = whole_seconds(total_seconds);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Render a pace in seconds per kilometre as `M:SS`
pub fn format_pace(seconds_per_km: f64) -> String {
    let total = whole_seconds(seconds_per_km);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Combine separate hour/minute/second fields; blank fields count as zero
pub fn seconds_from_parts(hours: Option<u32>, minutes: Option<u32>, seconds: Option<u32>) -> f64 {
    f64::from(hours.unwrap_or(0)) * 3600.0
        + f64::from(minutes.unwrap_or(0)) * 60.0
        + f64::from(seconds.unwrap_or(0))
}

/// Parse `SS`, `M:SS` or `H:MM:SS` into seconds
pub fn parse_duration(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RacePaceError::Parse(input.to_string()));
    }

    let parts = trimmed
        .split(':')
        .map(|part| part.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| RacePaceError::Parse(input.to_string()))?;

    match parts.as_slice() {
        [s] => Ok(seconds_from_parts(None, None, Some(*s))),
        [m, s] if *s < 60 => Ok(seconds_from_parts(None, Some(*m), Some(*s))),
        [h, m, s] if *m < 60 && *s < 60 => Ok(seconds_from_parts(Some(*h), Some(*m), Some(*s))),
        _ => Err(RacePaceError::Parse(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(125.0), "2:05");
        assert_eq!(format_duration(3725.0), "1:02:05");
        assert_eq!(format_duration(3600.0), "1:00:00");
        assert_eq!(format_duration(59.999), "0:59");
        assert_eq!(format_duration(0.0), "0:00");
    }

    #[test]
    fn test_format_duration_clamps_invalid_input() {
        assert_eq!(format_duration(-10.0), "0:00");
        assert_eq!(format_duration(f64::NAN), "0:00");
        assert_eq!(format_duration(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(330.0), "5:30");
        assert_eq!(format_pace(305.9), "5:05");
        assert_eq!(format_pace(725.0), "12:05");
        assert_eq!(format_pace(-1.0), "0:00");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("25:00").unwrap(), 1500.0);
        assert_eq!(parse_duration("1:02:05").unwrap(), 3725.0);
        assert_eq!(parse_duration("90").unwrap(), 90.0);
        assert_eq!(parse_duration(" 4:30 ").unwrap(), 270.0);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("4:75").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("-5:00").is_err());
    }

    #[test]
    fn test_seconds_from_parts() {
        assert_eq!(seconds_from_parts(Some(3), Some(30), None), 12600.0);
        assert_eq!(seconds_from_parts(None, None, None), 0.0);
    }
}
