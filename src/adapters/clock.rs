use chrono::{DateTime, FixedOffset, Utc};

use crate::ports::clock::Clock;

const JST_OFFSET_SECONDS: i32 = 9 * 60 * 60;

/// Wall-clock time at UTC+9, whatever the host time zone is.
#[derive(Debug, Clone, Copy)]
pub struct JstClock {
    offset: FixedOffset,
}

impl JstClock {
    pub fn new() -> Self {
        Self {
            offset: FixedOffset::east_opt(JST_OFFSET_SECONDS)
                .expect("UTC+9 is within the valid offset range"),
        }
    }
}

impl Default for JstClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for JstClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    pub fn from_rfc3339(text: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(text).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jst_clock_uses_fixed_offset() {
        let now = JstClock::new().now();
        assert_eq!(now.offset().local_minus_utc(), JST_OFFSET_SECONDS);
    }

    #[test]
    fn test_jst_timestamp_matches_utc_plus_nine() {
        let clock = JstClock::new();
        let utc = Utc::now();
        let stamp = clock.timestamp();
        let expected_hour = (utc + chrono::Duration::hours(9)).format("%H").to_string();
        // Allow for the hour rolling over between the two reads
        let next_hour = (utc + chrono::Duration::hours(9) + chrono::Duration::seconds(5))
            .format("%H")
            .to_string();
        assert_eq!(stamp.len(), "2024-01-01 00:00:00".len());
        assert!(stamp[11..13] == expected_hour || stamp[11..13] == next_hour);
    }

    #[test]
    fn test_fixed_clock_timestamp() {
        let clock = FixedClock::from_rfc3339("2024-01-01T00:00:00+09:00").unwrap();
        assert_eq!(clock.timestamp(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_fixed_clock_keeps_its_own_offset() {
        let clock = FixedClock::from_rfc3339("2023-12-31T15:00:00Z").unwrap();
        assert_eq!(clock.timestamp(), "2023-12-31 15:00:00");
    }
}
