use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};

use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderFiringPeriod {
    OneOff,
    Daily,
}

/// Minute-aligned time of day. Identity key for a reminder slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderFireTime(NaiveTime);

impl ReminderFireTime {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized_time = inner
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .expect("Zero seconds and nanoseconds are always valid.");
        Self(normalized_time)
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }
}

impl FromStr for ReminderFireTime {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // `%H:%M` on its own also accepts unpadded fields such as "9:5".
        let is_padded = value.len() == 5
            && value
                .bytes()
                .enumerate()
                .all(|(i, b)| if i == 2 { b == b':' } else { b.is_ascii_digit() });

        is_padded
            .then(|| NaiveTime::parse_from_str(value, "%H:%M").ok())
            .flatten()
            .map(Self::new)
            .ok_or_else(|| ConfigurationError::InvalidTime {
                value: value.to_owned(),
            })
    }
}

impl fmt::Display for ReminderFireTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDefinition {
    pub fire_at: ReminderFireTime,
    pub text: String,
    pub period: ReminderFiringPeriod,
}

impl ReminderDefinition {
    pub fn is_recurring(&self) -> bool {
        matches!(self.period, ReminderFiringPeriod::Daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        let fire_at: ReminderFireTime = "09:05".parse().unwrap();

        assert_eq!(*fire_at.time(), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(fire_at.to_string(), "09:05");
    }

    #[test]
    fn rejects_malformed_times() {
        for value in ["", "25:00", "12:60", "noon", "12:00:00", "1200", "9:5", "13:5", " 13:00", "13:00 "] {
            let result = value.parse::<ReminderFireTime>();
            assert!(
                matches!(result, Err(ConfigurationError::InvalidTime { .. })),
                "value = {value:?} should be rejected"
            );
        }
    }

    #[test]
    fn new_drops_seconds() {
        let fire_at = ReminderFireTime::new(NaiveTime::from_hms_milli_opt(13, 0, 42, 500).unwrap());

        assert_eq!(fire_at, "13:00".parse().unwrap());
    }
}
