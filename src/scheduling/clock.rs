use chrono::{Local, NaiveDateTime, Utc};

/// Source of the local wall-clock time sampled on every poll.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> anyhow::Result<NaiveDateTime>;
}

/// Uses the zone configured on the host.
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> anyhow::Result<NaiveDateTime> {
        Ok(Local::now().naive_local())
    }
}

/// Uses a fixed zone regardless of the host configuration.
pub struct ZonedClock {
    timezone: chrono_tz::Tz,
}

impl ZonedClock {
    pub fn new(timezone: chrono_tz::Tz) -> Self {
        Self { timezone }
    }
}

impl Clock for ZonedClock {
    fn now(&self) -> anyhow::Result<NaiveDateTime> {
        Ok(Utc::now().with_timezone(&self.timezone).naive_local())
    }
}
