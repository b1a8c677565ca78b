use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{error::ConfigurationError, scheduling::RolloverPolicy};

#[derive(Deserialize, Debug, Clone)]
pub struct ReminderEntrySettings {
    pub time: String,
    pub message: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NotificationSettings {
    pub title: String,
    pub timeout_seconds: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ToneSettings {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EventLogSettings {
    pub path: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DispatchSettings {
    pub command_timeout_seconds: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    #[serde(default)]
    pub one_time_reminders: Vec<ReminderEntrySettings>,
    #[serde(default)]
    pub recurring_reminders: Vec<ReminderEntrySettings>,
    pub poll_interval_seconds: u64,
    pub timezone: Option<String>,
    pub rollover_policy: RolloverPolicy,
    pub notification: NotificationSettings,
    pub tone: ToneSettings,
    pub event_log: EventLogSettings,
    pub dispatch: DispatchSettings,
}

impl AppSettings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name("appsettings").required(true))
                .add_source(File::with_name("appsettings.local").required(false))
                .add_source(
                    Environment::with_prefix("APP")
                        .prefix_separator("_")
                        .separator("__"),
                ),
        )
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("poll_interval_seconds", 300)?
            .set_default("rollover_policy", "calendar_date")?
            .set_default("notification.title", "Urgent Reminder")?
            .set_default("notification.timeout_seconds", 5)?
            .set_default("tone.frequency_hz", 1000)?
            .set_default("tone.duration_ms", 1000)?
            .set_default("event_log.path", "reminder_log.txt")?
            .set_default("dispatch.command_timeout_seconds", 10)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn poll_interval(&self) -> Result<Duration, ConfigurationError> {
        match self.poll_interval_seconds {
            0 => Err(ConfigurationError::InvalidPollInterval),
            seconds => Ok(Duration::from_secs(seconds)),
        }
    }

    pub fn timezone(&self) -> Result<Option<chrono_tz::Tz>, ConfigurationError> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<chrono_tz::Tz>()
                    .map_err(|_| ConfigurationError::UnknownTimezone {
                        name: name.to_owned(),
                    })
            })
            .transpose()
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch.command_timeout_seconds)
    }

    /// Worst case time spent on external commands for a single dispatch.
    pub fn dispatch_budget(&self) -> Duration {
        self.command_timeout() * 2
    }
}
