use thiserror::Error;

use crate::reminder::ReminderFireTime;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Reminder time {value:?} is not a valid HH:MM time of day")]
    InvalidTime { value: String },

    #[error("More than one reminder is configured at {time}")]
    DuplicateTime { time: ReminderFireTime },

    #[error("Reminder at {time} has an empty message")]
    EmptyMessage { time: ReminderFireTime },

    #[error("Poll interval must be at least one second")]
    InvalidPollInterval,

    #[error("Unknown timezone {name:?}")]
    UnknownTimezone { name: String },
}
