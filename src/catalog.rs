use std::collections::HashSet;

use crate::{
    appsettings::ReminderEntrySettings,
    error::ConfigurationError,
    reminder::{ReminderDefinition, ReminderFireTime, ReminderFiringPeriod},
};

/// Every reminder the daemon knows about, one-time entries first.
#[derive(Debug, Clone)]
pub struct ReminderCatalog {
    entries: Vec<ReminderDefinition>,
}

impl ReminderCatalog {
    pub fn new(
        one_time: &[ReminderEntrySettings],
        recurring: &[ReminderEntrySettings],
    ) -> Result<Self, ConfigurationError> {
        let one_time = one_time
            .iter()
            .map(|entry| to_definition(entry, ReminderFiringPeriod::OneOff));
        let recurring = recurring
            .iter()
            .map(|entry| to_definition(entry, ReminderFiringPeriod::Daily));

        let entries = one_time
            .chain(recurring)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_definitions(entries)
    }

    pub fn from_definitions(entries: Vec<ReminderDefinition>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.text.trim().is_empty() {
                return Err(ConfigurationError::EmptyMessage {
                    time: entry.fire_at,
                });
            }

            if !seen.insert(entry.fire_at) {
                return Err(ConfigurationError::DuplicateTime {
                    time: entry.fire_at,
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ReminderDefinition] {
        &self.entries
    }

    pub fn fire_times(&self) -> impl Iterator<Item = ReminderFireTime> + '_ {
        self.entries.iter().map(|entry| entry.fire_at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn to_definition(
    entry: &ReminderEntrySettings,
    period: ReminderFiringPeriod,
) -> Result<ReminderDefinition, ConfigurationError> {
    Ok(ReminderDefinition {
        fire_at: entry.time.parse()?,
        text: entry.message.clone(),
        period,
    })
}
