pub mod appsettings;
pub mod catalog;
pub mod delivery;
pub mod error;
pub mod reminder;
pub mod scheduling;

use std::sync::Arc;

use anyhow::Context;

use appsettings::AppSettings;
use catalog::ReminderCatalog;
use delivery::{
    AlertSettings, CommandToneSink, DesktopNotificationSink, FileEventLogger,
    SystemAlertDispatcher,
};
use scheduling::{Clock, LocalClock, ReminderScheduler, ZonedClock};

/// Validates `settings` and wires the scheduler to the desktop sinks.
pub fn build_scheduler(settings: &AppSettings) -> anyhow::Result<ReminderScheduler> {
    let catalog = ReminderCatalog::new(&settings.one_time_reminders, &settings.recurring_reminders)
        .context("Invalid reminder configuration")?;
    let poll_interval = settings.poll_interval()?;

    let clock: Arc<dyn Clock> = match settings.timezone()? {
        Some(timezone) => {
            log::info!("Using configured timezone {timezone}");
            Arc::new(ZonedClock::new(timezone))
        }
        None => Arc::new(LocalClock),
    };

    if settings.dispatch_budget() >= poll_interval {
        log::warn!(
            "Dispatch may take up to {:?}, which is not below the poll interval {:?}.",
            settings.dispatch_budget(),
            poll_interval
        );
    }

    let command_timeout = settings.command_timeout();
    let dispatcher = SystemAlertDispatcher::new(
        Arc::new(DesktopNotificationSink::new(command_timeout)),
        Arc::new(CommandToneSink::new(command_timeout)),
        Arc::new(FileEventLogger::new(&settings.event_log.path)),
        clock.clone(),
        AlertSettings::from(settings),
    );

    Ok(ReminderScheduler::new(
        catalog,
        settings.rollover_policy,
        clock,
        Arc::new(dispatcher),
        poll_interval,
    ))
}
