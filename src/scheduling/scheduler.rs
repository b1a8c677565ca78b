use std::{sync::Arc, time::Duration};

use anyhow::Context;
use chrono::NaiveDateTime;
use tokio_util::sync::CancellationToken;

use crate::{
    catalog::ReminderCatalog,
    delivery::AlertDispatcher,
    reminder::ReminderFireTime,
};

use super::{Clock, DayRolloverDetector, FiringState, RolloverPolicy};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub rolled_over: bool,
    pub fired: Vec<ReminderFireTime>,
}

/// Polls the clock and fires every reminder whose minute matches the sample.
///
/// A reminder whose minute falls between two polls is skipped for that day.
pub struct ReminderScheduler {
    catalog: ReminderCatalog,
    firing_state: FiringState,
    rollover: DayRolloverDetector,
    clock: Arc<dyn Clock>,
    dispatcher: Arc<dyn AlertDispatcher>,
    poll_interval: Duration,
}

impl ReminderScheduler {
    pub fn new(
        catalog: ReminderCatalog,
        rollover_policy: RolloverPolicy,
        clock: Arc<dyn Clock>,
        dispatcher: Arc<dyn AlertDispatcher>,
        poll_interval: Duration,
    ) -> Self {
        let firing_state = FiringState::new(catalog.fire_times());

        Self {
            catalog,
            firing_state,
            rollover: DayRolloverDetector::new(rollover_policy),
            clock,
            dispatcher,
            poll_interval,
        }
    }

    pub fn firing_state(&self) -> &FiringState {
        &self.firing_state
    }

    /// Runs a single poll cycle.
    pub async fn poll(&mut self) -> anyhow::Result<PollOutcome> {
        let now = self.clock.now().context("Could not read the clock")?;
        self.poll_at(now).await
    }

    async fn poll_at(&mut self, now: NaiveDateTime) -> anyhow::Result<PollOutcome> {
        let rolled_over = self.rollover.observe(now.date());
        if rolled_over {
            log::info!("New day {}, resetting reminders.", now.date());
            self.firing_state.reset_all();
        }

        let current_time = ReminderFireTime::new(now.time());
        let mut fired = Vec::new();

        for entry in self.catalog.entries() {
            if entry.fire_at != current_time || self.firing_state.is_fired(&entry.fire_at)? {
                continue;
            }

            self.firing_state.mark_fired(&entry.fire_at)?;
            log::info!(
                "Firing reminder. [fire_at = {}, recurring = {}]",
                entry.fire_at,
                entry.is_recurring()
            );
            self.dispatcher.dispatch(&entry.text).await;
            fired.push(entry.fire_at);
        }

        Ok(PollOutcome { rolled_over, fired })
    }

    /// Polls until `cancellation_token` is cancelled.
    pub async fn run(mut self, cancellation_token: CancellationToken) {
        log::info!(
            "Starting reminder scheduler. [reminders = {}, poll_interval = {:?}]",
            self.catalog.len(),
            self.poll_interval
        );

        loop {
            match self.poll().await {
                Ok(outcome) => log::debug!("Poll finished. {outcome:?}"),
                Err(error) => log::warn!("Skipping poll cycle. [error = {error:#}]"),
            }

            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("Reminder scheduler shutting down");
                    break;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}
