use std::collections::HashMap;

use thiserror::Error;

use crate::reminder::ReminderFireTime;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("No reminder is scheduled at {0}")]
pub struct UnknownFireTime(pub ReminderFireTime);

/// Tracks which reminder slots already fired since the last rollover.
#[derive(Debug, Clone)]
pub struct FiringState {
    fired: HashMap<ReminderFireTime, bool>,
}

impl FiringState {
    /// Every slot starts unfired.
    pub fn new(fire_times: impl IntoIterator<Item = ReminderFireTime>) -> Self {
        let fired = fire_times.into_iter().map(|time| (time, false)).collect();
        Self { fired }
    }

    pub fn is_fired(&self, time: &ReminderFireTime) -> Result<bool, UnknownFireTime> {
        self.fired.get(time).copied().ok_or(UnknownFireTime(*time))
    }

    pub fn mark_fired(&mut self, time: &ReminderFireTime) -> Result<(), UnknownFireTime> {
        let fired = self.fired.get_mut(time).ok_or(UnknownFireTime(*time))?;
        *fired = true;
        Ok(())
    }

    pub fn reset_all(&mut self) {
        self.fired.values_mut().for_each(|fired| *fired = false);
    }

    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(value: &str) -> ReminderFireTime {
        value.parse().unwrap()
    }

    #[test]
    fn starts_with_every_slot_unfired() {
        let state = FiringState::new([time("09:00"), time("13:00")]);

        assert_eq!(state.len(), 2);
        assert_eq!(state.is_fired(&time("09:00")), Ok(false));
        assert_eq!(state.is_fired(&time("13:00")), Ok(false));
    }

    #[test]
    fn mark_fired_is_idempotent() {
        let mut state = FiringState::new([time("13:00")]);

        state.mark_fired(&time("13:00")).unwrap();
        state.mark_fired(&time("13:00")).unwrap();

        assert_eq!(state.is_fired(&time("13:00")), Ok(true));
    }

    #[test]
    fn reset_all_clears_every_flag() {
        let mut state = FiringState::new([time("09:00"), time("13:00")]);
        state.mark_fired(&time("09:00")).unwrap();
        state.mark_fired(&time("13:00")).unwrap();

        state.reset_all();

        assert_eq!(state.is_fired(&time("09:00")), Ok(false));
        assert_eq!(state.is_fired(&time("13:00")), Ok(false));
    }

    #[test]
    fn unknown_slot_is_an_error() {
        let mut state = FiringState::new([time("13:00")]);

        assert_eq!(
            state.is_fired(&time("14:00")),
            Err(UnknownFireTime(time("14:00")))
        );
        assert_eq!(
            state.mark_fired(&time("14:00")),
            Err(UnknownFireTime(time("14:00")))
        );
    }
}
