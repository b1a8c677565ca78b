use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// A new day starts whenever the full sampled date is after the tracked one.
    #[default]
    CalendarDate,
    /// Legacy check: the day of month grew or wrapped to the 1st.
    /// Misses a change when a gap lands on the same day number of a later month.
    DayOfMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorState {
    Uninitialized,
    Tracking(NaiveDate),
}

#[derive(Debug, Clone)]
pub struct DayRolloverDetector {
    policy: RolloverPolicy,
    state: DetectorState,
}

impl DayRolloverDetector {
    pub fn new(policy: RolloverPolicy) -> Self {
        Self {
            policy,
            state: DetectorState::Uninitialized,
        }
    }

    /// Feeds one sampled date. Returns `true` when a new calendar day started.
    ///
    /// The first observation always counts as a rollover so a fresh process
    /// begins from a clean firing state.
    pub fn observe(&mut self, date: NaiveDate) -> bool {
        let is_new_day = match (self.state, self.policy) {
            (DetectorState::Uninitialized, _) => true,
            (DetectorState::Tracking(last), RolloverPolicy::CalendarDate) => date > last,
            (DetectorState::Tracking(last), RolloverPolicy::DayOfMonth) => {
                date != last && (date.day() == 1 || date.day() > last.day())
            }
        };

        if is_new_day {
            self.state = DetectorState::Tracking(date);
        }

        is_new_day
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        match self.state {
            DetectorState::Uninitialized => None,
            DetectorState::Tracking(date) => Some(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_observation_is_a_rollover() {
        for policy in [RolloverPolicy::CalendarDate, RolloverPolicy::DayOfMonth] {
            let mut detector = DayRolloverDetector::new(policy);

            assert!(detector.observe(date(2025, 5, 31)), "policy = {policy:?}");
            assert_eq!(detector.last_date(), Some(date(2025, 5, 31)));
        }
    }

    #[test]
    fn same_day_is_not_a_rollover() {
        let mut detector = DayRolloverDetector::new(RolloverPolicy::CalendarDate);
        detector.observe(date(2025, 5, 30));

        assert!(!detector.observe(date(2025, 5, 30)));
        assert!(!detector.observe(date(2025, 5, 30)));
    }

    #[test]
    fn month_and_year_wrap_are_rollovers() {
        let mut detector = DayRolloverDetector::new(RolloverPolicy::CalendarDate);
        detector.observe(date(2025, 5, 31));

        assert!(detector.observe(date(2025, 6, 1)));
        detector.observe(date(2025, 12, 31));
        assert!(detector.observe(date(2026, 1, 1)));
    }

    #[test]
    fn calendar_date_catches_same_day_number_next_month() {
        let mut detector = DayRolloverDetector::new(RolloverPolicy::CalendarDate);
        detector.observe(date(2025, 5, 15));

        assert!(detector.observe(date(2025, 6, 15)));
    }

    #[test]
    fn day_of_month_misses_same_day_number_next_month() {
        let mut detector = DayRolloverDetector::new(RolloverPolicy::DayOfMonth);
        detector.observe(date(2025, 5, 15));

        assert!(!detector.observe(date(2025, 6, 15)));
        assert_eq!(detector.last_date(), Some(date(2025, 5, 15)));
    }

    #[test]
    fn day_of_month_treats_the_first_as_a_new_day() {
        let mut detector = DayRolloverDetector::new(RolloverPolicy::DayOfMonth);
        detector.observe(date(2025, 1, 31));

        assert!(detector.observe(date(2025, 2, 1)));
        assert!(detector.observe(date(2025, 2, 2)));
    }

    #[test]
    fn day_of_month_signals_once_on_the_first() {
        let mut detector = DayRolloverDetector::new(RolloverPolicy::DayOfMonth);
        detector.observe(date(2025, 5, 31));

        assert!(detector.observe(date(2025, 6, 1)));
        assert!(!detector.observe(date(2025, 6, 1)));
        assert!(!detector.observe(date(2025, 6, 1)));
        assert!(detector.observe(date(2025, 6, 2)));
    }

    #[test]
    fn first_observation_of_the_earliest_date_is_a_rollover() {
        for policy in [RolloverPolicy::CalendarDate, RolloverPolicy::DayOfMonth] {
            let mut detector = DayRolloverDetector::new(policy);

            assert!(detector.observe(NaiveDate::MIN), "policy = {policy:?}");
            assert!(!detector.observe(NaiveDate::MIN), "policy = {policy:?}");
        }
    }

    #[test]
    fn clock_going_backwards_keeps_tracked_date() {
        let mut detector = DayRolloverDetector::new(RolloverPolicy::CalendarDate);
        detector.observe(date(2025, 5, 31));

        assert!(!detector.observe(date(2025, 5, 30)));
        assert_eq!(detector.last_date(), Some(date(2025, 5, 31)));
        assert!(!detector.observe(date(2025, 5, 31)));
        assert!(detector.observe(date(2025, 6, 1)));
    }

    proptest! {
        #[test]
        fn signals_exactly_on_day_transitions(
            start in arb::<NaiveDate>(),
            steps in proptest::collection::vec((0u64..3, 1usize..4), 1..20),
        ) {
            prop_assume!(start.checked_add_days(Days::new(60)).is_some());

            let mut detector = DayRolloverDetector::new(RolloverPolicy::CalendarDate);
            prop_assert!(detector.observe(start));

            let mut current = start;
            for (advance, polls) in steps {
                current = current.checked_add_days(Days::new(advance)).unwrap();
                for poll in 0..polls {
                    let expected = advance > 0 && poll == 0;
                    prop_assert_eq!(detector.observe(current), expected);
                }
            }
        }
    }
}
