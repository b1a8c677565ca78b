mod clock;
mod firing_state;
mod rollover;
mod scheduler;

pub use clock::{Clock, LocalClock, ZonedClock};
pub use firing_state::{FiringState, UnknownFireTime};
pub use rollover::{DayRolloverDetector, RolloverPolicy};
pub use scheduler::{PollOutcome, ReminderScheduler};
