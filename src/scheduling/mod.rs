//! Timing for the flight simulation: clocks, the countdown timer and the
//! single update loop that owns the simulation.

mod clock;
mod countdown_timer;
mod mission_loop;
mod mission_scheduler;

#[cfg(test)]
mod tests;

pub use clock::{MissionClock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use countdown_timer::CountdownTimer;
pub use mission_loop::MissionLoop;
pub use mission_scheduler::MissionScheduler;
