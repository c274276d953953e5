use super::countdown_timer::CountdownTimer;
use crate::event;
use crate::flight_control::{FlightSimulation, MissionCommand};
use std::time::Duration;

/// Single owner of the flight simulation.
///
/// Multiplexes the per-frame tick and the one second countdown clock onto one
/// sequential update, so a frame never observes a half applied countdown step.
pub struct MissionScheduler {
    sim: FlightSimulation,
    countdown: CountdownTimer,
}

impl MissionScheduler {
    pub fn new(sim: FlightSimulation) -> Self {
        Self { sim, countdown: CountdownTimer::new() }
    }

    /// Applies an operator command.
    ///
    /// The countdown clock restarts whenever a countdown begins and is dropped
    /// whenever no countdown is running afterwards.
    pub fn apply(&mut self, command: MissionCommand) {
        let was_counting = self.sim.phase().is_counting_down();
        event!("Applying command {command}");
        self.sim.apply(command);
        if !(was_counting && self.sim.phase().is_counting_down()) {
            self.countdown.clear();
        }
    }

    /// Advances the mission by `elapsed` wall clock time.
    ///
    /// Runs one simulation frame, then performs every countdown decrement that
    /// became due within `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        self.sim.tick(elapsed.as_secs_f64());
        if !self.sim.phase().is_counting_down() {
            self.countdown.clear();
            return;
        }
        let due = self.countdown.accumulate(elapsed);
        for _ in 0..due {
            self.sim.countdown_step();
            if !self.sim.phase().is_counting_down() {
                self.countdown.clear();
                break;
            }
        }
    }

    pub fn sim(&self) -> &FlightSimulation { &self.sim }

    /// Time until the next countdown decrement, if a countdown is running.
    pub fn next_countdown_step(&self) -> Option<Duration> {
        self.sim.phase().is_counting_down().then(|| self.countdown.until_next())
    }
}
