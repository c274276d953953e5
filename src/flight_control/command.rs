use strum_macros::Display;

/// A command accepted by the flight simulation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MissionCommand {
    /// Sets or clears the arming switch.
    Arm(bool),
    /// Requests a throttle setting in percent, clamped by the engine.
    SetThrottle(i64),
    Initiate,
    Abort,
    Reset,
}
