use serde::Serialize;

/// A single frame of simulated vehicle telemetry.
///
/// Angles are in degrees, `pitch` 90° means vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Telemetry {
    /// Speed in m/s, never negative.
    pub speed: f64,
    /// Altitude in m, never negative.
    pub altitude: f64,
    /// Remaining propellant in percent, always in `[0, 100]`.
    pub fuel: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    /// Load factor as a multiple of standard gravity.
    pub gforce: f64,
}

impl Telemetry {
    pub const FULL_TANK: f64 = 100.0;
    pub const VERTICAL_PITCH: f64 = 90.0;

    /// Telemetry of the vehicle resting on the pad with full tanks.
    pub const fn on_pad() -> Self {
        Self {
            speed: 0.0,
            altitude: 0.0,
            fuel: Self::FULL_TANK,
            pitch: Self::VERTICAL_PITCH,
            yaw: 0.0,
            roll: 0.0,
            gforce: 1.0,
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self { Self::on_pad() }
}
