//! Simplified launch vehicle dynamics.
//!
//! All rates are per second and all functions are pure, so a frame update is
//! fully determined by the previous telemetry, the launch phase and the throttle.

use super::mission_state::{MissionPhase, Stage};

/// Standard gravity in m/s².
pub const GRAVITY: f64 = 9.81;
/// Longest integration step accepted for a single frame in seconds.
pub const MAX_FRAME_DT: f64 = 0.05;
/// Engine acceleration at full throttle in m/s².
pub const MAX_THRUST_ACCEL: f64 = 40.0;
/// Linear drag coefficient in 1/s.
pub const DRAG_COEFF: f64 = 0.02;

/// Main stage propellant burn at full throttle in %/s.
pub const FLIGHT_BURN: f64 = 0.6;
/// Additional burn of the upper stage at full throttle in %/s.
pub const UPPER_STAGE_EXTRA_BURN: f64 = 0.2;
/// Chill down burn during the countdown at full throttle in %/s.
pub const COUNTDOWN_BURN: f64 = 0.1;
/// Boil-off while idling on the pad in %/s, independent of throttle.
pub const PAD_BOIL_OFF: f64 = 0.02;

/// Load factor shown while the engines spin up during the countdown.
pub const COUNTDOWN_GFORCE: f64 = 1.05;

pub const PITCH_OVER_RATE: f64 = 3.0;
pub const YAW_RATE: f64 = 5.0;

/// Altitude in m the booster has to pass before separating.
pub const SEPARATION_ALTITUDE: f64 = 35_000.0;
/// Fuel level in % the booster has to drop below before separating.
pub const SEPARATION_FUEL: f64 = 60.0;

/// Clamps a raw frame delta into `[0, MAX_FRAME_DT]`. `NaN` maps to zero.
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_FRAME_DT) }
}

/// Propellant burn rate in %/s for the given phase and throttle fraction.
pub fn burn_rate(phase: MissionPhase, thr: f64) -> f64 {
    match phase {
        MissionPhase::Flight(Stage::Booster) => FLIGHT_BURN * thr,
        MissionPhase::Flight(Stage::Upper) => FLIGHT_BURN * thr + UPPER_STAGE_EXTRA_BURN * thr,
        MissionPhase::Countdown(_) => COUNTDOWN_BURN * thr,
        MissionPhase::Idle => PAD_BOIL_OFF,
    }
}

/// Engine acceleration in m/s². Only produced in flight with propellant left.
pub fn thrust_accel(phase: MissionPhase, thr: f64, fuel: f64) -> f64 {
    match phase {
        MissionPhase::Flight(stage) if fuel > 0.0 => MAX_THRUST_ACCEL * thr * stage.thrust_factor(),
        _ => 0.0,
    }
}

/// Net acceleration in m/s² after gravity and drag. The vehicle is held down
/// on the pad, so there is no acceleration outside of flight.
pub fn net_accel(phase: MissionPhase, thrust: f64, speed: f64) -> f64 {
    if phase.is_launched() { thrust - GRAVITY - DRAG_COEFF * speed } else { 0.0 }
}

/// Load factor in flight.
pub fn flight_gforce(thrust: f64) -> f64 { 1.0 + ((thrust - GRAVITY) / GRAVITY).max(0.0) }

/// Advances an angle and wraps it into `[0, 360)`.
pub fn wrap_degrees(angle: f64, delta: f64) -> f64 { (angle + delta).rem_euclid(360.0) }

/// Whether the booster should separate given the current altitude and fuel.
pub fn separation_due(altitude: f64, fuel: f64) -> bool {
    altitude > SEPARATION_ALTITUDE && fuel < SEPARATION_FUEL
}
