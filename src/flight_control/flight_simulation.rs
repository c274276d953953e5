use super::{
    command::MissionCommand,
    controls::ControlInputs,
    dynamics,
    history::TelemetryHistory,
    mission_log::{LogEntry, MissionLog},
    mission_state::{MissionPhase, MissionState, Stage},
    snapshot::MissionSnapshot,
    telemetry::Telemetry,
};
use crate::scheduling::MissionClock;
use crate::{event, warn};
use std::sync::Arc;

/// The flight simulation engine.
///
/// Owns the complete mission state. Commands mutate the control inputs or the
/// launch sequence, [`FlightSimulation::tick`] advances the vehicle by one
/// frame and [`FlightSimulation::countdown_step`] advances the countdown by one
/// second. Policy rejections end up in the mission log, never in an `Err`.
pub struct FlightSimulation {
    telemetry: Telemetry,
    history: TelemetryHistory,
    controls: ControlInputs,
    phase: MissionPhase,
    log: MissionLog,
    stage_separation_logged: bool,
    fuel_depletion_logged: bool,
    clock: Arc<dyn MissionClock>,
}

impl FlightSimulation {
    pub const MSG_INIT: &'static str = "Mission Control initialized. Systems in standby.";
    pub const MSG_BLOCKED: &'static str = "Launch blocked: System not armed.";
    pub const MSG_SEQUENCE_START: &'static str = "Auto-sequence start. T-10 seconds.";
    pub const MSG_LIFTOFF: &'static str = "Ignition. Liftoff!";
    pub const MSG_ABORT: &'static str = "Abort received. Countdown halted.";
    pub const MSG_ABORT_IGNORED: &'static str = "Abort command ignored: Vehicle already launched.";
    pub const MSG_RESET: &'static str = "Mission reset. Systems in standby.";
    pub const MSG_SEPARATION: &'static str =
        "Main engine cutoff confirmed. Stage separation nominal.";
    pub const MSG_BALLISTIC: &'static str = "Fuel depleted. Beginning ballistic trajectory.";

    /// Creates a simulation on the pad with a single initialization log entry.
    pub fn new(clock: Arc<dyn MissionClock>) -> Self {
        let mut sim = Self {
            telemetry: Telemetry::on_pad(),
            history: TelemetryHistory::new(),
            controls: ControlInputs::new(),
            phase: MissionPhase::Idle,
            log: MissionLog::new(),
            stage_separation_logged: false,
            fuel_depletion_logged: false,
            clock,
        };
        sim.append_log(Self::MSG_INIT);
        sim
    }

    fn append_log(&mut self, message: &str) {
        event!("Mission log: {message}");
        self.log.push(LogEntry::new(self.clock.now(), message));
    }

    /// Dispatches a [`MissionCommand`] to the matching operation.
    pub fn apply(&mut self, command: MissionCommand) {
        match command {
            MissionCommand::Arm(armed) => self.arm(armed),
            MissionCommand::SetThrottle(percent) => self.set_throttle(percent),
            MissionCommand::Initiate => self.initiate(),
            MissionCommand::Abort => self.abort(),
            MissionCommand::Reset => self.reset(),
        }
    }

    /// Sets the arming switch. Ignored once the vehicle is in flight.
    pub fn arm(&mut self, armed: bool) {
        if self.phase.is_launched() {
            warn!("Arm switch is locked in flight, ignoring request.");
            return;
        }
        self.controls.set_armed(armed);
    }

    /// Sets the throttle, clamped into `[0, 100]`. Ignored once the vehicle is in flight.
    pub fn set_throttle(&mut self, percent: i64) {
        if self.phase.is_launched() {
            warn!("Throttle is locked in flight, ignoring request.");
            return;
        }
        let stored = self.controls.set_throttle(percent);
        event!("Throttle set to {stored}%");
    }

    /// Starts the terminal countdown.
    ///
    /// Logs a blocked launch if the system is not armed and does nothing if a
    /// sequence is already running or the vehicle has launched.
    pub fn initiate(&mut self) {
        if !self.controls.armed() {
            self.append_log(Self::MSG_BLOCKED);
            return;
        }
        if self.phase != MissionPhase::Idle {
            return;
        }
        self.phase = MissionPhase::Countdown(MissionPhase::COUNTDOWN_START);
        self.append_log(Self::MSG_SEQUENCE_START);
    }

    /// Halts a running countdown. In flight the request is logged and ignored.
    pub fn abort(&mut self) {
        match self.phase {
            MissionPhase::Countdown(_) => {
                self.phase = MissionPhase::Idle;
                self.append_log(Self::MSG_ABORT);
            }
            MissionPhase::Flight(_) => self.append_log(Self::MSG_ABORT_IGNORED),
            MissionPhase::Idle => (),
        }
    }

    /// Returns every piece of state to its initial value and logs the reset.
    pub fn reset(&mut self) {
        self.controls = ControlInputs::new();
        self.phase = MissionPhase::Idle;
        self.telemetry = Telemetry::on_pad();
        self.history.clear();
        self.stage_separation_logged = false;
        self.fuel_depletion_logged = false;
        self.log.clear();
        self.append_log(Self::MSG_RESET);
    }

    /// Advances the countdown by one second, lifting off when it reaches zero.
    pub fn countdown_step(&mut self) {
        if let MissionPhase::Countdown(n) = self.phase {
            let remaining = n.saturating_sub(1);
            if remaining == 0 {
                self.phase = MissionPhase::Flight(Stage::Booster);
                self.append_log(Self::MSG_LIFTOFF);
            } else {
                self.phase = MissionPhase::Countdown(remaining);
            }
        }
    }

    /// Advances the simulation by one frame of `elapsed_secs`, clamped into
    /// `[0, 0.05]` seconds.
    pub fn tick(&mut self, elapsed_secs: f64) {
        let dt = dynamics::clamp_dt(elapsed_secs);
        let phase = self.phase;
        let thr = self.controls.throttle_fraction();
        let mut next = self.telemetry;

        next.fuel = (next.fuel - dynamics::burn_rate(phase, thr) * dt).max(0.0);

        let thrust = dynamics::thrust_accel(phase, thr, next.fuel);
        let accel = dynamics::net_accel(phase, thrust, next.speed);
        next.speed = (next.speed + accel * dt).max(0.0);
        next.altitude = (next.altitude + next.speed * dt).max(0.0);

        match phase {
            MissionPhase::Flight(stage) => {
                next.pitch = (next.pitch - dynamics::PITCH_OVER_RATE * dt).max(0.0);
                next.yaw = dynamics::wrap_degrees(next.yaw, dynamics::YAW_RATE * dt);
                next.roll = dynamics::wrap_degrees(next.roll, stage.roll_rate() * dt);
                next.gforce = dynamics::flight_gforce(thrust);
            }
            MissionPhase::Countdown(_) => next.gforce = dynamics::COUNTDOWN_GFORCE,
            MissionPhase::Idle => next.gforce = 1.0,
        }

        self.telemetry = next;
        self.history.record(&next);

        if phase == MissionPhase::Flight(Stage::Booster)
            && !self.stage_separation_logged
            && dynamics::separation_due(next.altitude, next.fuel)
        {
            self.phase = MissionPhase::Flight(Stage::Upper);
            self.stage_separation_logged = true;
            self.append_log(Self::MSG_SEPARATION);
        }

        if phase.is_launched() && !self.fuel_depletion_logged && next.fuel <= 0.0 && next.speed > 0.0
        {
            self.fuel_depletion_logged = true;
            self.append_log(Self::MSG_BALLISTIC);
        }
    }

    pub fn telemetry(&self) -> &Telemetry { &self.telemetry }

    pub fn history(&self) -> &TelemetryHistory { &self.history }

    pub fn controls(&self) -> &ControlInputs { &self.controls }

    pub fn phase(&self) -> MissionPhase { self.phase }

    pub fn mission_log(&self) -> &MissionLog { &self.log }

    pub fn mission_state(&self) -> MissionState {
        MissionState::from_parts(self.phase, self.controls.armed())
    }

    /// Status badge text, e.g. `T-7s` or `Flight • Stage 2`.
    pub fn status(&self) -> String { self.mission_state().to_string() }

    /// Fraction of the countdown already elapsed, `0.0` outside of a countdown.
    pub fn countdown_progress(&self) -> f64 {
        self.phase.countdown().map_or(0.0, |n| {
            1.0 - f64::from(n) / f64::from(MissionPhase::COUNTDOWN_START)
        })
    }

    /// Whether an `initiate` command would start the countdown.
    pub fn can_launch(&self) -> bool {
        self.controls.armed() && self.phase == MissionPhase::Idle
    }

    /// Whether an `abort` command would halt anything.
    pub fn abort_available(&self) -> bool { self.phase.is_counting_down() }

    /// Whether arm switch and throttle are locked.
    pub fn controls_locked(&self) -> bool { self.phase.is_launched() }

    /// Copies the operator visible state.
    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot {
            status: self.status(),
            state: self.mission_state(),
            telemetry: self.telemetry,
            history: self.history.clone(),
            controls: self.controls,
            countdown: self.phase.countdown(),
            stage: self.phase.stage().unwrap_or(Stage::Booster).number(),
            countdown_progress: self.countdown_progress(),
            log: self.log.entries().to_vec(),
        }
    }
}
