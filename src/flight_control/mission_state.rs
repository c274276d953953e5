use serde::Serialize;
use std::fmt::{Display, Formatter};
#[cfg(test)]
use strum_macros::EnumIter;

/// Discrete vehicle stage. Stage 2 is only ever entered from stage 1.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(test, derive(EnumIter))]
pub enum Stage {
    /// The booster stage lifting off the pad.
    Booster,
    /// The upper stage after separation.
    Upper,
}

impl Stage {
    /// Numeric stage index as shown to the operator.
    pub fn number(self) -> u8 {
        match self {
            Stage::Booster => 1,
            Stage::Upper => 2,
        }
    }

    /// Multiplier applied to the nominal engine thrust.
    pub fn thrust_factor(self) -> f64 {
        match self {
            Stage::Booster => 1.0,
            Stage::Upper => 0.6,
        }
    }

    /// Roll rate in degrees per second while flying this stage.
    pub fn roll_rate(self) -> f64 {
        match self {
            Stage::Booster => 20.0,
            Stage::Upper => 10.0,
        }
    }
}

/// Phase of the launch sequence, independent of the arming switch.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize)]
pub enum MissionPhase {
    /// On the pad, no sequence running.
    #[default]
    Idle,
    /// Terminal countdown with the remaining seconds.
    Countdown(u8),
    /// Vehicle has left the pad.
    Flight(Stage),
}

impl MissionPhase {
    /// Length of the terminal countdown in seconds.
    pub const COUNTDOWN_START: u8 = 10;

    pub fn is_counting_down(self) -> bool { matches!(self, MissionPhase::Countdown(_)) }

    pub fn is_launched(self) -> bool { matches!(self, MissionPhase::Flight(_)) }

    pub fn countdown(self) -> Option<u8> {
        match self {
            MissionPhase::Countdown(n) => Some(n),
            _ => None,
        }
    }

    pub fn stage(self) -> Option<Stage> {
        match self {
            MissionPhase::Flight(stage) => Some(stage),
            _ => None,
        }
    }
}

/// Operator facing mission state combining the launch phase and the arming switch.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum MissionState {
    Standby,
    Armed,
    Countdown(u8),
    Flight(Stage),
}

impl Display for MissionState {
    /// Formats the status badge: `Safe`, `Armed`, `T-Ns` or `Flight • Stage N`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionState::Standby => write!(f, "Safe"),
            MissionState::Armed => write!(f, "Armed"),
            MissionState::Countdown(n) => write!(f, "T-{n}s"),
            MissionState::Flight(stage) => write!(f, "Flight • Stage {}", stage.number()),
        }
    }
}

impl MissionState {
    /// Derives the displayed state. A running countdown or flight takes
    /// precedence over the arming switch.
    pub fn from_parts(phase: MissionPhase, armed: bool) -> Self {
        match phase {
            MissionPhase::Countdown(n) => MissionState::Countdown(n),
            MissionPhase::Flight(stage) => MissionState::Flight(stage),
            MissionPhase::Idle if armed => MissionState::Armed,
            MissionPhase::Idle => MissionState::Standby,
        }
    }
}
