use serde::Serialize;

/// Operator inputs of the launch console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlInputs {
    armed: bool,
    /// Engine throttle in percent, always in `[0, 100]`.
    throttle: u8,
}

impl ControlInputs {
    pub const DEF_THROTTLE: u8 = 60;
    pub const MAX_THROTTLE: u8 = 100;

    pub fn new() -> Self {
        Self { armed: false, throttle: Self::DEF_THROTTLE }
    }

    pub fn armed(&self) -> bool { self.armed }

    pub fn throttle(&self) -> u8 { self.throttle }

    /// Throttle as a fraction in `[0, 1]`.
    pub fn throttle_fraction(&self) -> f64 {
        f64::from(self.throttle) / f64::from(Self::MAX_THROTTLE)
    }

    pub fn set_armed(&mut self, armed: bool) { self.armed = armed; }

    /// Stores the throttle clamped into `[0, 100]` and returns the stored value.
    pub fn set_throttle(&mut self, percent: i64) -> u8 {
        let clamped = percent.clamp(0, i64::from(Self::MAX_THROTTLE));
        self.throttle = u8::try_from(clamped).unwrap_or(Self::MAX_THROTTLE);
        self.throttle
    }
}

impl Default for ControlInputs {
    fn default() -> Self { Self::new() }
}
