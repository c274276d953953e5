use std::{env, time::Duration};
use strum_macros::Display;

/// Runtime configuration of the mission loop, read from the environment at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Frames per second of the simulation tick.
    frame_rate_hz: u32,
    /// Interval between two rendered dashboard status lines.
    status_interval: Duration,
}

/// Errors raised while reading [`SimConfig`] from the environment.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable is set but is not an unsigned integer.
    #[strum(to_string = "{var} is not a valid unsigned integer: '{value}'")]
    Malformed { var: &'static str, value: String },
    /// The variable parsed, but lies outside of the accepted range.
    #[strum(to_string = "{var} is out of range: {value}")]
    OutOfRange { var: &'static str, value: u64 },
}

impl std::error::Error for ConfigError {}

impl SimConfig {
    pub const FRAME_RATE_VAR: &'static str = "MISSION_FRAME_HZ";
    pub const STATUS_INTERVAL_VAR: &'static str = "MISSION_STATUS_MS";

    const DEF_FRAME_RATE_HZ: u32 = 60;
    const MAX_FRAME_RATE_HZ: u32 = 240;
    const DEF_STATUS_MS: u64 = 1000;
    const MIN_STATUS_MS: u64 = 50;

    pub fn new(frame_rate_hz: u32, status_interval: Duration) -> Self {
        Self { frame_rate_hz, status_interval }
    }

    /// Reads the configuration from the process environment.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if a variable is malformed or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if a value is malformed or out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where F: Fn(&str) -> Option<String> {
        let frame_rate = Self::read_u64(&lookup, Self::FRAME_RATE_VAR)?
            .unwrap_or(u64::from(Self::DEF_FRAME_RATE_HZ));
        if frame_rate == 0 || frame_rate > u64::from(Self::MAX_FRAME_RATE_HZ) {
            return Err(ConfigError::OutOfRange { var: Self::FRAME_RATE_VAR, value: frame_rate });
        }
        let status_ms =
            Self::read_u64(&lookup, Self::STATUS_INTERVAL_VAR)?.unwrap_or(Self::DEF_STATUS_MS);
        if status_ms < Self::MIN_STATUS_MS {
            return Err(ConfigError::OutOfRange { var: Self::STATUS_INTERVAL_VAR, value: status_ms });
        }
        let frame_rate_hz = u32::try_from(frame_rate)
            .map_err(|_| ConfigError::OutOfRange { var: Self::FRAME_RATE_VAR, value: frame_rate })?;
        Ok(Self::new(frame_rate_hz, Duration::from_millis(status_ms)))
    }

    fn read_u64<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
    where F: Fn(&str) -> Option<String> {
        match lookup(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| ConfigError::Malformed { var: key, value: raw }),
        }
    }

    pub fn frame_rate_hz(&self) -> u32 { self.frame_rate_hz }

    /// Wall clock period between two simulation frames.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate_hz
    }

    pub fn status_interval(&self) -> Duration { self.status_interval }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(
            Self::DEF_FRAME_RATE_HZ,
            Duration::from_millis(Self::DEF_STATUS_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SimConfig};
    use std::{collections::HashMap, time::Duration};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SimConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.frame_rate_hz(), 60);
        assert_eq!(config.status_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let config = SimConfig::from_lookup(lookup_from(&[
            (SimConfig::FRAME_RATE_VAR, "30"),
            (SimConfig::STATUS_INTERVAL_VAR, " 250 "),
        ]))
        .unwrap();
        assert_eq!(config.frame_rate_hz(), 30);
        assert_eq!(config.frame_period(), Duration::from_secs(1) / 30);
        assert_eq!(config.status_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_bad_values() {
        let malformed = SimConfig::from_lookup(lookup_from(&[(SimConfig::FRAME_RATE_VAR, "fast")]));
        assert_eq!(
            malformed,
            Err(ConfigError::Malformed {
                var: SimConfig::FRAME_RATE_VAR,
                value: "fast".to_string()
            })
        );
        let zero = SimConfig::from_lookup(lookup_from(&[(SimConfig::FRAME_RATE_VAR, "0")]));
        assert_eq!(
            zero,
            Err(ConfigError::OutOfRange { var: SimConfig::FRAME_RATE_VAR, value: 0 })
        );
        let too_fast = SimConfig::from_lookup(lookup_from(&[(SimConfig::FRAME_RATE_VAR, "1000")]));
        assert!(matches!(too_fast, Err(ConfigError::OutOfRange { value: 1000, .. })));
        let status = SimConfig::from_lookup(lookup_from(&[(SimConfig::STATUS_INTERVAL_VAR, "10")]));
        assert!(matches!(status, Err(ConfigError::OutOfRange { value: 10, .. })));
    }
}
