use super::{
    controls::ControlInputs, history::TelemetryHistory, mission_log::LogEntry,
    mission_state::MissionState, telemetry::Telemetry,
};
use serde::Serialize;

/// Read-only copy of everything the dashboard displays.
#[derive(Debug, Clone, Serialize)]
pub struct MissionSnapshot {
    /// Status badge text.
    pub status: String,
    pub state: MissionState,
    pub telemetry: Telemetry,
    pub history: TelemetryHistory,
    pub controls: ControlInputs,
    /// Remaining countdown seconds, if a countdown is running.
    pub countdown: Option<u8>,
    /// Current stage number, `1` before launch.
    pub stage: u8,
    pub countdown_progress: f64,
    pub log: Vec<LogEntry>,
}

impl MissionSnapshot {
    /// Serializes the snapshot as pretty printed JSON.
    ///
    /// # Errors
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
