use crate::flight_control::{HistoryBuffer, LogEntry, MissionLog, MissionSnapshot};
use crate::mission;
use std::fmt::{Display, Formatter};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders `buffer` as a one line text chart, oldest sample first.
///
/// Samples are normalised between the buffer's minimum and maximum. A flat
/// series renders on the lowest level.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sparkline(buffer: &HistoryBuffer) -> String {
    const TOP: f64 = 7.0;
    let Some((min, max)) = buffer.extent() else {
        return String::new();
    };
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    buffer
        .iter()
        .map(|sample| {
            let level = (((sample - min) / range) * TOP).round().clamp(0.0, TOP);
            SPARK_LEVELS[level as usize]
        })
        .collect()
}

/// Panel values of one dashboard refresh, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub status: String,
    pub velocity: String,
    pub altitude: String,
    pub fuel: String,
    pub gforce: String,
    pub attitude: String,
    pub max_altitude: String,
    pub countdown: String,
    pub progress: String,
    pub stage: String,
    pub throttle: String,
    pub speed_trend: String,
    pub altitude_trend: String,
    pub fuel_trend: String,
    pub gforce_trend: String,
}

impl DashboardView {
    const NO_COUNTDOWN: &'static str = "—";

    pub fn from_snapshot(snapshot: &MissionSnapshot) -> Self {
        let telemetry = &snapshot.telemetry;
        let history = &snapshot.history;
        Self {
            status: snapshot.status.clone(),
            velocity: format!("{:.1} m/s", telemetry.speed),
            altitude: format!("{:.2} km", telemetry.altitude / 1000.0),
            fuel: format!("{:.1} %", telemetry.fuel),
            gforce: format!("{:.2} g", telemetry.gforce),
            attitude: format!(
                "P {:.0}° Y {:.0}° R {:.0}°",
                telemetry.pitch, telemetry.yaw, telemetry.roll
            ),
            max_altitude: format!("{:.1} km", history.altitude.max_or_zero() / 1000.0),
            countdown: snapshot
                .countdown
                .map_or_else(|| Self::NO_COUNTDOWN.to_string(), |n| format!("T-{n}s")),
            progress: format!("{:.0}%", snapshot.countdown_progress * 100.0),
            stage: format!("Stage {}", snapshot.stage),
            throttle: format!(
                "{}% {}",
                snapshot.controls.throttle(),
                if snapshot.controls.armed() { "ARMED" } else { "SAFE" }
            ),
            speed_trend: sparkline(&history.speed),
            altitude_trend: sparkline(&history.altitude),
            fuel_trend: sparkline(&history.fuel),
            gforce_trend: sparkline(&history.gforce),
        }
    }
}

impl Display for DashboardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "[{}] {} | countdown {} ({}) | throttle {}",
            self.status, self.stage, self.countdown, self.progress, self.throttle
        )?;
        writeln!(f, "  velocity {:>12} {}", self.velocity, self.speed_trend)?;
        writeln!(
            f,
            "  altitude {:>12} {} (max {})",
            self.altitude, self.altitude_trend, self.max_altitude
        )?;
        writeln!(f, "  fuel     {:>12} {}", self.fuel, self.fuel_trend)?;
        writeln!(f, "  g-force  {:>12} {}", self.gforce, self.gforce_trend)?;
        write!(f, "  attitude {}", self.attitude)
    }
}

/// Tracks which mission log entries were already echoed to the console.
#[derive(Debug, Default)]
pub struct LogFeed {
    epoch: u64,
    cursor: usize,
}

impl LogFeed {
    pub fn new() -> Self { Self::default() }

    /// Returns the entries added since the last call.
    ///
    /// A cleared log restarts the feed from its first entry.
    pub fn take_new<'a>(&mut self, log: &'a MissionLog) -> &'a [LogEntry] {
        if log.epoch() != self.epoch {
            self.epoch = log.epoch();
            self.cursor = 0;
        }
        let fresh = log.since(self.cursor);
        self.cursor = log.len();
        fresh
    }

    /// Prints every new entry with its own timestamp.
    pub fn flush(&mut self, log: &MissionLog) {
        for entry in self.take_new(log) {
            mission!(entry.time(), "{}", entry.message());
        }
    }
}
