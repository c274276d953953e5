//! The flight simulation core: telemetry, launch sequencing and the per-frame
//! vehicle update.

mod command;
mod controls;
pub(crate) mod dynamics;
mod flight_simulation;
mod history;
mod mission_log;
mod mission_state;
mod snapshot;
mod telemetry;


pub use command::MissionCommand;
pub use flight_simulation::FlightSimulation;
pub use history::HistoryBuffer;
pub use mission_log::{LogEntry, MissionLog};
pub use snapshot::MissionSnapshot;

#[cfg(test)]
pub use mission_state::{MissionPhase, MissionState, Stage};
#[cfg(test)]
pub use telemetry::Telemetry;
