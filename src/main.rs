#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod console;
mod flight_control;
mod logger;
mod scheduling;

use crate::config::SimConfig;
use crate::console::{ConsoleCommand, ConsoleEndpoint};
use crate::flight_control::FlightSimulation;
use crate::scheduling::{MissionClock, MissionLoop, MissionScheduler, SystemClock};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let config = SimConfig::from_env().unwrap_or_else(|e| fatal!("Invalid configuration: {e}"));
    info!(
        "Starting mission control at {} Hz, dashboard every {} ms.",
        config.frame_rate_hz(),
        config.status_interval().as_millis()
    );
    info!("{}", ConsoleCommand::HELP);

    let clock: Arc<dyn MissionClock> = Arc::new(SystemClock);
    let scheduler = MissionScheduler::new(FlightSimulation::new(clock));
    let c_tok = CancellationToken::new();

    let signal_tok = c_tok.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = signal_tok.cancelled() => (),
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    error!("Failed to listen for Ctrl-C: {e}");
                } else {
                    info!("Ctrl-C received.");
                }
                signal_tok.cancel();
            }
        }
    });

    let (console, commands) = ConsoleEndpoint::start_stdin(&c_tok);
    let scheduler = MissionLoop::new(scheduler, config, c_tok).run(commands).await;
    drop(console);

    let sim = scheduler.sim();
    info!(
        "Mission control stopped in state '{}' after {} log entries.",
        sim.status(),
        sim.mission_log().len()
    );
    // A pending blocking stdin read would otherwise hold the runtime open.
    std::process::exit(0);
}
