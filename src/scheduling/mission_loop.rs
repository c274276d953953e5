use super::mission_scheduler::MissionScheduler;
use crate::config::SimConfig;
use crate::console::{ConsoleCommand, DashboardView, LogFeed};
use crate::{error, info, log};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Drives a [`MissionScheduler`] in real time.
///
/// One task owns the scheduler and multiplexes the frame clock, the status
/// clock, operator commands and cancellation. Nothing touches the simulation
/// after [`MissionLoop::run`] returns.
pub struct MissionLoop {
    scheduler: MissionScheduler,
    config: SimConfig,
    c_tok: CancellationToken,
    feed: LogFeed,
}

impl MissionLoop {
    pub fn new(scheduler: MissionScheduler, config: SimConfig, c_tok: CancellationToken) -> Self {
        Self { scheduler, config, c_tok, feed: LogFeed::new() }
    }

    /// Runs until the token is cancelled, `quit` is received or the command
    /// channel closes. Returns the scheduler in its final state.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ConsoleCommand>) -> MissionScheduler {
        let mut frames = tokio::time::interval(self.config.frame_period());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut status = tokio::time::interval(self.config.status_interval());
        status.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.feed.flush(self.scheduler.sim().mission_log());
        let mut last_frame = Instant::now();
        loop {
            tokio::select! {
                () = self.c_tok.cancelled() => {
                    log!("Mission loop cancelled. Stopping simulation.");
                    break;
                }
                now = frames.tick() => {
                    self.scheduler.advance(now.saturating_duration_since(last_frame));
                    last_frame = now;
                    self.feed.flush(self.scheduler.sim().mission_log());
                }
                _ = status.tick() => self.print_dashboard(),
                command = commands.recv() => {
                    let Some(command) = command else {
                        log!("Command channel closed. Stopping simulation.");
                        self.c_tok.cancel();
                        break;
                    };
                    self.handle(command);
                }
            }
        }
        self.feed.flush(self.scheduler.sim().mission_log());
        self.scheduler
    }

    fn handle(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Mission(mission_command) => {
                self.scheduler.apply(mission_command);
                self.feed.flush(self.scheduler.sim().mission_log());
            }
            ConsoleCommand::Status => self.print_dashboard(),
            ConsoleCommand::Json => match self.scheduler.sim().snapshot().to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => error!("Failed to serialize mission snapshot: {e}"),
            },
            ConsoleCommand::Help => info!("{}", ConsoleCommand::HELP),
            ConsoleCommand::Quit => {
                info!("Quit requested.");
                self.c_tok.cancel();
            }
        }
    }

    fn print_dashboard(&self) {
        let view = DashboardView::from_snapshot(&self.scheduler.sim().snapshot());
        info!("\n{view}");
    }
}
