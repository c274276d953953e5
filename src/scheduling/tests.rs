use super::{CountdownTimer, ManualClock, MissionClock, MissionLoop, MissionScheduler};
use crate::config::SimConfig;
use crate::console::ConsoleCommand;
use crate::flight_control::{FlightSimulation, MissionCommand, MissionPhase, Stage};
use chrono::{DateTime, TimeDelta, Utc};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const FRAME: Duration = Duration::from_millis(50);

fn mission_start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-14T09:30:00Z").unwrap().with_timezone(&Utc)
}

fn new_scheduler() -> MissionScheduler {
    MissionScheduler::new(FlightSimulation::new(Arc::new(ManualClock::new(mission_start()))))
}

fn start_countdown(scheduler: &mut MissionScheduler) {
    scheduler.apply(MissionCommand::Arm(true));
    scheduler.apply(MissionCommand::Initiate);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(10));
}

fn advance_frames(scheduler: &mut MissionScheduler, frame: Duration, count: usize) {
    for _ in 0..count {
        scheduler.advance(frame);
    }
}

#[test]
fn test_manual_clock() {
    let clock = ManualClock::new(mission_start());
    assert_eq!(clock.now(), mission_start());
    clock.advance(TimeDelta::seconds(90));
    assert_eq!(clock.now(), mission_start() + TimeDelta::seconds(90));
    clock.set(mission_start());
    assert_eq!(clock.now(), mission_start());
}

#[test]
fn test_countdown_timer_accumulates_periods() {
    let mut timer = CountdownTimer::new();
    assert_eq!(timer.accumulate(Duration::from_millis(300)), 0);
    assert_eq!(timer.accumulate(Duration::from_millis(300)), 0);
    assert_eq!(timer.accumulate(Duration::from_millis(300)), 0);
    assert_eq!(timer.accumulate(Duration::from_millis(300)), 1);
    assert_eq!(timer.until_next(), Duration::from_millis(800));
    assert_eq!(timer.accumulate(Duration::from_millis(2500)), 2);
    assert_eq!(timer.until_next(), Duration::from_millis(300));
    timer.clear();
    assert_eq!(timer.until_next(), CountdownTimer::PERIOD);
}

#[test]
fn test_countdown_independent_of_frame_rate() {
    let mut coarse = new_scheduler();
    let mut fine = new_scheduler();
    let mut single = new_scheduler();
    for scheduler in [&mut coarse, &mut fine, &mut single] {
        start_countdown(scheduler);
    }

    advance_frames(&mut coarse, FRAME, 20);
    advance_frames(&mut fine, Duration::from_millis(20), 50);
    single.advance(Duration::from_secs(1));

    for scheduler in [&coarse, &fine, &single] {
        assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(9));
        assert_eq!(scheduler.next_countdown_step(), Some(CountdownTimer::PERIOD));
    }
}

#[test]
fn test_long_frame_catches_up_countdown() {
    let mut scheduler = new_scheduler();
    start_countdown(&mut scheduler);
    scheduler.advance(Duration::from_millis(3_400));
    assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(7));
    assert_eq!(scheduler.next_countdown_step(), Some(Duration::from_millis(600)));
    // The simulation itself still only moves by one clamped frame.
    assert_eq!(scheduler.sim().history().fuel.len(), 1);
}

#[test]
fn test_countdown_reaches_liftoff() {
    let mut scheduler = new_scheduler();
    start_countdown(&mut scheduler);
    advance_frames(&mut scheduler, FRAME, 199);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(1));
    scheduler.advance(FRAME);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Flight(Stage::Booster));
    assert_eq!(scheduler.next_countdown_step(), None);

    advance_frames(&mut scheduler, FRAME, 100);
    let log = scheduler.sim().mission_log();
    assert_eq!(log.count_containing("liftoff"), 1);
    assert!(scheduler.sim().telemetry().altitude > 0.0);
}

#[test]
fn test_liftoff_in_long_frame_stops_decrementing() {
    let mut scheduler = new_scheduler();
    start_countdown(&mut scheduler);
    scheduler.advance(Duration::from_secs(15));
    assert_eq!(scheduler.sim().phase(), MissionPhase::Flight(Stage::Booster));
    assert_eq!(scheduler.sim().mission_log().count_containing("liftoff"), 1);
}

#[test]
fn test_abort_drops_partial_period() {
    let mut scheduler = new_scheduler();
    start_countdown(&mut scheduler);
    advance_frames(&mut scheduler, FRAME, 18);
    assert_eq!(scheduler.next_countdown_step(), Some(Duration::from_millis(100)));

    scheduler.apply(MissionCommand::Abort);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Idle);
    assert_eq!(scheduler.next_countdown_step(), None);

    scheduler.apply(MissionCommand::Initiate);
    advance_frames(&mut scheduler, FRAME, 4);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(10));
    assert_eq!(scheduler.next_countdown_step(), Some(Duration::from_millis(800)));
}

#[test]
fn test_reset_mid_countdown() {
    let mut scheduler = new_scheduler();
    start_countdown(&mut scheduler);
    advance_frames(&mut scheduler, FRAME, 50);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(8));

    scheduler.apply(MissionCommand::Reset);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Idle);
    assert!(!scheduler.sim().controls().armed());
    assert_eq!(scheduler.next_countdown_step(), None);

    advance_frames(&mut scheduler, FRAME, 40);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Idle);

    start_countdown(&mut scheduler);
    advance_frames(&mut scheduler, FRAME, 10);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(10));
}

#[test]
fn test_commands_during_countdown_keep_timer() {
    let mut scheduler = new_scheduler();
    start_countdown(&mut scheduler);
    advance_frames(&mut scheduler, FRAME, 12);
    scheduler.apply(MissionCommand::Arm(false));
    scheduler.apply(MissionCommand::SetThrottle(90));
    scheduler.apply(MissionCommand::Initiate);
    advance_frames(&mut scheduler, FRAME, 8);
    assert_eq!(scheduler.sim().phase(), MissionPhase::Countdown(9));
    assert_eq!(scheduler.sim().controls().throttle(), 90);
}

#[tokio::test(start_paused = true)]
async fn test_mission_loop_runs_to_liftoff() {
    let (tx, rx) = mpsc::channel(8);
    let c_tok = CancellationToken::new();
    let config = SimConfig::new(20, Duration::from_secs(5));
    let mission = MissionLoop::new(new_scheduler(), config, c_tok.clone());
    let handle = tokio::spawn(mission.run(rx));

    tx.send(ConsoleCommand::Mission(MissionCommand::Arm(true))).await.unwrap();
    tx.send(ConsoleCommand::Mission(MissionCommand::Initiate)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10_500)).await;
    tx.send(ConsoleCommand::Quit).await.unwrap();

    let scheduler = handle.await.unwrap();
    assert!(c_tok.is_cancelled());
    assert_eq!(scheduler.sim().phase(), MissionPhase::Flight(Stage::Booster));
    assert!(scheduler.sim().telemetry().speed > 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_mission_loop_stops_when_input_closes() {
    let (tx, rx) = mpsc::channel(8);
    let c_tok = CancellationToken::new();
    let mission = MissionLoop::new(new_scheduler(), SimConfig::default(), c_tok.clone());
    let handle = tokio::spawn(mission.run(rx));

    tx.send(ConsoleCommand::Mission(MissionCommand::SetThrottle(140))).await.unwrap();
    tx.send(ConsoleCommand::Help).await.unwrap();
    drop(tx);

    let scheduler = handle.await.unwrap();
    assert!(c_tok.is_cancelled());
    assert_eq!(scheduler.sim().phase(), MissionPhase::Idle);
    assert_eq!(scheduler.sim().controls().throttle(), 100);
}

#[tokio::test(start_paused = true)]
async fn test_mission_loop_honours_external_cancel() {
    let (_tx, rx) = mpsc::channel::<ConsoleCommand>(8);
    let c_tok = CancellationToken::new();
    let mission = MissionLoop::new(new_scheduler(), SimConfig::default(), c_tok.clone());
    let handle = tokio::spawn(mission.run(rx));

    tokio::time::sleep(Duration::from_millis(500)).await;
    c_tok.cancel();

    let scheduler = handle.await.unwrap();
    assert!(!scheduler.sim().history().is_empty());
}
