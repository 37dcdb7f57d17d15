// Drive loop and supervising lifecycle
//
// Three units of work run in parallel: the gamepad listener (blocking
// thread), the drive loop (100 Hz tokio task) and the transport writer
// (blocking thread). The supervisor waits for the input session to end,
// forces a stop, and joins the rest.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::interval;
use tracing::info;

use crate::config::{LOG_INTERVAL, LOOP_HZ};
use crate::gamepad::{GamepadConfig, GamepadError, GamepadSource};
use crate::messages::Command;
use crate::state::ControllerState;
use crate::tracks::track_speeds;
use crate::transport::{self, CommandSink, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("controller input error: {0}")]
    Gamepad(#[from] GamepadError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Periodic heartbeat: turn current controller intent into a continuous
/// stream of drive commands, regardless of how often the controller
/// itself emits events.
///
/// Runs until `stop_requested` is observed (checked once per tick), then
/// submits a final zero-speed command.
pub async fn drive_loop(state: Arc<ControllerState>, sink: CommandSink) {
    let mut tick = interval(Duration::from_millis(1000 / LOOP_HZ));
    let mut last_log: Option<Instant> = None;

    info!("Drive loop started at {} Hz", LOOP_HZ);

    loop {
        tick.tick().await;

        if state.stop_requested() {
            break;
        }

        // speed and turn are read independently; a pair torn across two
        // ticks is accepted
        let speed = state.speed();
        let turn = state.turn();
        let tracks = track_speeds(speed, turn);
        sink.submit(Command::drive(tracks));

        if last_log.is_none_or(|at| at.elapsed() >= LOG_INTERVAL) {
            info!(
                speed,
                turn,
                right = tracks.right,
                left = tracks.left,
                "drive"
            );
            last_log = Some(Instant::now());
        }
    }

    info!("Drive loop stopping, sending final zero-speed command");
    sink.submit(Command::stop());
}

/// Run the teleop session end to end.
///
/// Config errors (collapsed axis ranges, no controller backend, serial
/// open failure) abort here before anything is spawned. After startup the
/// lifecycle is driven entirely by the input session: when it ends, for
/// whatever reason, the vehicle is stopped and the process winds down.
pub async fn run(
    port_name: &str,
    baud: u32,
    config: GamepadConfig,
) -> Result<(), RuntimeError> {
    let state = Arc::new(ControllerState::new());
    let source = GamepadSource::new(config, state.clone())?;
    let port = transport::open_serial(port_name, baud)?;

    let (sink, queue) = transport::channel();
    let writer = transport::spawn_writer(queue, port);
    let drive = tokio::spawn(drive_loop(state.clone(), sink.clone()));
    let input = tokio::task::spawn_blocking(move || source.listen());

    // The input session ending is the one shutdown trigger: pairing
    // timeout, disconnect, or the stop button.
    input.await??;
    info!("Input session ended, stopping vehicle");

    // Force the stop even if the drive loop already exited or is mid-tick:
    // the trailing zero-speed command must be the last word on the wire.
    state.request_stop();
    sink.submit(Command::stop());
    drive.await?;

    // All sinks dropped; the writer drains the queue and exits.
    drop(sink);
    writer.await??;

    info!("Teleop session complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::TrackSpeeds;
    use tokio::time::{Duration, sleep};

    fn drain(queue: &mut crate::transport::CommandQueue) -> Vec<Command> {
        let mut out = Vec::new();
        while let Ok(cmd) = queue.rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    #[tokio::test]
    async fn test_drive_loop_streams_current_intent() {
        let state = Arc::new(ControllerState::new());
        state.set_speed(0.5);
        state.set_turn(0.0);

        let (sink, mut queue) = transport::channel();
        let loop_task = tokio::spawn(drive_loop(state.clone(), sink));

        sleep(Duration::from_millis(50)).await;
        state.request_stop();
        loop_task.await.unwrap();

        let commands = drain(&mut queue);
        assert!(commands.len() >= 2);
        assert!(
            commands
                .iter()
                .any(|c| *c == Command::drive(TrackSpeeds::new(0.5, 0.5)))
        );
    }

    #[tokio::test]
    async fn test_last_command_after_stop_is_zero_speed() {
        let state = Arc::new(ControllerState::new());
        state.set_speed(0.35);
        state.set_turn(-0.5);

        let (sink, mut queue) = transport::channel();
        let loop_task = tokio::spawn(drive_loop(state.clone(), sink));

        sleep(Duration::from_millis(30)).await;
        state.request_stop();
        loop_task.await.unwrap();

        let commands = drain(&mut queue);
        assert_eq!(commands.last(), Some(&Command::stop()));
    }

    #[tokio::test]
    async fn test_drive_loop_applies_steering_rule() {
        let state = Arc::new(ControllerState::new());
        state.set_speed(0.5);
        state.set_turn(1.0);

        let (sink, mut queue) = transport::channel();
        let loop_task = tokio::spawn(drive_loop(state.clone(), sink));

        sleep(Duration::from_millis(30)).await;
        state.request_stop();
        loop_task.await.unwrap();

        let commands = drain(&mut queue);
        assert!(
            commands
                .iter()
                .any(|c| *c == Command::drive(TrackSpeeds::new(0.0, 0.5)))
        );
    }

    #[tokio::test]
    async fn test_stopped_state_exits_immediately_with_zero_command() {
        let state = Arc::new(ControllerState::new());
        state.request_stop();

        let (sink, mut queue) = transport::channel();
        drive_loop(state, sink).await;

        let commands = drain(&mut queue);
        assert_eq!(commands, vec![Command::stop()]);
    }
}
