// Shared controller intent, written by the gamepad listener and read by
// the drive loop and the supervisor's shutdown path.
//
// Each field is individually atomic; no cross-field consistency is needed
// (a torn speed/turn pair costs at most one drive tick). Floats are stored
// as their bit patterns in `AtomicU32`.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Debug)]
pub struct ControllerState {
    speed: AtomicU32,
    turn: AtomicU32,
    recording_requested: AtomicBool,
    stop_requested: AtomicBool,
}

impl ControllerState {
    pub fn new() -> Self {
        Self {
            speed: AtomicU32::new(0.0f32.to_bits()),
            turn: AtomicU32::new(0.0f32.to_bits()),
            recording_requested: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
        }
    }

    pub fn speed(&self) -> f32 {
        f32::from_bits(self.speed.load(Ordering::Relaxed))
    }

    pub fn set_speed(&self, speed: f32) {
        self.speed.store(speed.to_bits(), Ordering::Relaxed);
    }

    pub fn turn(&self) -> f32 {
        f32::from_bits(self.turn.load(Ordering::Relaxed))
    }

    pub fn set_turn(&self, turn: f32) {
        self.turn.store(turn.to_bits(), Ordering::Relaxed);
    }

    pub fn recording_requested(&self) -> bool {
        self.recording_requested.load(Ordering::Relaxed)
    }

    /// Flip the recording flag, returning the new value.
    pub fn toggle_recording(&self) -> bool {
        !self.recording_requested.fetch_not(Ordering::Relaxed)
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Relaxed)
    }

    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Relaxed);
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}
