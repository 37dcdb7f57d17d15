// Differential steering for a dual-tracked base
// Converts a commanded (speed, turn) pair into independent per-track speeds.

/// Speed commands for the two tracks, in the vehicle's native units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackSpeeds {
    pub left: f32,
    pub right: f32,
}

impl TrackSpeeds {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Compute per-track speeds from commanded speed and turn.
///
/// # Arguments
/// * `speed` - Commanded speed (signed; the vehicle's bounded range)
/// * `turn` - Steering input in -1..1 (positive = right)
///
/// The turning track keeps the full commanded speed while the other is
/// scaled down proportionally to the turn magnitude. This is a simple
/// proportional model, not a geometric arc model: there is no wheel-base
/// term, so actual turn radius depends on the platform.
pub fn track_speeds(speed: f32, turn: f32) -> TrackSpeeds {
    if speed == 0.0 || turn == 0.0 {
        TrackSpeeds::new(speed, speed)
    } else if turn > 0.0 {
        TrackSpeeds::new(speed * (1.0 - turn), speed)
    } else {
        TrackSpeeds::new(speed, speed * (1.0 + turn))
    }
}
