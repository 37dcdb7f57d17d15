// Wire frames for the motor control board
//
// The board speaks newline-delimited JSON objects with an integer `T`
// discriminator. The runtime only interprets the drive frame (`T=1`);
// anything else is carried as an opaque payload.

use serde::Serialize;

use crate::tracks::TrackSpeeds;

/// Discriminator for "set track speeds"
const FRAME_DRIVE: u8 = 1;

/// A command bound for the serial transport. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set left/right track speeds
    Drive(TrackSpeeds),
    /// Pre-built frame forwarded verbatim (text display, status query, ...)
    Raw(serde_json::Value),
}

#[derive(Serialize)]
struct DriveFrame {
    #[serde(rename = "T")]
    kind: u8,
    #[serde(rename = "R")]
    right: f32,
    #[serde(rename = "L")]
    left: f32,
}

impl Command {
    pub fn drive(tracks: TrackSpeeds) -> Self {
        Command::Drive(tracks)
    }

    /// A zero-speed drive command, the mandatory last word on shutdown.
    pub fn stop() -> Self {
        Command::Drive(TrackSpeeds::zero())
    }

    /// Serialize to a newline-terminated wire frame.
    pub fn encode(&self) -> serde_json::Result<String> {
        let body = match self {
            Command::Drive(tracks) => serde_json::to_string(&DriveFrame {
                kind: FRAME_DRIVE,
                right: tracks.right,
                left: tracks.left,
            })?,
            Command::Raw(value) => serde_json::to_string(value)?,
        };
        Ok(body + "\n")
    }
}
