// Gamepad input source
//
// Bridges gilrs controller events to `ControllerState`. The listen loop is
// blocking: it polls for events until the pairing timeout expires with no
// controller, the active controller disconnects, or the stop button is
// pressed. Every event funnels through one dispatch table; controls that
// are not in the table are acknowledged no-ops.

use std::sync::Arc;
use std::time::{Duration, Instant};

use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use tracing::{debug, info, warn};

use crate::config::{EVENT_POLL_INTERVAL, PAIRING_TIMEOUT};
use crate::range::{RangeError, RangeMap};
use crate::state::ControllerState;

/// Error types for the input source
#[derive(Debug, thiserror::Error)]
pub enum GamepadError {
    #[error("failed to initialize controller backend: {0}")]
    Init(String),

    #[error(transparent)]
    Range(#[from] RangeError),
}

/// A controller event reduced to what the dispatch table cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Axis { axis: Axis, value: f32 },
    Button { button: Button, pressed: bool },
}

/// Which physical controls map to which vehicle intents, and how raw axis
/// values translate into domain units.
#[derive(Debug, Clone)]
pub struct GamepadConfig {
    pub speed_axis: Axis,
    pub turn_axis: Axis,
    /// Toggles `recording_requested` on release
    pub record_button: Button,
    /// Latches `stop_requested` on press and ends the session
    pub stop_button: Button,
    /// Raw and domain ranges for the speed axis
    pub speed_input: (f32, f32),
    pub speed_output: (f32, f32),
    /// Raw and domain ranges for the turn axis
    pub turn_input: (f32, f32),
    pub turn_output: (f32, f32),
    pub pairing_timeout: Duration,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            speed_axis: Axis::LeftStickY,
            turn_axis: Axis::RightStickX,
            record_button: Button::North,
            stop_button: Button::East,
            speed_input: (-1.0, 1.0),
            speed_output: (-0.5, 0.5),
            turn_input: (-1.0, 1.0),
            turn_output: (-1.0, 1.0),
            pairing_timeout: PAIRING_TIMEOUT,
        }
    }
}

/// The dispatch table: applies one event to the shared state.
///
/// Range maps are validated at construction, so a collapsed axis range
/// aborts startup instead of surfacing mid-session.
#[derive(Debug)]
pub struct EventMapper {
    config: GamepadConfig,
    speed_map: RangeMap,
    turn_map: RangeMap,
}

impl EventMapper {
    pub fn new(config: GamepadConfig) -> Result<Self, GamepadError> {
        let speed_map = RangeMap::new(config.speed_input, config.speed_output)?;
        let turn_map = RangeMap::new(config.turn_input, config.turn_output)?;
        Ok(Self {
            config,
            speed_map,
            turn_map,
        })
    }

    /// Apply a single event to the shared state. Unmapped controls fall
    /// through to the explicit no-op arm.
    pub fn apply(&self, event: InputEvent, state: &ControllerState) {
        match event {
            InputEvent::Axis { axis, value } if axis == self.config.speed_axis => {
                state.set_speed(self.speed_map.apply(value));
            }
            InputEvent::Axis { axis, value } if axis == self.config.turn_axis => {
                state.set_turn(self.turn_map.apply(value));
            }
            InputEvent::Button { button, pressed: false } if button == self.config.record_button => {
                let recording = state.toggle_recording();
                info!(recording, "recording toggled from controller");
            }
            InputEvent::Button { button, pressed: true } if button == self.config.stop_button => {
                info!("stop requested from controller");
                state.request_stop();
            }
            // every other control is deliberately ignored
            other => debug!("ignoring unmapped input: {:?}", other),
        }
    }
}

/// Blocking event loop bound to one controller.
pub struct GamepadSource {
    gilrs: Gilrs,
    mapper: EventMapper,
    state: Arc<ControllerState>,
    active: Option<GamepadId>,
}

impl GamepadSource {
    pub fn new(config: GamepadConfig, state: Arc<ControllerState>) -> Result<Self, GamepadError> {
        let mapper = EventMapper::new(config)?;
        let gilrs = Gilrs::new().map_err(|e| GamepadError::Init(e.to_string()))?;
        Ok(Self {
            gilrs,
            mapper,
            state,
            active: None,
        })
    }

    /// Listen for controller events until the session ends.
    ///
    /// Returns normally on pairing timeout (no controller showed up),
    /// disconnect of the active controller, or a stop press. There is no
    /// preemptive cancellation of this loop: shutdown latency is bounded
    /// by the controller's own disconnect detection.
    pub fn listen(mut self) -> Result<(), GamepadError> {
        let started = Instant::now();
        let pairing_timeout = self.mapper.config.pairing_timeout;

        // Adopt a controller that was connected before we started
        if let Some((id, pad)) = self.gilrs.gamepads().next() {
            info!("Using controller: {} ({})", pad.name(), id);
            self.active = Some(id);
        } else {
            info!(
                "No controller yet, waiting up to {:?} for one to pair",
                pairing_timeout
            );
        }

        loop {
            match self.gilrs.next_event_blocking(Some(EVENT_POLL_INTERVAL)) {
                Some(Event { id, event, .. }) => match event {
                    EventType::Connected => {
                        if self.active.is_none() {
                            let name = self
                                .gilrs
                                .connected_gamepad(id)
                                .map(|pad| pad.name().to_owned())
                                .unwrap_or_default();
                            info!("Controller paired: {} ({})", name, id);
                            self.active = Some(id);
                        }
                    }
                    EventType::Disconnected if self.active == Some(id) => {
                        warn!("Controller {} disconnected, ending session", id);
                        return Ok(());
                    }
                    other if self.active == Some(id) => {
                        if let Some(input) = convert_event(other) {
                            self.mapper.apply(input, &self.state);
                        }
                    }
                    _ => {}
                },
                None => {
                    if self.active.is_none() && started.elapsed() >= pairing_timeout {
                        info!("No controller paired within {:?}, ending session", pairing_timeout);
                        return Ok(());
                    }
                }
            }

            // The stop button latches the flag inside the dispatch table;
            // observe it here to end the listen session.
            if self.state.stop_requested() {
                return Ok(());
            }
        }
    }
}

/// Reduce a gilrs event to an `InputEvent`, dropping the kinds the
/// dispatch table can never act on (repeats, force feedback, ...).
fn convert_event(event: EventType) -> Option<InputEvent> {
    match event {
        EventType::AxisChanged(axis, value, _) => Some(InputEvent::Axis { axis, value }),
        EventType::ButtonPressed(button, _) => Some(InputEvent::Button {
            button,
            pressed: true,
        }),
        EventType::ButtonReleased(button, _) => Some(InputEvent::Button {
            button,
            pressed: false,
        }),
        _ => None,
    }
}
