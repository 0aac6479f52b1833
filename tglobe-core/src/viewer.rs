/// Viewer state and the backend-agnostic input events that drive it
use crate::drag::DragMapper;
use crate::transform::{CameraTransform, Rotation};
use nalgebra::{Unit, Vector3};
use serde::Deserialize;

/// Discrete rotation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Object-space axis each key rotates about
    pub fn axis(self) -> Unit<Vector3<f64>> {
        match self {
            Key::Left => Vector3::z_axis(),
            Key::Right => -Vector3::z_axis(),
            Key::Up => -Vector3::x_axis(),
            Key::Down => Vector3::x_axis(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Input as the viewer understands it. Pointer positions are in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    Key(Key),
    ButtonDown { x: f64, y: f64 },
    ButtonUp,
    Motion { x: f64, y: f64 },
    Wheel(WheelDirection),
    TogglePopups,
}

/// Tunable interaction constants
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Degrees per arrow-key press
    pub key_step_deg: f64,
    /// Scale factor per wheel notch up
    pub zoom_in: f64,
    /// Scale factor per wheel notch down
    pub zoom_out: f64,
    /// Initial distance between viewer and globe centre
    pub camera_distance: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            key_step_deg: 1.0,
            zoom_in: 1.05,
            zoom_out: 0.95,
            camera_distance: 5.0,
        }
    }
}

/// Everything the render loop mutates between frames
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub camera: CameraTransform,
    pub drag: DragMapper,
    pub controls: Controls,
    pub show_popups: bool,
    running: bool,
}

impl ViewerState {
    pub fn new(controls: Controls) -> Self {
        Self {
            camera: CameraTransform::new(controls.camera_distance),
            drag: DragMapper::new(),
            controls,
            show_popups: false,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply one input event
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::debug!("quit requested");
                self.running = false;
            }
            InputEvent::Key(key) => {
                self.camera
                    .rotate(&Rotation::new(self.controls.key_step_deg, key.axis()));
            }
            InputEvent::Wheel(WheelDirection::Up) => self.camera.scale_by(self.controls.zoom_in),
            InputEvent::Wheel(WheelDirection::Down) => {
                self.camera.scale_by(self.controls.zoom_out)
            }
            InputEvent::ButtonDown { x, y } => self.drag.press(x, y),
            InputEvent::ButtonUp => self.drag.release(),
            InputEvent::Motion { x, y } => {
                if let Some(rotation) = self.drag.motion(x, y, &self.camera) {
                    self.camera.rotate(&rotation);
                }
            }
            InputEvent::TogglePopups => self.show_popups = !self.show_popups,
        }
    }

    /// Apply a batch of events, stopping early on quit
    pub fn apply_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.apply(event);
            if !self.running {
                break;
            }
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(Controls::default())
    }
}
