/// Mapping of pointer drags to globe rotations
use crate::transform::{CameraTransform, Rotation};
use nalgebra::Unit;

/// Last observed pointer position and primary button state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    pub previous: Option<(f64, f64)>,
    pub pressed: bool,
}

/// Turns consecutive pointer positions into camera-relative rotations.
///
/// The rotation axis is perpendicular to the drag direction on screen and is
/// expressed in object coordinates, so a horizontal drag always spins the
/// globe about the screen's vertical axis however it is currently oriented.
#[derive(Debug, Clone, Default)]
pub struct DragMapper {
    cursor: CursorState,
}

impl DragMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.cursor.pressed
    }

    /// Primary button went down at `(x, y)`.
    ///
    /// Seeds the previous position so the first motion sample measures from
    /// the press point rather than from wherever the pointer was last seen.
    pub fn press(&mut self, x: f64, y: f64) {
        self.cursor.previous = Some((x, y));
        self.cursor.pressed = true;
    }

    pub fn release(&mut self) {
        self.cursor.pressed = false;
    }

    /// Pointer moved to `(x, y)`. Returns the rotation to compose onto
    /// `camera` if the button is held and the pointer actually moved.
    pub fn motion(&mut self, x: f64, y: f64, camera: &CameraTransform) -> Option<Rotation> {
        let previous = self.cursor.previous.replace((x, y));
        let (prev_x, prev_y) = previous?;
        if !self.cursor.pressed {
            return None;
        }

        let dx = x - prev_x;
        let dy = y - prev_y;
        drag_rotation(dx, dy, camera)
    }
}

/// Rotation for a drag of `(dx, dy)` screen units under the current camera.
///
/// The angle is `sqrt(dx² + dy²)` degrees. A zero-length drag yields `None`.
pub fn drag_rotation(dx: f64, dy: f64, camera: &CameraTransform) -> Option<Rotation> {
    let (row_x, row_y) = camera.screen_basis();
    let axis = row_x * dy + row_y * dx;

    let axis = Unit::try_new(axis, f64::EPSILON)?;
    if !axis.iter().all(|c| c.is_finite()) {
        return None;
    }

    log::trace!("drag ({dx}, {dy}) -> axis {:?}", axis.as_ref());
    Some(Rotation::new(dx.hypot(dy), axis))
}
