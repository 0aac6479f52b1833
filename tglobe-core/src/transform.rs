/// Model-view transform of the globe and the matrices it is built from
use nalgebra::{Matrix4, Unit, Vector3};

/// An incremental rotation, angle in degrees about a unit axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub angle_deg: f64,
    pub axis: Unit<Vector3<f64>>,
}

impl Rotation {
    pub fn new(angle_deg: f64, axis: Unit<Vector3<f64>>) -> Self {
        Self { angle_deg, axis }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation of `angle_deg` degrees about `axis`
    pub fn rotation_matrix(angle_deg: f64, axis: &Unit<Vector3<f64>>) -> Matrix4<f64> {
        Matrix4::from_axis_angle(axis, angle_deg.to_radians())
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Uniform scale that leaves the homogeneous coordinate alone
    pub fn scale_matrix(factor: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(factor, factor, factor))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model_view: &Matrix4<f64>, projection: &Matrix4<f64>) -> Matrix4<f64> {
        projection * model_view
    }
}

/// The accumulated orientation and scale of the globe relative to the viewer.
///
/// Every operation right-multiplies onto the current matrix, so rotation axes
/// and scale are expressed in the globe's own (object) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    model_view: Matrix4<f64>,
}

impl CameraTransform {
    /// Globe pushed `distance` units away from the viewer, with the fixed
    /// mesh pre-rotation (180 degrees about Y, then 90 degrees about X) that
    /// brings north up and the prime meridian to the front.
    pub fn new(distance: f64) -> Self {
        let model_view = Transform::translation_matrix(0.0, 0.0, -distance)
            * Transform::rotation_matrix(180.0, &Vector3::y_axis())
            * Transform::rotation_matrix(90.0, &Vector3::x_axis());
        Self { model_view }
    }

    pub fn from_matrix(model_view: Matrix4<f64>) -> Self {
        Self { model_view }
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.model_view
    }

    pub fn rotate(&mut self, rotation: &Rotation) {
        self.model_view *= Transform::rotation_matrix(rotation.angle_deg, &rotation.axis);
    }

    /// Rotate about an arbitrary axis, normalising it first.
    ///
    /// Returns `false` and leaves the transform untouched if the axis has no
    /// usable direction.
    pub fn rotate_about(&mut self, angle_deg: f64, axis: Vector3<f64>) -> bool {
        match Unit::try_new(axis, f64::EPSILON) {
            Some(axis) => {
                self.rotate(&Rotation::new(angle_deg, axis));
                true
            }
            None => false,
        }
    }

    pub fn scale_by(&mut self, factor: f64) {
        self.model_view *= Transform::scale_matrix(factor);
    }

    /// Current uniform scale, the length of the first basis column
    pub fn scale(&self) -> f64 {
        let m = &self.model_view;
        Vector3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]).norm()
    }

    /// Rows 0 and 1 of the upper-left 3x3 block: the screen X and Y
    /// directions expressed in object coordinates (up to scale).
    pub fn screen_basis(&self) -> (Vector3<f64>, Vector3<f64>) {
        let m = &self.model_view;
        (
            Vector3::new(m[(0, 0)], m[(0, 1)], m[(0, 2)]),
            Vector3::new(m[(1, 0)], m[(1, 1)], m[(1, 2)]),
        )
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::new(5.0)
    }
}
