/// Perspective projection and screen mapping
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::transform::Transform;

/// A point mapped onto the screen, with its normalised device depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Depth in [-1, 1], smaller is closer
    pub depth: f64,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(aspect: f64) -> Self {
        Self {
            fov_deg: 40.0,
            aspect,
            near: 0.1,
            far: 50.0,
        }
    }

    /// Camera for a viewport of `width` x `height` units where each unit is
    /// `unit_width` x `unit_height` pixels (terminal cells are not square).
    pub fn for_viewport(width: u32, height: u32, unit_width: f64, unit_height: f64) -> Self {
        let height_px = (height.max(1) as f64) * unit_height;
        Self::new(width.max(1) as f64 * unit_width / height_px)
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_perspective(self.aspect, self.fov_deg.to_radians(), self.near, self.far)
    }

    /// Project a point in object space to screen space.
    ///
    /// Returns `None` for points behind the viewer or outside the view
    /// volume. Screen Y grows downward.
    pub fn project_to_screen(
        &self,
        point: &Point3<f64>,
        model_view: &Matrix4<f64>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let mvp = Transform::mvp_matrix(model_view, &self.projection_matrix());
        self.project_with(&mvp, point, width, height)
    }

    /// Same as [`Camera::project_to_screen`] with a precomputed
    /// model-view-projection matrix.
    pub fn project_with(
        &self,
        mvp: &Matrix4<f64>,
        point: &Point3<f64>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let ndc = to_ndc(mvp, point)?;

        // Clip test
        if ndc.iter().any(|c| !(-1.0..=1.0).contains(c)) {
            return None;
        }

        Some(ndc_to_screen(&ndc, width, height))
    }

    /// Screen position without the view-volume test, for rasterising
    /// triangles that are only partly on screen. Points behind the viewer
    /// are still rejected.
    pub fn project_unclipped(
        &self,
        mvp: &Matrix4<f64>,
        point: &Point3<f64>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        to_ndc(mvp, point).map(|ndc| ndc_to_screen(&ndc, width, height))
    }
}

fn to_ndc(mvp: &Matrix4<f64>, point: &Point3<f64>) -> Option<Vector3<f64>> {
    let clip = mvp * Vector4::new(point.x, point.y, point.z, 1.0);

    // Prevent division by near-zero depth values
    if clip.w < 1e-9 {
        return None;
    }

    Some(clip.xyz() / clip.w)
}

fn ndc_to_screen(ndc: &Vector3<f64>, width: u32, height: u32) -> ScreenPoint {
    ScreenPoint {
        x: (ndc.x + 1.0) * 0.5 * width as f64,
        y: (1.0 - ndc.y) * 0.5 * height as f64,
        depth: ndc.z,
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0 / 600.0)
    }
}
