/// Character-cell rasteriser for the textured globe and its markers
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use std::io::Write;
use tglobe_core::{Camera, GeoPoint, Mesh, ScreenPoint, Texture, Transform, Triangle};

/// Glyph used for textured globe cells
const GLOBE_GLYPH: char = '█';
/// Glyph used for data markers
const MARKER_GLYPH: char = '●';
const MARKER_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const POPUP_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };

/// One terminal cell of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Color>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: ' ',
        color: None,
    };
}

/// Text drawn on top of the frame, anchored at a cell
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub column: usize,
    pub row: usize,
    pub text: String,
}

/// Renderer that converts the globe scene to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    cells: Vec<Cell>,
    labels: Vec<Label>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            cells: vec![Cell::EMPTY; size],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.cells.fill(Cell::EMPTY);
        self.labels.clear();
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Cell> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + column])
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Rasterise the globe mesh, colouring every covered cell from the texture
    pub fn render_globe(
        &mut self,
        mesh: &Mesh,
        texture: &Texture,
        model_view: &Matrix4<f64>,
        camera: &Camera,
    ) {
        let mvp = Transform::mvp_matrix(model_view, &camera.projection_matrix());
        for triangle in &mesh.triangles {
            if !faces_viewer(triangle, model_view) {
                continue;
            }
            self.render_triangle(triangle, texture, &mvp, camera);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        texture: &Texture,
        mvp: &Matrix4<f64>,
        camera: &Camera,
    ) {
        let mut screen = [ScreenPoint {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
        }; 3];
        for (slot, vertex) in screen.iter_mut().zip(&triangle.vertices) {
            match camera.project_unclipped(
                mvp,
                &vertex.position,
                self.width as u32,
                self.height as u32,
            ) {
                Some(point) => *slot = point,
                None => return, // Behind the viewer
            }
        }

        let [v0, v1, v2] = screen;
        let uv = [
            triangle.vertices[0].uv,
            triangle.vertices[1].uv,
            triangle.vertices[2].uv,
        ];

        // Bounding box, clipped to screen bounds
        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as usize;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(self.width as f64) as usize;
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as usize;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(self.height as f64) as usize;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y * self.width + x;
                if depth < self.depth_buffer[idx] {
                    let u = w0 * uv[0].0 + w1 * uv[1].0 + w2 * uv[2].0;
                    let v = w0 * uv[0].1 + w1 * uv[1].1 + w2 * uv[2].1;
                    let [r, g, b] = texture.sample(u, v);

                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = Cell {
                        glyph: GLOBE_GLYPH,
                        color: Some(Color::Rgb { r, g, b }),
                    };
                }
            }
        }
    }

    /// Draw a marker for every point on the visible hemisphere, plus its
    /// fields as a popup label when `show_popups` is set
    pub fn render_markers(
        &mut self,
        points: &[GeoPoint],
        model_view: &Matrix4<f64>,
        camera: &Camera,
        show_popups: bool,
    ) {
        if self.cells.is_empty() {
            return;
        }
        let mvp = Transform::mvp_matrix(model_view, &camera.projection_matrix());
        for point in points {
            let position = point.position(1.0);
            if !point_faces_viewer(&position, model_view) {
                continue;
            }
            let Some(screen) =
                camera.project_with(&mvp, &position, self.width as u32, self.height as u32)
            else {
                continue;
            };

            let column = (screen.x as usize).min(self.width.saturating_sub(1));
            let row = (screen.y as usize).min(self.height.saturating_sub(1));
            let idx = row * self.width + column;
            self.cells[idx] = Cell {
                glyph: MARKER_GLYPH,
                color: Some(MARKER_COLOR),
            };

            if show_popups && !point.fields.is_empty() {
                self.labels.push(Label {
                    column: column + 2,
                    row,
                    text: point.fields.join(" | "),
                });
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            writer.queue(MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if let Some(color) = cell.color {
                    if current != Some(color) {
                        writer.queue(SetForegroundColor(color))?;
                        current = Some(color);
                    }
                }
                writer.queue(Print(cell.glyph))?;
            }
        }

        writer.queue(SetForegroundColor(POPUP_COLOR))?;
        for label in &self.labels {
            if label.column >= self.width || label.row >= self.height {
                continue;
            }
            let room = self.width - label.column;
            let text: String = label.text.chars().take(room).collect();
            writer.queue(MoveTo(label.column as u16, label.row as u16))?;
            writer.queue(Print(text))?;
        }

        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Whether an outward-wound globe triangle faces the eye at the origin of
/// view space
fn faces_viewer(triangle: &Triangle, model_view: &Matrix4<f64>) -> bool {
    let [a, b, c] = triangle
        .vertices
        .map(|vertex| model_view.transform_point(&vertex.position));
    let normal = (b - a).cross(&(c - a));
    normal.dot(&a.coords) < 0.0
}

/// Whether a point on the globe surface is on the hemisphere facing the eye
fn point_faces_viewer(position: &Point3<f64>, model_view: &Matrix4<f64>) -> bool {
    let centre = model_view.transform_point(&Point3::origin());
    let eye_position = model_view.transform_point(position);
    (eye_position - centre).dot(&eye_position.coords) < 0.0
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tglobe_core::CameraTransform;

    const WIDTH: usize = 80;
    const HEIGHT: usize = 40;

    fn solid_texture(rgb: [u8; 3]) -> Texture {
        Texture::from_rgb(2, 2, rgb.repeat(4)).unwrap()
    }

    fn scene() -> (AsciiRenderer, Camera, CameraTransform) {
        (
            AsciiRenderer::new(WIDTH, HEIGHT),
            Camera::for_viewport(WIDTH as u32, HEIGHT as u32, 8.0, 16.0),
            CameraTransform::new(5.0),
        )
    }

    #[test]
    fn test_globe_covers_centre_but_not_corner() {
        let (mut renderer, camera, view) = scene();
        let mesh = Mesh::globe(1.0, 24, 12);
        renderer.render_globe(&mesh, &solid_texture([10, 20, 30]), view.matrix(), &camera);

        let centre = renderer.cell(WIDTH / 2, HEIGHT / 2).unwrap();
        assert_eq!(centre.glyph, GLOBE_GLYPH);
        assert_eq!(centre.color, Some(Color::Rgb { r: 10, g: 20, b: 30 }));
        assert_eq!(renderer.cell(0, 0), Some(Cell::EMPTY));
    }

    #[test]
    fn test_texture_orientation() {
        // Top half of the image is north, bottom half south.
        let mut data = [255, 0, 0].repeat(2);
        data.extend([0, 0, 255].repeat(2));
        let texture = Texture::from_rgb(2, 2, data).unwrap();

        let (mut renderer, camera, view) = scene();
        renderer.render_globe(&Mesh::globe(1.0, 24, 12), &texture, view.matrix(), &camera);

        let north = renderer.cell(WIDTH / 2, HEIGHT / 2 - 5).unwrap();
        let south = renderer.cell(WIDTH / 2, HEIGHT / 2 + 5).unwrap();
        assert_eq!(north.color, Some(Color::Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(south.color, Some(Color::Rgb { r: 0, g: 0, b: 255 }));
    }

    #[test]
    fn test_front_marker_drawn_back_marker_hidden() {
        let (mut renderer, camera, view) = scene();
        let points = vec![
            GeoPoint::new(0.0, 0.0, vec!["front".to_string()]),
            GeoPoint::new(0.0, 180.0, vec!["back".to_string()]),
        ];
        renderer.render_globe(
            &Mesh::globe(1.0, 24, 12),
            &solid_texture([0, 0, 0]),
            view.matrix(),
            &camera,
        );
        renderer.render_markers(&points, view.matrix(), &camera, true);

        let markers: Vec<(usize, usize)> = (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.cell(x, y).unwrap().glyph == MARKER_GLYPH)
            .collect();
        assert_eq!(markers.len(), 1);
        let (x, y) = markers[0];
        assert!(x.abs_diff(WIDTH / 2) <= 1 && y.abs_diff(HEIGHT / 2) <= 1);
        assert_eq!(renderer.labels().len(), 1);
        assert_eq!(renderer.labels()[0].text, "front");
    }

    #[test]
    fn test_popups_off_by_default() {
        let (mut renderer, camera, view) = scene();
        let points = vec![GeoPoint::new(10.0, 5.0, vec!["a".into(), "b".into()])];
        renderer.render_markers(&points, view.matrix(), &camera, false);
        assert!(renderer.labels().is_empty());
    }

    #[test]
    fn test_clear_resets_frame() {
        let (mut renderer, camera, view) = scene();
        let points = vec![GeoPoint::new(0.0, 0.0, vec!["x".into()])];
        renderer.render_markers(&points, view.matrix(), &camera, true);
        renderer.clear();
        assert_eq!(renderer.cell(WIDTH / 2, HEIGHT / 2), Some(Cell::EMPTY));
        assert!(renderer.labels().is_empty());
    }

    #[test]
    fn test_draw_writes_frame() {
        let (mut renderer, camera, view) = scene();
        renderer.render_globe(
            &Mesh::globe(1.0, 12, 6),
            &solid_texture([1, 2, 3]),
            view.matrix(),
            &camera,
        );
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(GLOBE_GLYPH));
    }
}
