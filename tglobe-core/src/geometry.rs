/// Geometry primitives for the globe mesh
use nalgebra::{Point3, Vector3};

use crate::geo::{project, texture_coords};

/// A 3D vertex with position and texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub uv: (f64, f64),
}

impl Vertex {
    pub fn new(position: Point3<f64>, uv: (f64, f64)) -> Self {
        Self { position, uv }
    }

    /// Vertex on a globe of `radius` at the given latitude/longitude
    pub fn on_globe(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self::new(
            project(latitude, longitude, radius),
            texture_coords(latitude, longitude),
        )
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from the winding order (not normalised)
    pub fn normal(&self) -> Vector3<f64> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        (v1 - v0).cross(&(v2 - v0))
    }

    pub fn centroid(&self) -> Point3<f64> {
        let sum = self.vertices[0].position.coords
            + self.vertices[1].position.coords
            + self.vertices[2].position.coords;
        Point3::from(sum / 3.0)
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Textured UV sphere of `slices` longitude bands and `stacks` latitude
    /// bands.
    ///
    /// Vertices are placed with the same projection as the data markers and
    /// carry equirectangular UVs. Each quad gets its own vertices, so the
    /// seam at ±180 degrees never interpolates across the texture. All faces
    /// wind outward.
    pub fn globe(radius: f64, slices: usize, stacks: usize) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let mut mesh = Self::with_capacity(slices * stacks * 2);

        let lat_step = 180.0 / stacks as f64;
        let lon_step = 360.0 / slices as f64;

        for i in 0..stacks {
            let lat_top = 90.0 - i as f64 * lat_step;
            let lat_bottom = 90.0 - (i + 1) as f64 * lat_step;

            for j in 0..slices {
                let lon_west = -180.0 + j as f64 * lon_step;
                let lon_east = -180.0 + (j + 1) as f64 * lon_step;

                let nw = Vertex::on_globe(lat_top, lon_west, radius);
                let ne = Vertex::on_globe(lat_top, lon_east, radius);
                let sw = Vertex::on_globe(lat_bottom, lon_west, radius);
                let se = Vertex::on_globe(lat_bottom, lon_east, radius);

                // The pole rows collapse one edge to a point; skip the
                // degenerate half.
                if i != 0 {
                    mesh.add_triangle(oriented(nw, ne, sw));
                }
                if i != stacks - 1 {
                    mesh.add_triangle(oriented(ne, se, sw));
                }
            }
        }

        mesh
    }
}

/// Build a triangle whose normal points away from the origin
fn oriented(a: Vertex, b: Vertex, c: Vertex) -> Triangle {
    let triangle = Triangle::new(a, b, c);
    if triangle.normal().dot(&triangle.centroid().coords) < 0.0 {
        Triangle::new(a, c, b)
    } else {
        triangle
    }
}
