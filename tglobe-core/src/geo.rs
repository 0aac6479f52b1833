/// Geographic points and their placement on the globe
use nalgebra::Point3;

/// A geocoded data point loaded from the input table
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, expected in [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, expected in [-180, 180]
    pub longitude: f64,
    /// Up to three opaque display values
    pub fields: Vec<String>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, fields: Vec<String>) -> Self {
        Self {
            latitude,
            longitude,
            fields,
        }
    }

    /// Position of this point on a globe of the given radius
    pub fn position(&self, radius: f64) -> Point3<f64> {
        project(self.latitude, self.longitude, radius)
    }
}

/// Convert latitude/longitude (degrees) to a point on a sphere of `radius`.
///
/// The latitude is negated and the longitude shifted by 90 degrees so that
/// points line up with the equirectangular texture coordinates produced by
/// [`texture_coords`] once the globe's fixed pre-rotation is applied.
/// Latitude +90 lands on `(0, 0, -radius)` and latitude -90 on
/// `(0, 0, radius)`.
///
/// Inputs are not validated: out-of-range values still produce a point on
/// the sphere, just not where a caller would expect it.
pub fn project(latitude: f64, longitude: f64, radius: f64) -> Point3<f64> {
    let lat_rad = (-latitude).to_radians();
    let lon_rad = (-(longitude + 90.0)).to_radians();

    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    Point3::new(
        radius * cos_lat * cos_lon,
        radius * cos_lat * sin_lon,
        radius * sin_lat,
    )
}

/// Equirectangular texture coordinates for a latitude/longitude.
///
/// `u` runs west to east from -180, `v` runs north to south from +90, so
/// `(0, 0)` is the top-left corner of the image.
pub fn texture_coords(latitude: f64, longitude: f64) -> (f64, f64) {
    ((longitude + 180.0) / 360.0, (90.0 - latitude) / 180.0)
}
