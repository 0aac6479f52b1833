/// Equirectangular globe texture
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode texture {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    Dimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// RGB texture sampled with nearest-neighbour filtering, repeating on both
/// axes.
///
/// Row 0 is the top of the image, so `v = 0` is the north edge.
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<[u8; 3]>,
}

impl Texture {
    /// Decode an image file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| TextureError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        let (width, height) = image.dimensions();
        log::debug!("decoded {} ({width}x{height})", path.display());
        Self::from_rgb(width, height, image.into_raw())
    }

    /// Build from tightly packed RGB rows, top row first
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 3;
        if expected == 0 || data.len() != expected {
            return Err(TextureError::Dimensions {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        let texels = data
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();

        Ok(Self {
            width,
            height,
            texels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest texel for texture coordinates `(u, v)`
    pub fn sample(&self, u: f64, v: f64) -> [u8; 3] {
        let x = texel_index(u, self.width);
        let y = texel_index(v, self.height);
        self.texels[y * self.width as usize + x]
    }
}

fn texel_index(coord: f64, size: u32) -> usize {
    let size = size as usize;
    let coord = if coord.is_finite() {
        coord.rem_euclid(1.0)
    } else {
        0.0
    };
    ((coord * size as f64) as usize).min(size - 1)
}
