/// tglobe Core Library - Globe geometry, camera and input logic
///
/// This library holds everything that does not touch the terminal: the
/// lat/lon projection, the accumulated view transform and the drag-to-rotation
/// mapping that drives it, frame pacing, and loading of the data table and
/// texture.

pub mod drag;
pub mod frame;
pub mod geo;
pub mod geometry;
pub mod projection;
pub mod table;
pub mod texture;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use drag::DragMapper;
pub use frame::{FpsCounter, FramePacer};
pub use geo::{project, GeoPoint};
pub use geometry::{Mesh, Triangle, Vertex};
pub use projection::{Camera, ScreenPoint};
pub use table::{load_table, TableError};
pub use texture::{Texture, TextureError};
pub use transform::{CameraTransform, Rotation, Transform};
pub use viewer::{Controls, InputEvent, Key, ViewerState, WheelDirection};
