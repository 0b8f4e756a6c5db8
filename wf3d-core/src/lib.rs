/// WF3D Core Library - camera, projection and clipping for wireframe scenes
///
/// This library holds everything platform independent: the vector/matrix
/// helpers, the first-person camera, the projection and near-plane clipping
/// pipeline, the point and cube primitives, and the engine that ties them
/// into a per-tick update. Drawing and input go through the `Canvas` and
/// `InputSource` traits so any front-end can host it.

pub mod camera;
pub mod canvas;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod projection;

// Re-export commonly used types
pub use camera::{Camera, CameraSettings};
pub use canvas::{Canvas, Color, DrawCommand, DrawList};
pub use engine::{DemoScene, Engine, FrameStats};
pub use error::{Error, Result};
pub use geometry::{Cube, DrawStats, Point, Primitive};
pub use input::{InputSnapshot, InputSource, Key};
pub use math::{FrameRotation, RotationMatrix, Vec3};
pub use projection::{FrameContext, ScreenPoint, Viewport};
