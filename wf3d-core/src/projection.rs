/// Camera-space transform, perspective projection and near-plane clipping
use nalgebra::Point2;

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::math::{FrameRotation, Vec3};

/// Position on the 2D viewport, in pixels, y growing downward.
pub type ScreenPoint = Point2<f64>;

/// Size of the 2D viewport the scene is projected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Translate a world-space point so the camera sits at the origin.
pub fn world_to_camera(point: &Vec3, camera_position: &Vec3) -> Vec3 {
    point - camera_position
}

/// Perspective divide for a camera-space point.
///
/// Returns `None` when the point is on or behind the near plane.
pub fn project_point(
    point: &Vec3,
    fov: f64,
    near_clip: f64,
    viewport: Viewport,
) -> Option<ScreenPoint> {
    if point.z <= near_clip {
        return None;
    }
    let center = viewport.center();
    Some(ScreenPoint::new(
        fov * point.x / point.z + center.x,
        fov * point.y / point.z + center.y,
    ))
}

/// Invert [`project_point`] given the depth the point was projected from.
pub fn unproject(screen: &ScreenPoint, z: f64, fov: f64, viewport: Viewport) -> Vec3 {
    let center = viewport.center();
    Vec3::new(
        (screen.x - center.x) * z / fov,
        (screen.y - center.y) * z / fov,
        z,
    )
}

/// Clip a camera-space segment against the plane `z = near_clip`.
///
/// Callers must only pass segments with at least one endpoint strictly in
/// front of the plane. Any endpoint behind it is moved onto the plane, with
/// z pinned to exactly `near_clip` so the divide never sees a smaller value.
pub fn clip_segment(v1: Vec3, v2: Vec3, near_clip: f64) -> (Vec3, Vec3) {
    debug_assert!(
        v1.z > near_clip || v2.z > near_clip,
        "segment is entirely behind the near plane"
    );

    let intersection = || {
        let t = (near_clip - v1.z) / (v2.z - v1.z);
        let mut p = v1 + (v2 - v1) * t;
        p.z = near_clip;
        p
    };

    let clipped_1 = if v1.z < near_clip { intersection() } else { v1 };
    let clipped_2 = if v2.z < near_clip { intersection() } else { v2 };
    (clipped_1, clipped_2)
}

/// Everything a primitive needs to draw itself for one frame.
///
/// Built once per tick by the engine. Primitives only read it, so every
/// entity in a frame is drawn with the same pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub rotation: FrameRotation,
    pub camera_position: Vec3,
    pub fov: f64,
    pub near_clip: f64,
    pub viewport: Viewport,
}

impl FrameContext {
    pub fn new(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            rotation: camera.frame_rotation(),
            camera_position: camera.position,
            fov: camera.fov(),
            near_clip: camera.near_clip(),
            viewport,
        }
    }

    /// World space to rotated camera space.
    pub fn to_camera_space(&self, world: &Vec3) -> Vec3 {
        self.rotation
            .apply(&world_to_camera(world, &self.camera_position))
    }

    pub fn is_visible(&self, camera_point: &Vec3) -> bool {
        camera_point.z > self.near_clip
    }

    pub fn project(&self, camera_point: &Vec3) -> Option<ScreenPoint> {
        project_point(camera_point, self.fov, self.near_clip, self.viewport)
    }

    /// Transform, clip and project a world-space segment.
    ///
    /// Returns `None` when both endpoints are on or behind the near plane.
    pub fn project_segment(&self, a: &Vec3, b: &Vec3) -> Option<(ScreenPoint, ScreenPoint)> {
        let a = self.to_camera_space(a);
        let b = self.to_camera_space(b);
        if !self.is_visible(&a) && !self.is_visible(&b) {
            return None;
        }

        let (a, b) = clip_segment(a, b, self.near_clip);
        Some((self.project_clipped(&a), self.project_clipped(&b)))
    }

    // Clipped endpoints may sit exactly on the plane, which `project` rejects.
    fn project_clipped(&self, point: &Vec3) -> ScreenPoint {
        let center = self.viewport.center();
        ScreenPoint::new(
            self.fov * point.x / point.z + center.x,
            self.fov * point.y / point.z + center.y,
        )
    }
}
