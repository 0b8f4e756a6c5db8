/// Scene ownership and the per-tick update/draw sequence
use log::{debug, trace};

use crate::camera::{Camera, CameraSettings};
use crate::canvas::{Canvas, Color};
use crate::error::Result;
use crate::geometry::{Cube, DrawStats, Point, Primitive};
use crate::input::InputSnapshot;
use crate::math::Vec3;
use crate::projection::{FrameContext, ScreenPoint, Viewport};

/// Layout of the demo lattice built by [`Engine::demo_scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoScene {
    /// Cubes per axis
    pub grid: u32,
    /// Distance between neighbouring cube centers
    pub spacing: f64,
    pub half_width: f64,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self {
            grid: 5,
            spacing: 30.0,
            half_width: 30.0,
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub entities: usize,
    pub primitives: DrawStats,
}

/// Owns the camera and the ordered entity list.
pub struct Engine {
    camera: Camera,
    entities: Vec<Primitive>,
    viewport: Viewport,
    background: Color,
    crosshair: Option<Color>,
    frame: u64,
}

impl Engine {
    pub fn new(camera: Camera, viewport: Viewport) -> Self {
        Self {
            camera,
            entities: Vec::new(),
            viewport,
            background: Color::BLACK,
            crosshair: Some(Color::GREEN),
            frame: 0,
        }
    }

    /// A white marker at the origin followed by a `grid`³ lattice of white
    /// cubes, built in x-major order.
    pub fn demo_scene(settings: CameraSettings, viewport: Viewport, scene: DemoScene) -> Result<Self> {
        let mut engine = Self::new(Camera::new(settings)?, viewport);
        engine.add(Point::new(Vec3::zeros(), Color::WHITE, 2));

        for i in 0..scene.grid {
            for j in 0..scene.grid {
                for k in 0..scene.grid {
                    let center = Vec3::new(i as f64, j as f64, k as f64) * scene.spacing;
                    engine.add(Cube::new(center, Color::WHITE, scene.half_width));
                }
            }
        }

        debug!(
            "demo scene: {} entities, viewport {}x{}",
            engine.entities.len(),
            viewport.width,
            viewport.height
        );
        Ok(engine)
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Color of the center marker, or `None` to hide it.
    pub fn with_crosshair(mut self, color: Option<Color>) -> Self {
        self.crosshair = color;
        self
    }

    /// Append an entity; draw order is insertion order.
    pub fn add(&mut self, entity: impl Into<Primitive>) {
        self.entities.push(entity.into());
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn entities(&self) -> &[Primitive] {
        &self.entities
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Update the camera from `input`, then redraw the whole scene.
    pub fn tick(&mut self, input: &InputSnapshot, canvas: &mut dyn Canvas) -> FrameStats {
        self.camera.update(input);
        let stats = self.render(canvas);
        self.frame += 1;
        stats
    }

    /// Redraw the scene for the current pose without touching the camera.
    pub fn render(&self, canvas: &mut dyn Canvas) -> FrameStats {
        canvas.clear(self.background);

        // one rotation pair per frame, shared by every entity
        let frame = FrameContext::new(&self.camera, self.viewport);

        let mut stats = FrameStats {
            entities: self.entities.len(),
            ..FrameStats::default()
        };
        for entity in &self.entities {
            stats.primitives += entity.draw(&frame, canvas);
        }

        if let Some(color) = self.crosshair {
            self.draw_crosshair(canvas, color);
        }

        trace!(
            "frame {}: {} drawn, {} culled, camera ({:.1}, {:.1}, {:.1}) pitch {:.1} yaw {:.1}",
            self.frame,
            stats.primitives.drawn,
            stats.primitives.culled,
            self.camera.position.x,
            self.camera.position.y,
            self.camera.position.z,
            self.camera.pitch,
            self.camera.yaw
        );
        stats
    }

    // 2x2 marker on the viewport center
    fn draw_crosshair(&self, canvas: &mut dyn Canvas, color: Color) {
        let center = self.viewport.center();
        let (left, top) = (center.x - 1.0, center.y - 1.0);
        canvas.draw_line(
            ScreenPoint::new(left, top),
            ScreenPoint::new(left + 1.0, top),
            color,
        );
        canvas.draw_line(
            ScreenPoint::new(left, top + 1.0),
            ScreenPoint::new(left + 1.0, top + 1.0),
            color,
        );
    }
}
