/// Command line configuration for the terminal front-end
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wf3d_core::{CameraSettings, DemoScene, Viewport};

/// Real-time wireframe renderer for the terminal.
///
/// Controls: W/S forward/back, A/D strafe, Q/E up/down, mouse or arrow keys
/// to look around, Esc or Ctrl-C to quit.
#[derive(Debug, Clone, Parser)]
#[command(name = "wf3d-terminal", version, about, long_about = None)]
pub struct Config {
    /// Width of the virtual viewport in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Height of the virtual viewport in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Projection scale applied after the perspective divide
    #[arg(long, default_value_t = 240.0)]
    pub fov: f64,

    /// World units moved per tick while a movement key is held
    #[arg(long, default_value_t = 4.0)]
    pub speed: f64,

    /// Near plane distance; must be greater than zero
    #[arg(long, default_value_t = 1.0)]
    pub near_clip: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Cubes per axis in the demo lattice
    #[arg(long, default_value_t = 5)]
    pub grid: u32,

    /// Distance between neighbouring cube centers
    #[arg(long, default_value_t = 30.0)]
    pub spacing: f64,

    /// Half the edge length of every cube
    #[arg(long, default_value_t = 30.0)]
    pub cube_size: f64,

    /// Mouse delta per terminal cell of pointer motion
    #[arg(long, default_value_t = 4.0)]
    pub mouse_scale: f64,

    /// Mouse-equivalent delta per arrow key press
    #[arg(long, default_value_t = 10.0)]
    pub look_step: f64,

    /// Write logs to this file (the terminal itself is taken by the renderer)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            fov: self.fov,
            move_speed: self.speed,
            near_clip: self.near_clip,
            ..CameraSettings::default()
        }
    }

    pub fn demo_scene(&self) -> DemoScene {
        DemoScene {
            grid: self.grid,
            spacing: self.spacing,
            half_width: self.cube_size,
        }
    }

    pub fn viewport(&self) -> wf3d_core::Result<Viewport> {
        Viewport::new(self.width, self.height)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}
