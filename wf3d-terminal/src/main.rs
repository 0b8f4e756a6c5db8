/// WF3D Terminal Demo - Cube Lattice
///
/// Flies a first-person camera through a lattice of wireframe cubes.
/// Controls:
///   - W/S: Forward/back
///   - A/D: Strafe
///   - Q/E: Up/down
///   - Mouse / Arrow keys: Look around
///   - Esc / Ctrl-C: Quit
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use std::fs::File;
use wf3d_core::Engine;
use wf3d_terminal::{Config, TerminalApp};

fn init_logging(config: &Config) -> Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        // stderr shares the screen with the renderer, keep it quiet
        None => env_logger::Builder::from_env(Env::default().default_filter_or("error")).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;
    log::debug!("{:?}", config);

    let engine = Engine::demo_scene(
        config.camera_settings(),
        config.viewport()?,
        config.demo_scene(),
    )
    .context("invalid scene configuration")?;
    log::info!("starting with {} entities", engine.entities().len());

    let mut app = TerminalApp::new(engine, &config)?;
    app.run()?;

    log::info!("graceful shutdown");
    Ok(())
}
