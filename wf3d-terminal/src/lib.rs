/// Terminal front-end for the WF3D wireframe engine
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{error, info, warn};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{Engine, FrameStats, InputSource};

pub mod config;
pub mod input;
pub mod renderer;

pub use config::Config;
pub use input::TerminalInput;
pub use renderer::CellCanvas;

/// Size used when the terminal cannot report one.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    engine: Engine,
    input: TerminalInput,
    canvas: CellCanvas,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: FrameStats,
}

impl TerminalApp {
    pub fn new(engine: Engine, config: &Config) -> Result<Self> {
        let (cols, rows) = terminal_size();
        let viewport = engine.viewport();

        Ok(Self {
            canvas: CellCanvas::new(cols as usize, rows as usize, viewport.width, viewport.height),
            input: TerminalInput::new(config.mouse_scale, config.look_step),
            engine,
            frame_time: config.frame_time(),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_stats: FrameStats::default(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;

        // Raw mode is on from here; restore runs whatever happens next
        let result = self.prepare_terminal().and_then(|()| self.main_loop());
        let result = finish(result, restore_terminal());

        info!("stopped after {} frames", self.engine.frame());
        result
    }

    fn prepare_terminal(&self) -> Result<()> {
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )
        .context("failed to prepare terminal")?;
        info!(
            "running at {:.1} fps target, {}x{} cells",
            1.0 / self.frame_time.as_secs_f32(),
            self.canvas.cols(),
            self.canvas.rows()
        );
        Ok(())
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            let snapshot = self.input.poll().context("failed to read terminal events")?;
            if snapshot.quit_requested {
                self.running = false;
                break;
            }
            if let Some((cols, rows)) = self.input.take_resize() {
                self.canvas.resize(cols as usize, rows as usize);
                queue!(stdout(), terminal::Clear(ClearType::All))?;
            }

            // Update and draw
            self.last_stats = self.engine.tick(&snapshot, &mut self.canvas);

            // Output to terminal
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let mut stdout = stdout();
        self.canvas.present(&mut stdout)?;

        // Draw UI overlay, cut to one row
        let camera = self.engine.camera();
        let status: String = format!(
            "WF3D | FPS: {:.1} | pos ({:.0}, {:.0}, {:.0}) pitch {:.0} yaw {:.0} | drawn {} | WASD move, Q/E up/down, mouse/arrows look, Esc quit",
            self.fps,
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.pitch,
            camera.yaw,
            self.last_stats.primitives.drawn
        )
        .chars()
        .take(self.canvas.cols())
        .collect();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Undo every terminal mode change, attempting each step even if one fails.
fn restore_terminal() -> Result<()> {
    let screen = execute!(
        stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show
    )
    .context("failed to restore terminal");
    let raw = terminal::disable_raw_mode().context("failed to disable raw mode");
    screen.and(raw)
}

/// The loop's error wins over a cleanup error, which is then only logged.
fn finish(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    match (result, cleanup) {
        (Err(err), Err(cleanup_err)) => {
            error!("{:#}", cleanup_err);
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), cleanup) => cleanup,
    }
}

fn terminal_size() -> (u16, u16) {
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
        Ok((cols, rows)) => {
            warn!(
                "terminal reported {}x{}, using {}x{}",
                cols, rows, FALLBACK_SIZE.0, FALLBACK_SIZE.1
            );
            FALLBACK_SIZE
        }
        Err(err) => {
            warn!(
                "could not read terminal size ({}), using {}x{}",
                err, FALLBACK_SIZE.0, FALLBACK_SIZE.1
            );
            FALLBACK_SIZE
        }
    }
}
