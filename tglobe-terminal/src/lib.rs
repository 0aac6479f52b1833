/// Terminal globe viewer
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tglobe_core::{Camera, FpsCounter, FramePacer, GeoPoint, Mesh, Texture, ViewerState};

pub mod config;
pub mod input;
pub mod renderer;

pub use config::GlobeConfig;
pub use input::CellSize;
pub use renderer::AsciiRenderer;

/// Main application struct for the terminal globe
pub struct TerminalApp {
    config: GlobeConfig,
    points: Vec<GeoPoint>,
    texture: Texture,
    mesh: Mesh,
    state: ViewerState,
    camera: Camera,
    renderer: AsciiRenderer,
    pacer: FramePacer,
    fps: FpsCounter,
}

impl TerminalApp {
    pub fn new(config: GlobeConfig, points: Vec<GeoPoint>, texture: Texture) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mesh = Mesh::globe(1.0, config.sphere_slices, config.sphere_stacks);
        let mut state = ViewerState::new(config.controls);
        state.show_popups = config.show_popups;

        Ok(Self {
            camera: camera_for(&config, width, height),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            pacer: FramePacer::from_millis(config.frame_interval_ms),
            fps: FpsCounter::new(Instant::now()),
            config,
            points,
            texture,
            mesh,
            state,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        let raw_mode = terminal::disable_raw_mode();
        let screen = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );

        first_error(result, raw_mode.and(screen))
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.state.is_running() {
            self.pacer.begin(Instant::now());

            self.handle_input()?;
            if !self.state.is_running() {
                break;
            }

            self.render()?;

            let now = Instant::now();
            self.fps.frame(now);
            let remaining = self.pacer.remaining(now);
            if !remaining.is_zero() {
                std::thread::sleep(remaining);
            }
        }

        log::debug!("left render loop after {} frames", self.pacer.frame_index());
        Ok(())
    }

    /// Drain every pending terminal event
    fn handle_input(&mut self) -> io::Result<()> {
        let cell = CellSize {
            width_px: self.config.cell_width_px,
            height_px: self.config.cell_height_px,
        };

        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(width, height) = event {
                self.resize(width, height);
                continue;
            }
            if let Some(input) = input::translate(&event, cell) {
                log::trace!("input {input:?}");
                self.state.apply(input);
                if !self.state.is_running() {
                    break;
                }
            }
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        log::debug!("terminal resized to {width}x{height}");
        self.renderer.resize(width as usize, height as usize);
        self.camera = camera_for(&self.config, width, height);
    }

    fn render(&mut self) -> io::Result<()> {
        let model_view = *self.state.camera.matrix();

        self.renderer.clear();
        self.renderer
            .render_globe(&self.mesh, &self.texture, &model_view, &self.camera);
        self.renderer.render_markers(
            &self.points,
            &model_view,
            &self.camera,
            self.state.show_popups,
        );

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(status_line(
                f64::from(self.fps.fps()),
                self.points.len(),
                self.state.camera.scale(),
                self.renderer.width(),
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Overlay text, cut to the terminal width so it never wraps
fn status_line(fps: f64, points: usize, scale: f64, width: usize) -> String {
    format!(
        "tglobe | FPS: {fps:.1} | {points} points | zoom {scale:.2}x | Drag/Arrows=Rotate Wheel=Zoom P=Popups Q=Quit"
    )
    .chars()
    .take(width)
    .collect()
}

/// The loop's own failure wins over one raised while restoring the terminal
fn first_error(result: io::Result<()>, cleanup: io::Result<()>) -> io::Result<()> {
    result.and(cleanup)
}

fn camera_for(config: &GlobeConfig, width: u16, height: u16) -> Camera {
    Camera {
        fov_deg: config.fov_deg,
        near: config.near,
        far: config.far,
        ..Camera::for_viewport(
            width as u32,
            height as u32,
            config.cell_width_px,
            config.cell_height_px,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_follows_config() {
        let config = GlobeConfig {
            fov_deg: 60.0,
            far: 20.0,
            ..GlobeConfig::default()
        };
        let camera = camera_for(&config, 100, 25);
        assert_eq!(camera.fov_deg, 60.0);
        assert_eq!(camera.far, 20.0);
        assert_eq!(camera.near, 0.1);
        assert!((camera.aspect - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_status_line_fits_width() {
        let line = status_line(29.97, 1200, 1.05, 80);
        assert_eq!(line.chars().count(), 80);
        assert!(line.starts_with("tglobe | FPS: 30.0 | 1200 points | zoom 1.05x"));

        let wide = status_line(30.0, 3, 1.0, 200);
        assert!(wide.ends_with("Q=Quit"));
        assert!(status_line(30.0, 3, 1.0, 0).is_empty());
    }

    #[test]
    fn test_loop_error_wins_over_cleanup_error() {
        let loop_err = Err(io::Error::new(io::ErrorKind::Other, "render"));
        let cleanup_err = Err(io::Error::new(io::ErrorKind::Other, "restore"));
        let err = first_error(loop_err, cleanup_err).unwrap_err();
        assert_eq!(err.to_string(), "render");

        let cleanup_err = Err(io::Error::new(io::ErrorKind::Other, "restore"));
        let err = first_error(Ok(()), cleanup_err).unwrap_err();
        assert_eq!(err.to_string(), "restore");
        assert!(first_error(Ok(()), Ok(())).is_ok());
    }
}
