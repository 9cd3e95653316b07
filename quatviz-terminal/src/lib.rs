/// Terminal front-end for the rotation visualizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::{Matrix4, Point3};
use quatviz_core::{Axis, Camera, GeometryError, Mesh, Visualization, VisualizationConfig};
use std::cell::Cell;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::{AsciiRenderer, Style};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Rows reserved for the status line
const HUD_ROWS: u16 = 1;

/// Map a core error onto the `io::Error` the terminal loop speaks.
pub fn to_io_error(err: GeometryError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// Terminal colour for an axis.
pub fn axis_color(axis: Axis) -> Color {
    let [r, g, b] = axis.color();
    Color::Rgb { r, g, b }
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Step(Axis, f32),
    Reset,
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Step(Axis::X, 1.0)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Step(Axis::X, -1.0)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Step(Axis::Y, 1.0)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Step(Axis::Y, -1.0)),
            KeyCode::Char('e') => Some(Command::Step(Axis::Z, 1.0)),
            KeyCode::Char('r') => Some(Command::Step(Axis::Z, -1.0)),
            KeyCode::Char('0') | KeyCode::Backspace => Some(Command::Reset),
            _ => None,
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    model: Mesh,
    visualization: Visualization,
    ring_meshes: [Mesh; 3],
    camera: Camera,
    renderer: AsciiRenderer,
    frame_time: Duration,
    dirty: Rc<Cell<bool>>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(model: Mesh, config: VisualizationConfig, fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let height = height.saturating_sub(HUD_ROWS).max(1);

        let mut visualization = Visualization::for_model(config, &model).map_err(to_io_error)?;
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        visualization.subscribe(move |_| flag.set(true));

        let ring_meshes =
            Axis::ALL.map(|axis| visualization.axis_ring(axis).ring.to_indexed_mesh().to_mesh());
        let camera = Camera::isometric(width as u32, height as u32, visualization.camera_distance())
            .with_cell_aspect(CELL_ASPECT);

        Ok(Self {
            model,
            visualization,
            ring_meshes,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            frame_time: Duration::from_millis(1000 / u64::from(fps.max(1))),
            dirty,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn visualization_mut(&mut self) -> &mut Visualization {
        &mut self.visualization
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            // Render only when something changed
            if self.dirty.replace(false) {
                self.render()?;
                self.frame_count += 1;
            }

            // Frame timing
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

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if let Some(command) = Command::from_key(code) {
                    self.apply(command)?;
                }
            }
            Event::Resize(width, height) => {
                let height = height.saturating_sub(HUD_ROWS).max(1);
                tracing::debug!(width, height, "terminal resized");
                self.renderer.resize(width as usize, height as usize);
                self.camera.resize(width as u32, height as u32);
                self.dirty.set(true);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> io::Result<()> {
        let result = match command {
            Command::Quit => {
                self.running = false;
                return Ok(());
            }
            Command::Step(axis, steps) => self.visualization.step_angle(axis, steps),
            Command::Reset => self.visualization.reset(),
        };
        result.map(|_| ()).map_err(to_io_error)
    }

    fn render(&mut self) -> io::Result<()> {
        let model = self.visualization.model_matrix();

        // Clear renderer
        self.renderer.clear();

        // Protractors first, then their highlights on top
        for (axis_ring, ring_mesh) in self.visualization.rings().iter().zip(&self.ring_meshes) {
            let ring_style = Style::Flat {
                glyph: '.',
                color: Color::DarkGrey,
                depth_bias: 0.0,
            };
            self.renderer
                .render_mesh(ring_mesh, &axis_ring.orientation, &self.camera, ring_style);

            let highlight_style = Style::Flat {
                glyph: '#',
                color: axis_color(axis_ring.axis),
                depth_bias: -1e-3,
            };
            self.renderer.render_mesh(
                &axis_ring.highlight.to_mesh(),
                &axis_ring.orientation,
                &self.camera,
                highlight_style,
            );
        }

        // Render model and its local axes
        self.renderer
            .render_mesh(&self.model, &model, &self.camera, Style::Shaded);
        self.render_axes(&model);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, HUD_ROWS))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let rotation = self.visualization.rotation();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "QuatViz | x {:>4.0}° y {:>4.0}° z {:>4.0}° | FPS: {:.1} | W/S=x A/D=y E/R=z 0=Reset Q=Quit",
                rotation.degrees(Axis::X),
                rotation.degrees(Axis::Y),
                rotation.degrees(Axis::Z),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn render_axes(&mut self, model: &Matrix4<f32>) {
        for axis in Axis::ALL {
            let glyph = match axis {
                Axis::X => '-',
                Axis::Y => '|',
                Axis::Z => '/',
            };
            self.renderer.render_line(
                &Point3::origin(),
                &self.visualization.axis_tip(axis),
                model,
                &self.camera,
                glyph,
                axis_color(axis),
            );
        }
    }
}
