/// Terminal front end: a form of transform and camera fields over an ASCII view
use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use xfview_core::{Field, GeometryKind, Mesh, ProjectionMode, Scene, SceneParams};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Width of the form panel drawn over the left edge of the view
const PANEL_WIDTH: usize = 20;

pub const USAGE: &str = "usage: xfview-terminal [sphere|cube|cone|cylinder|pyramid] [perspective|ortho]";

/// Build the initial parameters from positional command-line arguments
pub fn params_from_args<I>(args: I) -> anyhow::Result<SceneParams>
where
    I: IntoIterator<Item = String>,
{
    let mut params = SceneParams::default();
    let mut args = args.into_iter();

    if let Some(geometry) = args.next() {
        let geometry = geometry
            .parse::<GeometryKind>()
            .with_context(|| format!("invalid geometry argument\n{USAGE}"))?;
        params.set_geometry(geometry);
    }
    if let Some(mode) = args.next() {
        let mode = mode
            .parse::<ProjectionMode>()
            .with_context(|| format!("invalid projection argument\n{USAGE}"))?;
        params.switch_projection(mode);
    }
    if let Some(extra) = args.next() {
        anyhow::bail!("unexpected argument `{extra}`\n{USAGE}");
    }

    Ok(params)
}

/// Main application struct for the terminal visualizer
pub struct TerminalApp {
    scene: Scene,
    mesh: Mesh,
    renderer: AsciiRenderer,
    selected: Field,
    /// Text typed into the selected field, committed on Enter
    edit: Option<String>,
    running: bool,
}

impl TerminalApp {
    pub fn new(params: SceneParams) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(params, width as usize, height as usize))
    }

    pub fn with_size(params: SceneParams, width: usize, height: usize) -> Self {
        Self {
            mesh: Mesh::from_kind(params.geometry),
            scene: Scene::new(params),
            renderer: AsciiRenderer::new(width, height),
            selected: Field::RotationX,
            edit: None,
            running: true,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selected(&self) -> Field {
        self.selected
    }

    pub fn is_running(&self) -> bool {
        self.running
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
        self.render()?;

        while self.running {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Resize(width, height) => {
                    self.renderer.resize(width as usize, height as usize);
                }
                _ => continue,
            }

            if self.running {
                self.render()?;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(buffer) = self.edit.as_mut() {
            match key.code {
                KeyCode::Char(c) => buffer.push(c),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Esc => self.edit = None,
                KeyCode::Enter => self.commit_edit(),
                KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                    self.commit_edit();
                    self.handle_command(key.code);
                }
                _ => {}
            }
        } else {
            self.handle_command(key.code);
        }
    }

    fn handle_command(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::BackTab => self.selected = self.selected.previous(),
            KeyCode::Down | KeyCode::Tab => self.selected = self.selected.next(),
            KeyCode::Left => {
                self.scene.params.nudge(self.selected, -1.0);
            }
            KeyCode::Right => {
                self.scene.params.nudge(self.selected, 1.0);
            }
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                if self.scene.params.get(self.selected).is_some() {
                    self.edit = Some(c.to_string());
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('p') => {
                let mode = self.scene.params.camera.mode().toggled();
                self.scene.params.switch_projection(mode);
            }
            KeyCode::Char('g') => {
                let geometry = self.scene.params.geometry.next();
                self.scene.params.set_geometry(geometry);
                self.mesh = Mesh::from_kind(geometry);
                log::debug!("geometry switched to {geometry}");
            }
            KeyCode::Char('u') => self.scene.refresh_snapshot(),
            _ => {}
        }
    }

    fn commit_edit(&mut self) {
        if let Some(text) = self.edit.take() {
            self.scene.params.set_from_text(self.selected, &text);
        }
    }

    /// Text shown for a field in the form panel
    pub fn field_text(&self, field: Field) -> String {
        match (&self.edit, self.scene.params.get(field)) {
            (Some(buffer), _) if field == self.selected => format!("{buffer}_"),
            (_, Some(value)) => format!("{value:.3}"),
            (_, None) => "-".to_string(),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.scene.frame();

        self.renderer.clear();
        self.renderer.render_frame(&frame, &self.mesh);

        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;
        self.renderer.draw(&mut stdout)?;

        self.draw_panel(&mut stdout)?;
        stdout.flush()
    }

    fn draw_panel<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let (width, height) = (self.renderer.width(), self.renderer.height());
        let params = &self.scene.params;

        queue!(
            writer,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(fit(
                &format!(
                    "XFView | {} | {} | Up/Down=Select Left/Right=Nudge 0-9=Edit P=Projection G=Geometry U=Snapshot Q=Quit",
                    params.geometry,
                    params.camera.mode()
                ),
                width
            )),
            ResetColor
        )?;

        for (row, field) in Field::ALL.iter().enumerate() {
            let line = format!("{:<7}{:>12} ", field.label(), self.field_text(*field));
            let y = row + 1;
            if y + 2 >= height {
                break;
            }

            queue!(writer, cursor::MoveTo(0, y as u16))?;
            if *field == self.selected {
                queue!(writer, SetAttribute(Attribute::Reverse))?;
            }
            queue!(writer, Print(fit(&line, PANEL_WIDTH.min(width))), SetAttribute(Attribute::Reset))?;
        }

        if height >= 2 {
            queue!(
                writer,
                cursor::MoveTo(0, (height - 1) as u16),
                SetForegroundColor(Color::Green),
                Print(fit(&format!("Snapshot: {}", self.scene.snapshot_text()), width)),
                ResetColor
            )?;
        }

        Ok(())
    }
}

/// Truncate or pad `text` to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    format!("{:<width$.width$}", text, width = width)
}
