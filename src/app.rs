use crate::{
    render::{
        terminal::{Footer, Layout, Presenter, TerminalError, TerminalGuard},
        Canvas,
    },
    session::{SessionController, SessionReport, Tick},
    sorting::Algorithm,
    theme::Theme,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    io::{self, Stdout},
    thread,
    time::{Duration, Instant},
};
use strum::IntoEnumIterator;

/// How long to wait for input when no session is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The surface size used when running without a terminal.
const HEADLESS_WIDTH: u32 = 800;
const HEADLESS_HEIGHT: u32 = 400;

/// The settings an [App] is built with.
#[derive(Clone, Debug)]
pub(crate) struct AppOptions {
    pub(crate) algorithm: Algorithm,
    pub(crate) bars: usize,
    pub(crate) step_delay: Duration,
    pub(crate) theme: Theme,
}

/// A place where a line of text is shown to the user.
#[derive(Debug, Default)]
pub(crate) struct TextSink {
    text: String,
}

impl TextSink {
    pub(crate) fn set<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }
}

/// The algorithm selector. Its value is always one of the algorithm identifiers.
#[derive(Debug)]
pub(crate) struct SelectionInput {
    ids: Vec<&'static str>,
    index: usize,
}

impl SelectionInput {
    pub(crate) fn new(initial: Algorithm) -> Self {
        let ids: Vec<_> = Algorithm::iter().map(|algorithm| algorithm.id()).collect();
        let index = ids.iter().position(|id| *id == initial.id()).unwrap_or_default();
        Self { ids, index }
    }

    pub(crate) fn value(&self) -> &'static str {
        self.ids[self.index]
    }

    /// Apply a command, returning whether the value changed.
    fn apply(&mut self, command: SelectionCommand) -> bool {
        let previous = self.index;
        let len = self.ids.len();
        self.index = match command {
            SelectionCommand::Position(position) if position < len => position,
            SelectionCommand::Position(_) => self.index,
            SelectionCommand::Next => (self.index + 1) % len,
            SelectionCommand::Previous => (self.index + len - 1) % len,
        };
        self.index != previous
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SelectionCommand {
    Position(usize),
    Next,
    Previous,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Select(SelectionCommand),
    Restart,
    ToggleTheme,
    Quit,
}

impl Command {
    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let command = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            KeyCode::Char('r') => Self::Restart,
            KeyCode::Char('t') => Self::ToggleTheme,
            KeyCode::Char(digit @ '1'..='9') => {
                let position = digit as usize - '1' as usize;
                Self::Select(SelectionCommand::Position(position))
            }
            KeyCode::Right | KeyCode::Tab => Self::Select(SelectionCommand::Next),
            KeyCode::Left | KeyCode::BackTab => Self::Select(SelectionCommand::Previous),
            _ => return None,
        };
        Some(command)
    }
}

/// The interactive application.
///
/// Owns everything a session needs to be shown: the terminal, the canvas the bars are drawn on,
/// the selector and the two text sinks for the sort time and the algorithm description.
pub(crate) struct App {
    presenter: Presenter<Stdout>,
    layout: Layout,
    canvas: Canvas,
    theme: Theme,
    selection: SelectionInput,
    time: TextSink,
    description: TextSink,
    controller: SessionController,
}

impl App {
    pub(crate) fn new(options: AppOptions) -> Result<Self, TerminalError> {
        let (columns, rows) = TerminalGuard::size()?;
        let layout = Layout::new(columns, rows)?;
        Ok(Self {
            presenter: Presenter::new(io::stdout()),
            canvas: layout.canvas(),
            layout,
            theme: options.theme,
            selection: SelectionInput::new(options.algorithm),
            time: TextSink::default(),
            description: TextSink::default(),
            controller: SessionController::new(options.bars, options.step_delay),
        })
    }

    pub(crate) fn run(mut self) -> Result<(), TerminalError> {
        let _guard = TerminalGuard::enter()?;
        self.presenter.clear(self.theme.palette())?;
        self.start_selected();
        self.draw()?;
        loop {
            if event::poll(self.poll_timeout())? {
                match event::read()? {
                    Event::Key(key) => match Command::from_key(&key) {
                        Some(Command::Quit) => return Ok(()),
                        Some(command) => self.apply(command)?,
                        None => (),
                    },
                    Event::Resize(columns, rows) => self.resize(columns, rows)?,
                    _ => (),
                }
            }
            match self.controller.tick(Instant::now(), &mut self.canvas, self.theme.palette()) {
                Tick::Rendered { .. } => self.draw()?,
                Tick::Finished(report) => {
                    self.time.set(report.time_text());
                    self.description.set(report.description());
                    self.draw()?;
                }
                Tick::Idle | Tick::Waiting(_) => (),
            }
        }
    }

    fn poll_timeout(&self) -> Duration {
        if !self.controller.is_running() {
            return IDLE_POLL;
        }
        match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }

    fn apply(&mut self, command: Command) -> Result<(), TerminalError> {
        match command {
            Command::Select(command) => {
                if self.selection.apply(command) {
                    self.start_selected();
                }
            }
            Command::Restart => self.start_selected(),
            Command::ToggleTheme => {
                self.theme.toggle();
                log::debug!("switched to {} theme", self.theme.mode());
                self.presenter.clear(self.theme.palette())?;
            }
            Command::Quit => (),
        }
        self.draw()
    }

    fn resize(&mut self, columns: u16, rows: u16) -> Result<(), TerminalError> {
        self.layout = Layout::new(columns, rows)?;
        self.canvas = self.layout.canvas();
        self.presenter.clear(self.theme.palette())?;
        self.start_selected();
        self.draw()
    }

    /// Start a session for the current value of the selector.
    fn start_selected(&mut self) {
        let id = self.selection.value();
        if self.controller.select(id, &mut self.canvas, self.theme.palette(), Instant::now()).is_some() {
            self.time.clear();
            self.description.clear();
        }
    }

    fn draw(&mut self) -> Result<(), TerminalError> {
        let palette = self.theme.palette();
        let selected = self.controller.current_algorithm().or_else(|| self.selection.value().parse().ok());
        self.presenter.draw_canvas(&self.canvas, palette)?;
        let footer = Footer {
            selected: selected.unwrap_or_default(),
            time: self.time.text(),
            description: self.description.text(),
        };
        self.presenter.draw_footer(&self.layout, &footer, palette)?;
        self.presenter.flush()?;
        Ok(())
    }
}

/// Run a single session without a terminal, sleeping between steps.
pub(crate) fn run_headless(algorithm: Algorithm, bars: usize, step_delay: Duration) -> SessionReport {
    let theme = Theme::default();
    let mut canvas = Canvas::new(HEADLESS_WIDTH, HEADLESS_HEIGHT);
    let mut controller = SessionController::new(bars, step_delay);
    controller.start(algorithm, &mut canvas, theme.palette(), Instant::now());
    loop {
        match controller.tick(Instant::now(), &mut canvas, theme.palette()) {
            Tick::Finished(report) => return report,
            Tick::Waiting(remaining) => thread::sleep(remaining),
            Tick::Rendered { .. } | Tick::Idle => (),
        }
    }
}
