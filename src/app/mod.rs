pub mod cell;
pub mod frame;
pub mod renderer;

use std::{
    io::Stdout,
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    error::MazeError,
    generators::GenerationStatus,
    maze::Direction,
    session::Session,
    solvers::{SearchReport, SearchStatus, Solver},
};
use cell::GridCell;
use renderer::Renderer;

/// Operations per tick used when none is configured: roughly one tick per 120
/// nodes keeps small and large mazes animating at a similar pace.
pub fn default_budget(width: u16, height: u16) -> usize {
    (width as usize * height as usize / 120).max(1)
}

/// Settings of the interactive driver.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Maze width in nodes
    pub width: u16,
    /// Maze height in nodes
    pub height: u16,
    /// Seed for reproducible mazes
    pub seed: Option<u64>,
    /// Generation merges or search steps per tick
    pub budget: usize,
    /// Duration of one tick of the driver loop
    pub tick: Duration,
}

impl AppConfig {
    pub fn new(width: u16, height: u16) -> Self {
        AppConfig {
            width,
            height,
            seed: None,
            budget: default_budget(width, height),
            tick: Duration::from_millis(16),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig::new(30, 20)
    }
}

const CONTROLS: [&str; 9] = [
    "------CONTROLS------",
    "[n]: Generate new maze",
    "[d]: Select DFS",
    "[b]: Select BFS",
    "[a]: Select A* (A Star)",
    "---PLAYER CONTROL---",
    "[u]: Toggle user control on/off",
    "[←][↑][→][↓]: Move player icon",
    "[Esc]/[q]: Quit",
];

pub struct App {
    config: AppConfig,
    session: Session,
    renderer: Renderer,
    /// Lines shown under the maze
    status: Vec<String>,
    status_changed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, MazeError> {
        let session = Session::new(config.width, config.height, config.seed)?;
        Ok(App {
            config,
            session,
            renderer: Renderer::new(),
            status: vec!["Initializing new maze...".to_string(), "Press c for controls".to_string()],
            status_changed: true,
            should_quit: false,
        })
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Wait until the user presses Esc
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
                && code == KeyCode::Esc
                && kind == event::KeyEventKind::Press
            {
                return Ok(());
            }
        }
    }

    /// Checks that the maze and its status lines fit in the terminal.
    /// Returns Ok(false) after telling the user if they don't.
    fn check_terminal_size(&self, stdout: &mut Stdout) -> std::io::Result<bool> {
        let (width, height) = Renderer::frame_size(self.config.width, self.config.height);
        let needed_width = width.saturating_mul(GridCell::CELL_WIDTH);
        let needed_height = height.saturating_add(CONTROLS.len() as u16);
        let (term_width, term_height) = terminal::size()?;
        if term_width >= needed_width && term_height >= needed_height {
            return Ok(true);
        }
        tracing::warn!(
            "[app] terminal {}x{} too small, need {}x{}",
            term_width,
            term_height,
            needed_width,
            needed_height
        );
        let msg = format!(
            "Terminal size is too small ({}x{}) for the maze dimensions ({}x{}) to display. Please resize the terminal.\r\n",
            term_width, term_height, needed_width, needed_height
        );
        execute!(
            stdout,
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        App::wait_for_esc()?;
        Ok(false)
    }

    /// Main application loop: advance, draw, then listen for keys until the tick ends.
    pub fn run(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        if !self.check_terminal_size(stdout)? {
            return Ok(());
        }
        tracing::info!(
            "[app loop] started with a {}x{} maze, budget {} per {:?} tick",
            self.config.width,
            self.config.height,
            self.config.budget,
            self.config.tick
        );

        while !self.should_quit {
            let tick_start = Instant::now();
            self.tick()?;
            self.renderer.draw(stdout, &self.session)?;
            if self.status_changed {
                self.renderer
                    .print_status(stdout, &self.session, &self.status)?;
                self.status_changed = false;
            }

            // Poll for keys for the rest of the tick
            while let Some(remaining) = self.config.tick.checked_sub(tick_start.elapsed()) {
                if !event::poll(remaining)? {
                    break;
                }
                match event::read()? {
                    event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                        self.handle_key(key_event.code)?;
                    }
                    event::Event::Resize(_, _) => {
                        queue!(stdout, terminal::Clear(ClearType::All))?;
                        self.renderer.invalidate();
                        self.status_changed = true;
                    }
                    _ => continue, // Ignore other events
                }
                if self.should_quit {
                    break;
                }
            }
        }
        tracing::info!("[app loop] exiting");
        Ok(())
    }

    /// Advances generation or the running search by one tick's budget.
    fn tick(&mut self) -> std::io::Result<()> {
        if !self.session.is_generated() {
            if self.session.step_generation(self.config.budget) == GenerationStatus::Done {
                self.set_status(vec![
                    "Maze ready.".to_string(),
                    "Press d, b or a to search, u to play, c for controls".to_string(),
                ]);
            }
            return Ok(());
        }
        if !self.session.is_searching() {
            return Ok(());
        }
        match self.session.step_search(self.config.budget) {
            Ok(SearchStatus::Continuing) => Ok(()),
            Ok(SearchStatus::Completed(report)) => {
                self.show_report(&report);
                Ok(())
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!("[app loop] search step refused: {}", err);
                Ok(())
            }
            Err(err) => {
                tracing::error!("[app loop] {}", err);
                Err(err.into())
            }
        }
    }

    fn is_manual(&self) -> bool {
        self.session.is_searching()
            && self
                .session
                .search()
                .is_some_and(|search| search.solver() == Solver::Manual)
    }

    fn handle_key(&mut self, code: KeyCode) -> std::io::Result<()> {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => {
                tracing::debug!("[app loop] quit requested");
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('n') => {
                self.session.regenerate()?;
                self.set_status(vec![
                    "Initializing new maze...".to_string(),
                    "Press c for controls".to_string(),
                ]);
                return Ok(());
            }
            _ => {}
        }

        // Everything else waits for the current task, except player input
        let manual = self.is_manual();
        if !self.session.is_generated() || (self.session.is_searching() && !manual) {
            tracing::debug!("[app loop] ignoring {:?} while busy", code);
            return Ok(());
        }

        match code {
            KeyCode::Char('d') if !manual => self.start(Solver::Dfs)?,
            KeyCode::Char('b') if !manual => self.start(Solver::Bfs)?,
            KeyCode::Char('a') if !manual => self.start(Solver::AStar)?,
            KeyCode::Char('c') => self.set_status(CONTROLS.iter().map(|l| l.to_string()).collect()),
            KeyCode::Char('u') if manual => {
                if let Some(report) = self.session.forfeit() {
                    self.show_report(&report);
                    self.status.insert(0, "User forfeit. Thanks for playing!".to_string());
                }
            }
            KeyCode::Char('u') => {
                self.start(Solver::Manual)?;
                self.set_status(vec!["User in control. Try your best!".to_string()]);
            }
            KeyCode::Left if manual => self.move_player(Direction::Left)?,
            KeyCode::Right if manual => self.move_player(Direction::Right)?,
            KeyCode::Up if manual => self.move_player(Direction::Up)?,
            KeyCode::Down if manual => self.move_player(Direction::Down)?,
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self, solver: Solver) -> std::io::Result<()> {
        self.session.start_search(solver)?;
        self.set_status(vec![format!("Running {}...", solver)]);
        Ok(())
    }

    fn move_player(&mut self, direction: Direction) -> std::io::Result<()> {
        if let Some(coord) = self.session.move_player(direction)? {
            tracing::debug!("[app loop] player moved to {:?}", coord);
            // Arriving on the target ends the run right away
            if !self.session.is_searching()
                && let SearchStatus::Completed(report) = self.session.step_search(1)?
            {
                self.show_report(&report);
            }
        }
        Ok(())
    }

    fn show_report(&mut self, report: &SearchReport) {
        tracing::info!("[app loop] run summary:\n{}", report);
        let mut lines = report
            .to_string()
            .lines()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if report.solver == Solver::Manual && report.solved {
            lines.insert(0, "Congratulations, player!".to_string());
        }
        self.set_status(lines);
    }

    fn set_status(&mut self, lines: Vec<String>) {
        self.status = lines;
        self.status_changed = true;
    }
}
