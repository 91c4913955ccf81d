use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use crate::game::{Action, Direction, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Keeps the terminal in raw mode while alive and restores it on drop, so an
/// early return during setup does not leave the shell in raw mode.
struct RawMode {
    restore: fn() -> io::Result<()>,
    active: bool,
}

impl RawMode {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self {
            restore: disable_raw_mode,
            active: true,
        })
    }

    /// Restore now and report failure, instead of silently on drop
    fn disable(mut self) -> Result<()> {
        self.active = false;
        (self.restore)().context("Failed to disable raw mode")
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.active {
            let _ = (self.restore)();
        }
    }
}

/// How an interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player asked to leave
    Quit,
    /// The snake hit a wall or itself
    GameOver { score: u32 },
}

pub struct HumanMode {
    engine: GameEngine,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Best score on the table, shown in the header
    best: Option<u32>,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig, best: Option<u32>) -> Self {
        Self {
            engine: GameEngine::new(config),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            best,
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<SessionEnd> {
        // Setup terminal
        let raw_mode = RawMode::enable()?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        raw_mode.disable()?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<SessionEnd> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_secs(1) / self.engine.config().fps.max(1);
        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(&event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                    self.draw(terminal)?;
                    if !self.engine.is_alive() {
                        return Ok(SessionEnd::GameOver { score: self.engine.score() });
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                debug!(score = self.engine.score(), "player quit");
                return Ok(SessionEnd::Quit);
            }
        }
    }

    /// Input between ticks is buffered; the last direction wins
    fn handle_event(&mut self, event: &Event) {
        match self.input_handler.handle_event(event) {
            KeyAction::GameAction(Action::Move(dir)) => {
                self.pending_direction = Some(dir);
            }
            KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
            KeyAction::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn update_game(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        self.engine.step(action);
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        execute!(
            terminal.backend_mut(),
            SetTitle(format!("Snake - score : {}", self.engine.score()))
        )
        .context("Failed to set window title")?;

        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.engine, self.best);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
