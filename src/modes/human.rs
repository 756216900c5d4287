use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::sleep_until;

use crate::game::{GameConfig, GameController};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Hud, Screen, TerminalSurface};

/// Upper bound on how long the loop sleeps when nothing is scheduled
const IDLE_WAKEUP: Duration = Duration::from_millis(250);

pub struct HumanMode {
    controller: GameController<Hud, TerminalSurface>,
    screen: Screen,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let surface = TerminalSurface::new(&config.grid());
        let controller = GameController::new(config, Hud::default(), surface);

        Self {
            controller,
            screen: Screen::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
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

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        self.controller.init(Instant::now());
        self.draw(terminal)?;

        loop {
            let deadline = self
                .controller
                .next_deadline()
                .unwrap_or_else(|| Instant::now() + IDLE_WAKEUP);

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game ticks, countdown steps and flash follow-ups
                _ = sleep_until(deadline.into()) => {
                    self.controller.advance(Instant::now());
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let color = self.controller.state().colors.current();
        terminal
            .draw(|frame| {
                self.screen.render(
                    frame,
                    self.controller.surface(),
                    self.controller.display(),
                    color,
                );
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.controller.request_heading(direction),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GamePhase, Heading};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_game_initialization() {
        let mut mode = HumanMode::new(GameConfig::default());
        assert_eq!(mode.controller.phase(), GamePhase::Idle);

        mode.controller.init(Instant::now());
        assert_eq!(mode.controller.phase(), GamePhase::Running);
        assert_eq!(mode.controller.display().score, 0);
    }

    #[test]
    fn test_key_press_steers_and_release_is_ignored() {
        let mut mode = HumanMode::new(GameConfig::default());
        mode.controller.init(Instant::now());

        mode.handle_event(key(KeyCode::Up, KeyEventKind::Release));
        mode.controller.tick(Instant::now());
        assert_eq!(mode.controller.state().snake.heading(), Heading::Neutral);

        mode.handle_event(key(KeyCode::Up, KeyEventKind::Press));
        mode.controller.tick(Instant::now());
        assert_eq!(
            mode.controller.state().snake.heading(),
            Heading::from(Direction::Up)
        );
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::default());
        mode.handle_event(key(KeyCode::Char('q'), KeyEventKind::Press));
        assert!(mode.should_quit);
    }
}
