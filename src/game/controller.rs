use std::collections::HashSet;
use std::time::Instant;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::action::Direction;
use super::collision::{self, CollisionVerdict};
use super::config::GameConfig;
use super::food::FoodSpawner;
use super::palette::ColorCycle;
use super::scheduler::{Due, Scheduler, TaskKind};
use super::state::{Cell, GameState};
use crate::render::{DisplaySink, RenderSurface, Renderer};

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Running,
    Over,
    CountingDown,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running
    Skipped,
    Moved,
    Ate,
    Collided(CollisionVerdict),
}

/// Owns the phase, the score and the timer, and sequences every tick:
/// heading, growth look-ahead, movement, collision, consumption, render.
pub struct GameController<D, S, R = StdRng> {
    config: GameConfig,
    state: GameState,
    phase: GamePhase,
    spawner: FoodSpawner<R>,
    scheduler: Scheduler,
    renderer: Renderer,
    display: D,
    surface: S,
    /// Last heading request since the previous tick
    pending_heading: Option<Direction>,
    countdown: u32,
    /// Time of the most recent `init`, `advance` or `tick`, used to schedule from
    clock: Instant,
}

impl<D: DisplaySink, S: RenderSurface> GameController<D, S, StdRng> {
    pub fn new(config: GameConfig, display: D, surface: S) -> Self {
        let spawner = FoodSpawner::new(config.seed, config.max_spawn_attempts);
        Self::with_spawner(config, spawner, display, surface)
    }
}

impl<D: DisplaySink, S: RenderSurface, R: Rng> GameController<D, S, R> {
    pub fn with_spawner(config: GameConfig, spawner: FoodSpawner<R>, display: D, surface: S) -> Self {
        let state = GameState::new(config.grid(), ColorCycle::new(config.palette.clone()));
        let renderer = Renderer::new(config.tick_ms);

        Self {
            config,
            state,
            phase: GamePhase::Idle,
            spawner,
            scheduler: Scheduler::new(),
            renderer,
            display,
            surface,
            pending_heading: None,
            countdown: 0,
            clock: Instant::now(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that need to arrange a position
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The host's "ready" signal: place the first food and start ticking
    pub fn init(&mut self, now: Instant) {
        self.clock = now;
        info!(
            cells = self.state.grid.cell_count(),
            tick_ms = self.config.tick_ms,
            "game initialized"
        );
        self.start();
    }

    /// Record a direction change; it is applied at the start of the next tick
    pub fn request_heading(&mut self, direction: Direction) {
        if self.phase == GamePhase::Running {
            self.pending_heading = Some(direction);
        }
    }

    /// When the host should call `advance` next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Run everything that is due at `now`
    pub fn advance(&mut self, now: Instant) {
        self.clock = now;
        while let Some(due) = self.scheduler.pop_due(now) {
            match due {
                Due::FlashEnd => self.renderer.render(&self.state, &mut self.surface),
                Due::Task(handle) => match handle.kind {
                    TaskKind::Tick => {
                        self.tick(now);
                    }
                    TaskKind::Countdown => self.countdown_step(),
                },
            }
        }
    }

    pub fn start(&mut self) {
        self.phase = GamePhase::Running;
        self.scheduler
            .schedule(TaskKind::Tick, self.config.tick_period(), self.clock);

        if self.state.food.is_none() {
            self.respawn_food();
        }

        self.display.set_score(self.state.score);
        self.renderer.render(&self.state, &mut self.surface);
        info!("game started");
    }

    /// One simulation step at `now`.
    ///
    /// Consumption is detected by look-ahead before the move so the tail is
    /// kept on the very tick the food is eaten. A flash started by this tick
    /// ends `flash_ms` after `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Skipped;
        }
        self.clock = now;

        if let Some(direction) = self.pending_heading.take() {
            self.state.snake.set_heading(direction);
        }

        let eats = match (self.state.snake.next_head(), self.state.food) {
            (Some(next), Some(food)) => next == food,
            _ => false,
        };
        if eats {
            self.state.snake.mark_growth();
        }

        self.state.snake.step();
        self.state.ticks += 1;

        let verdict = collision::detect(&self.state.snake, &self.state.grid);
        if verdict.is_collision() {
            debug!(?verdict, head = ?self.state.snake.head(), "collision");
            self.game_over();
            return TickOutcome::Collided(verdict);
        }

        if eats {
            self.consume();
            TickOutcome::Ate
        } else {
            self.renderer.render(&self.state, &mut self.surface);
            TickOutcome::Moved
        }
    }

    fn consume(&mut self) {
        self.state.score += self.config.score_increment;
        self.display.set_score(self.state.score);

        let color = self.state.colors.advance();
        self.respawn_food();
        debug!(
            score = self.state.score,
            length = self.state.snake.len(),
            %color,
            "food eaten"
        );

        // Flash overlay now, the normal frame once the flash has run its course
        self.renderer
            .render_flash(&self.state.grid, color, &mut self.surface);
        self.scheduler
            .schedule_flash_end(self.clock + self.config.flash_duration());
    }

    fn respawn_food(&mut self) {
        let occupied: HashSet<Cell> = self.state.snake.segments().collect();
        self.state.food = self.spawner.spawn(&self.state.grid, &occupied);
        if self.state.food.is_none() {
            warn!(length = self.state.snake.len(), "no free cell left for food");
        }
    }

    pub fn game_over(&mut self) {
        self.phase = GamePhase::Over;
        self.scheduler.cancel();
        self.pending_heading = None;
        self.display.show_game_over(self.state.score);
        info!(final_score = self.state.score, "game over");
        self.start_countdown();
    }

    fn start_countdown(&mut self) {
        self.phase = GamePhase::CountingDown;
        self.countdown = self.config.countdown_from;
        self.display.set_countdown(self.countdown);

        if self.countdown == 0 {
            self.reset();
            return;
        }
        self.scheduler.schedule(
            TaskKind::Countdown,
            self.config.countdown_period(),
            self.clock,
        );
    }

    /// One countdown step; restarts the game when it reaches zero
    pub fn countdown_step(&mut self) {
        if self.phase != GamePhase::CountingDown {
            return;
        }

        self.countdown = self.countdown.saturating_sub(1);
        self.display.set_countdown(self.countdown);
        debug!(remaining = self.countdown, "countdown");

        if self.countdown == 0 {
            self.scheduler.cancel();
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.scheduler.cancel_flash();
        self.display.hide_game_over();

        self.phase = GamePhase::Idle;
        self.pending_heading = None;
        self.countdown = 0;
        self.state.reset();
        self.respawn_food();
        info!("game reset");

        self.start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Heading};
    use crate::render::CellStyle;
    use rand::SeedableRng;
    use std::time::Duration;

    #[derive(Default)]
    struct NullDisplay;

    impl DisplaySink for NullDisplay {
        fn set_score(&mut self, _score: u32) {}
        fn show_game_over(&mut self, _final_score: u32) {}
        fn hide_game_over(&mut self) {}
        fn set_countdown(&mut self, _remaining: u32) {}
    }

    #[derive(Default)]
    struct FrameCounter {
        clears: usize,
    }

    impl RenderSurface for FrameCounter {
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn draw_cell(&mut self, _cell: Cell, _style: &CellStyle) {}
    }

    fn controller() -> GameController<NullDisplay, FrameCounter> {
        let config = GameConfig::default();
        let spawner = FoodSpawner::with_rng(StdRng::seed_from_u64(3), None);
        GameController::with_spawner(config, spawner, NullDisplay, FrameCounter::default())
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = controller();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.tick(Instant::now()), TickOutcome::Skipped);
        assert_eq!(game.state().food, None);

        game.init(Instant::now());
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.state().food.is_some());
        assert_eq!(game.surface().clears, 1);
    }

    #[test]
    fn test_neutral_ticks_do_not_move() {
        let mut game = controller();
        game.init(Instant::now());

        assert_eq!(game.tick(Instant::now()), TickOutcome::Moved);
        assert_eq!(game.state().snake.head(), Grid::default().center());
        assert_eq!(game.state().snake.heading(), Heading::Neutral);
    }

    #[test]
    fn test_heading_ignored_unless_running() {
        let mut game = controller();
        game.request_heading(Direction::Up);
        game.init(Instant::now());
        game.tick(Instant::now());

        assert_eq!(game.state().snake.heading(), Heading::Neutral);
    }

    #[test]
    fn test_last_request_before_tick_wins() {
        let mut game = controller();
        game.init(Instant::now());
        game.state_mut().food = Some(Cell::new(0, 0));

        game.request_heading(Direction::Right);
        game.tick(Instant::now());

        // Up then Left between two ticks: Left is the reverse of Right and is dropped
        game.request_heading(Direction::Up);
        game.request_heading(Direction::Left);
        game.tick(Instant::now());

        assert_eq!(game.state().snake.heading(), Heading::Right);
        assert_eq!(game.state().snake.head(), Cell::new(12, 10));
    }

    #[test]
    fn test_wall_collision_ends_game_and_starts_countdown() {
        let mut game = controller();
        game.init(Instant::now());
        game.state_mut().food = Some(Cell::new(0, 0));

        game.request_heading(Direction::Right);
        let mut outcome = TickOutcome::Moved;
        for _ in 0..10 {
            outcome = game.tick(Instant::now());
        }

        assert_eq!(outcome, TickOutcome::Collided(CollisionVerdict::Wall));
        assert_eq!(game.phase(), GamePhase::CountingDown);
        assert_eq!(game.countdown_remaining(), 3);
        assert_eq!(
            game.scheduler().active().map(|handle| handle.kind),
            Some(TaskKind::Countdown)
        );
        assert_eq!(game.tick(Instant::now()), TickOutcome::Skipped);
    }

    #[test]
    fn test_advance_drives_ticks() {
        let t0 = Instant::now();
        let mut game = controller();
        game.init(t0);
        game.state_mut().food = Some(Cell::new(0, 0));
        game.request_heading(Direction::Down);

        game.advance(t0 + Duration::from_millis(99));
        assert_eq!(game.state().snake.head(), Cell::new(10, 10));

        game.advance(t0 + Duration::from_millis(100));
        assert_eq!(game.state().snake.head(), Cell::new(10, 11));

        game.advance(t0 + Duration::from_millis(200));
        assert_eq!(game.state().snake.head(), Cell::new(10, 12));
    }

    #[test]
    fn test_flash_end_follows_direct_tick_time() {
        let t0 = Instant::now();
        let mut game = controller();
        game.init(t0);
        game.state_mut().food = Some(Cell::new(11, 10));
        game.request_heading(Direction::Right);

        assert_eq!(game.tick(t0 + Duration::from_millis(40)), TickOutcome::Ate);
        assert!(game.scheduler().flash_pending());
        assert_eq!(game.next_deadline(), Some(t0 + Duration::from_millis(90)));
    }

    #[test]
    fn test_cancelled_tick_never_fires() {
        let t0 = Instant::now();
        let mut game = controller();
        game.init(t0);
        let tick = game.scheduler().active().expect("tick scheduled");

        game.game_over();
        assert!(!game.scheduler().is_current(tick));

        for step in 1..10 {
            game.advance(t0 + Duration::from_millis(100 * step));
        }
        assert_eq!(game.state().ticks, 0);
        assert_eq!(game.phase(), GamePhase::CountingDown);
        assert_eq!(game.countdown_remaining(), 3);
    }
}
