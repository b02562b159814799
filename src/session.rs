use tracing::{debug, info, trace, warn};

use crate::config::GameConfig;
use crate::game::{FoodSpawner, GameState, TickOutcome};
use crate::grid::Direction;
use crate::input::Intent;
use crate::schedule::Ticker;
use crate::store::ScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Over,
}

/// What one call to [`GameLoop::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub ticked: bool,
    pub outcome: Option<TickOutcome>,
}

/// Run/pause/game-over state machine around a [`GameState`].
///
/// The loop is the only writer of the game state; input reaches it through
/// [`GameLoop::apply`] between frames.
pub struct GameLoop<St, Sp> {
    config: GameConfig,
    phase: Phase,
    state: GameState,
    ticker: Ticker,
    high_score: u32,
    store: St,
    spawner: Sp,
}

impl<St: ScoreStore, Sp: FoodSpawner> GameLoop<St, Sp> {
    pub fn new(config: GameConfig, store: St, mut spawner: Sp) -> Self {
        let high_score = store.load_high_score();
        let state = GameState::new(&config, &mut spawner);
        debug!(high_score, "loaded best score");
        Self {
            config,
            phase: Phase::Idle,
            state,
            ticker: Ticker::default(),
            high_score,
            store,
            spawner,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &St {
        &self.store
    }

    pub fn apply(&mut self, intent: Intent, now_ms: f64) {
        match intent {
            Intent::Start => {
                self.start(now_ms);
            }
            Intent::TogglePause => {
                self.toggle_pause();
            }
            Intent::Steer(dir) => {
                self.steer(dir);
            }
        }
    }

    /// Begins a fresh game. Ignored while a game is in progress.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if !matches!(self.phase, Phase::Idle | Phase::Over) {
            return false;
        }
        self.state = GameState::new(&self.config, &mut self.spawner);
        self.phase = Phase::Running;
        self.ticker.arm(now_ms);
        info!(high_score = self.high_score, "game started");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Idle | Phase::Over => return false,
        };
        debug!(phase = ?self.phase, "pause toggled");
        true
    }

    pub fn steer(&mut self, dir: Direction) -> bool {
        match self.phase {
            Phase::Running | Phase::Paused => self.state.steer(dir),
            Phase::Idle | Phase::Over => false,
        }
    }

    /// Advances at most one tick if the interval has elapsed.
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        if self.phase != Phase::Running || !self.ticker.due(now_ms, self.state.speed_ms()) {
            return Frame::default();
        }

        let outcome = self.state.tick(&self.config, &mut self.spawner);
        trace!(?outcome, head = ?self.state.head(), "tick");
        if let TickOutcome::Crashed(collision) = outcome {
            info!(score = self.state.score(), ?collision, "game over");
            self.game_over();
        }
        Frame { ticked: true, outcome: Some(outcome) }
    }

    fn game_over(&mut self) {
        self.phase = Phase::Over;
        self.ticker.cancel();

        let score = self.state.score();
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        info!(score, "new best score");
        if let Err(err) = self.store.save_high_score(score) {
            warn!(%err, "could not persist best score");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::Scripted;
    use crate::game::Collision;
    use crate::grid::Cell;
    use crate::store::{MemoryStore, StoreError};

    type TestLoop = GameLoop<MemoryStore, Scripted>;

    fn new_loop(store: MemoryStore) -> TestLoop {
        GameLoop::new(GameConfig::default(), store, Scripted::new(&[Cell::new(0, 0)]))
    }

    /// Steps the clock in 10 ms frames until a tick happens.
    fn next_tick(gl: &mut TestLoop, now: &mut f64) -> Frame {
        for _ in 0..1000 {
            *now += 10.0;
            let f = gl.frame(*now);
            if f.ticked {
                return f;
            }
        }
        panic!("no tick");
    }

    #[test]
    fn test_starts_idle_and_does_not_tick() {
        let mut gl = new_loop(MemoryStore::default());
        assert_eq!(gl.phase(), Phase::Idle);
        assert_eq!(gl.frame(1e6), Frame::default());
        assert!(!gl.steer(Direction::Up));
    }

    #[test]
    fn test_tick_cadence_follows_speed() {
        let mut gl = new_loop(MemoryStore::default());
        assert!(gl.start(0.0));
        assert!(!gl.frame(149.0).ticked);
        assert!(gl.frame(150.0).ticked);
        assert_eq!(gl.state().head(), Cell::new(11, 10));
        assert!(!gl.frame(299.0).ticked);
        assert!(gl.frame(300.0).ticked);
    }

    #[test]
    fn test_start_is_idempotent_while_playing() {
        let mut gl = new_loop(MemoryStore::default());
        assert!(gl.start(0.0));
        gl.frame(150.0);
        assert!(!gl.start(200.0));
        assert_eq!(gl.state().head(), Cell::new(11, 10));

        gl.toggle_pause();
        assert!(!gl.start(300.0));
        assert_eq!(gl.phase(), Phase::Paused);
    }

    #[test]
    fn test_pause_suppresses_ticks() {
        let mut gl = new_loop(MemoryStore::default());
        assert!(!gl.toggle_pause());

        gl.start(0.0);
        assert!(gl.toggle_pause());
        assert_eq!(gl.phase(), Phase::Paused);
        assert!(!gl.frame(10_000.0).ticked);
        assert_eq!(gl.state().head(), Cell::new(10, 10));

        // Steering still queues while paused.
        assert!(gl.steer(Direction::Down));

        assert!(gl.toggle_pause());
        assert!(gl.frame(10_010.0).ticked);
        assert_eq!(gl.state().head(), Cell::new(10, 11));
    }

    #[test]
    fn test_reversal_request_is_dropped() {
        let mut gl = new_loop(MemoryStore::default());
        let mut now = 0.0;
        gl.start(now);
        gl.apply(Intent::Steer(Direction::Down), now);
        next_tick(&mut gl, &mut now);

        gl.apply(Intent::Steer(Direction::Up), now);
        assert_eq!(gl.state().next_direction(), Direction::Down);
        next_tick(&mut gl, &mut now);
        assert_eq!(gl.state().head(), Cell::new(10, 12));
    }

    #[test]
    fn test_wall_crash_ends_game_and_saves_best() {
        let mut gl = new_loop(MemoryStore::default());
        let mut now = 0.0;
        gl.start(now);
        gl.state_mut().set_food(Cell::new(11, 10));

        assert_eq!(next_tick(&mut gl, &mut now).outcome, Some(TickOutcome::Ate));
        let mut crash = None;
        for _ in 0..20 {
            let f = next_tick(&mut gl, &mut now);
            if let Some(TickOutcome::Crashed(c)) = f.outcome {
                crash = Some(c);
                break;
            }
        }
        assert_eq!(crash, Some(Collision::Wall));
        assert_eq!(gl.phase(), Phase::Over);
        assert_eq!(gl.high_score(), 1);
        assert_eq!(gl.store().stored(), Some(1));
        assert_eq!(gl.store().writes(), 1);

        // Nothing moves after game over.
        let head = gl.state().head();
        assert_eq!(gl.frame(now + 1e6), Frame::default());
        assert_eq!(gl.state().head(), head);
        assert!(!gl.toggle_pause());
    }

    #[test]
    fn test_best_score_written_only_when_beaten() {
        let mut gl = new_loop(MemoryStore::with_score(1));
        assert_eq!(gl.high_score(), 1);
        let mut now = 0.0;

        // Ties do not write.
        gl.start(now);
        gl.state_mut().set_food(Cell::new(11, 10));
        while gl.phase() == Phase::Running {
            next_tick(&mut gl, &mut now);
        }
        assert_eq!(gl.store().writes(), 0);
        assert_eq!(gl.high_score(), 1);

        // A zero-score game does not write either.
        gl.start(now);
        while gl.phase() == Phase::Running {
            next_tick(&mut gl, &mut now);
        }
        assert_eq!(gl.store().writes(), 0);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut gl = new_loop(MemoryStore::default());
        let mut now = 0.0;
        gl.start(now);
        gl.state_mut().set_food(Cell::new(11, 10));
        gl.steer(Direction::Up);
        gl.steer(Direction::Right);
        while gl.phase() == Phase::Running {
            next_tick(&mut gl, &mut now);
        }
        assert!(gl.start(now));
        let s = gl.state();
        assert_eq!(s.snake().len(), 1);
        assert_eq!(s.head(), Cell::new(10, 10));
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.score(), 0);
        assert_eq!(s.speed_ms(), 150);
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn load_high_score(&self) -> u32 {
            0
        }

        fn save_high_score(&mut self, _score: u32) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_save_failure_keeps_best_in_memory() {
        let spawner = Scripted::new(&[Cell::new(11, 10)]);
        let mut gl = GameLoop::new(GameConfig::default(), FailingStore, spawner);
        gl.start(0.0);
        // Food respawns at (0,0) once (11,10) is taken.
        gl.spawner.0 = [Cell::new(0, 0)].into_iter().collect();
        let mut now = 0.0;
        while gl.phase() == Phase::Running {
            now += 10.0;
            gl.frame(now);
        }
        assert_eq!(gl.high_score(), 1);
    }
}
