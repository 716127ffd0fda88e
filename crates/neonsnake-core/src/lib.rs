pub mod bot;
pub mod collision;
pub mod config;
pub mod food;
pub mod grid;

use rand::Rng;
use serde::{Deserialize, Serialize};

use config::SnakeConfig;

/// A cell on the board. Signed so an off-board candidate head is
/// representable in walls mode before the collision check classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Cardinal heading on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order, used as the heuristic's tie-break.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step for this heading; y grows downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What happens when the head would leave the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryMode {
    /// Leaving the grid is fatal.
    Walls,
    /// Coordinates wrap modulo the grid size.
    PassThrough,
}

/// Lifecycle of one game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Terminated,
}

/// Complete simulation state for one game.
///
/// A value type: every operation consumes `&self` and returns a fresh state,
/// so hosts can keep, replay, or diff snapshots freely. The grid size, the
/// boundary mode, and the speed knobs are fixed for the lifetime of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeState {
    /// Head first, tail last. Never empty.
    pub body: Vec<Position>,
    pub food: Position,
    /// Direction applied on the most recent committed tick.
    pub heading: Direction,
    /// Direction that will be applied on the next tick.
    pub pending_heading: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub mode: BoundaryMode,
    pub grid_size: u32,
    /// Current inter-tick delay; the host schedules ticks at this cadence.
    pub tick_interval_ms: u32,
    pub speed_decrement_ms: u32,
    pub min_tick_ms: u32,
    pub food_reward: u32,
}

impl SnakeState {
    /// Fresh game: three-segment body centered on the grid, heading right,
    /// food placed by the generator, status idle.
    pub fn new<R: Rng>(config: &SnakeConfig, rng: &mut R) -> Self {
        let center = (config.grid_size / 2) as i32;
        let body = vec![
            Position { x: center, y: center },
            Position {
                x: center - 1,
                y: center,
            },
            Position {
                x: center - 2,
                y: center,
            },
        ];
        let food = food::generate_food(&body, config.grid_size, rng);

        Self {
            body,
            food,
            heading: Direction::Right,
            pending_heading: Direction::Right,
            score: 0,
            status: GameStatus::Idle,
            mode: config.mode,
            grid_size: config.grid_size,
            tick_interval_ms: config.initial_tick_ms,
            speed_decrement_ms: config.speed_decrement_ms,
            min_tick_ms: config.min_tick_ms,
            food_reward: config.food_reward,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Idle → Running. Any other status is returned unchanged; a terminated
    /// game must be replaced via [`SnakeState::new`] first.
    pub fn start(&self) -> Self {
        let mut next = self.clone();
        if next.status == GameStatus::Idle {
            next.status = GameStatus::Running;
        }
        next
    }

    /// Running ↔ Paused toggle; a no-op in any other status.
    pub fn toggle_pause(&self) -> Self {
        let mut next = self.clone();
        next.status = match next.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            other => other,
        };
        next
    }

    /// Advance the simulation by one step.
    ///
    /// A no-op unless the game is running. The buffered heading is applied,
    /// the head projected, and the move either terminates the game (body,
    /// food, and score frozen at their pre-move values), grows the body by
    /// one on food, or shifts the body forward. Eating rewards the fixed
    /// score, respawns food over the already-grown body, and shortens the
    /// tick interval down to its floor.
    pub fn tick<R: Rng>(&self, rng: &mut R) -> Self {
        if self.status != GameStatus::Running {
            return self.clone();
        }

        let candidate = grid::next_head(self.head(), self.pending_heading, self.grid_size, self.mode);

        if collision::is_fatal(candidate, &self.body, self.grid_size, self.mode) {
            let mut next = self.clone();
            next.status = GameStatus::Terminated;
            return next;
        }

        let mut body = Vec::with_capacity(self.body.len() + 1);
        body.push(candidate);
        body.extend_from_slice(&self.body);

        let mut next = self.clone();
        if candidate == self.food {
            next.score += self.food_reward;
            next.food = food::generate_food(&body, self.grid_size, rng);
            next.tick_interval_ms = self
                .tick_interval_ms
                .saturating_sub(self.speed_decrement_ms)
                .max(self.min_tick_ms);
        } else {
            body.pop();
        }
        next.body = body;
        next.heading = self.pending_heading;
        next
    }

    /// Buffer a heading change for the next tick.
    ///
    /// A request that exactly reverses the committed heading is rejected —
    /// it would drive the head into the second body segment. Later requests
    /// between ticks overwrite earlier ones; only the last wins.
    pub fn request_direction(&self, requested: Direction) -> Self {
        if requested == self.heading.opposite() {
            tracing::debug!(?requested, heading = ?self.heading, "Ignored reversal request");
            return self.clone();
        }
        let mut next = self.clone();
        next.pending_heading = requested;
        next
    }
}
