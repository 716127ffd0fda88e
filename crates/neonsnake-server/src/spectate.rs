use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use neonsnake_core::config::SnakeConfig;
use neonsnake_core::{BoundaryMode, GameStatus, SnakeState, bot};

use crate::time::timestamp_now;

/// One state snapshot pushed to spectators after every committed tick.
#[derive(Debug, Clone, Serialize)]
pub struct SpectateFrame {
    pub tick: u64,
    pub state: SnakeState,
}

/// The streamers whose games run from server start, mirroring the stock
/// "live now" roster.
pub const SEED_STREAMERS: [(&str, &str, BoundaryMode); 3] = [
    ("live1", "StreamerPro", BoundaryMode::Walls),
    ("live2", "NightOwl", BoundaryMode::PassThrough),
    ("live3", "GameMaster", BoundaryMode::Walls),
];

/// A registered live game: metadata plus the frame channel its driver
/// publishes on.
pub struct LiveGameHandle {
    pub id: String,
    pub username: String,
    pub mode: BoundaryMode,
    pub started_at: String,
    score: AtomicU32,
    frames: broadcast::Sender<SpectateFrame>,
}

impl LiveGameHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<SpectateFrame> {
        self.frames.subscribe()
    }

    pub fn score(&self) -> u32 {
        self.score.load(Ordering::Relaxed)
    }
}

/// Listing shape for `GET /api/v1/live`.
#[derive(Debug, Clone, Serialize)]
pub struct LiveGameSummary {
    pub id: String,
    pub username: String,
    pub score: u32,
    pub mode: BoundaryMode,
    pub started_at: String,
}

/// Registry of running live games.
pub struct SpectateHub {
    games: std::sync::RwLock<HashMap<String, Arc<LiveGameHandle>>>,
    cancel: CancellationToken,
    broadcast_capacity: usize,
}

impl SpectateHub {
    pub fn new(broadcast_capacity: usize) -> Self {
        Self {
            games: std::sync::RwLock::new(HashMap::new()),
            cancel: CancellationToken::new(),
            broadcast_capacity,
        }
    }

    pub fn register(&self, id: &str, username: &str, mode: BoundaryMode) -> Arc<LiveGameHandle> {
        let (frames, _) = broadcast::channel(self.broadcast_capacity);
        let handle = Arc::new(LiveGameHandle {
            id: id.to_string(),
            username: username.to_string(),
            mode,
            started_at: timestamp_now(),
            score: AtomicU32::new(0),
            frames,
        });
        self.games
            .write()
            .expect("spectate registry lock poisoned")
            .insert(id.to_string(), Arc::clone(&handle));
        handle
    }

    pub fn get(&self, id: &str) -> Option<Arc<LiveGameHandle>> {
        self.games
            .read()
            .expect("spectate registry lock poisoned")
            .get(id)
            .map(Arc::clone)
    }

    /// Current games, ordered by id for a stable listing.
    pub fn list(&self) -> Vec<LiveGameSummary> {
        let games = self.games.read().expect("spectate registry lock poisoned");
        let mut summaries: Vec<LiveGameSummary> = games
            .values()
            .map(|g| LiveGameSummary {
                id: g.id.clone(),
                username: g.username.clone(),
                score: g.score(),
                mode: g.mode,
                started_at: g.started_at.clone(),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop every driver task.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Register and launch the seeded streamer games.
pub fn spawn_seeded(hub: &SpectateHub, game_config: &SnakeConfig, decision_interval_ms: u64) {
    for (id, username, mode) in SEED_STREAMERS {
        let handle = hub.register(id, username, mode);
        let config = SnakeConfig {
            mode,
            ..game_config.clone()
        };
        let cancel = hub.cancel_token();
        tracing::info!(game_id = id, username, "Starting live game driver");
        tokio::spawn(run_live_game(handle, config, decision_interval_ms, cancel));
    }
}

/// Drive one spectated game until cancelled.
///
/// Two cadences, as in the player-facing host: the heuristic proposes a
/// direction every `decision_interval_ms`, and the simulation commits a move
/// every `tick_interval_ms` of the current state. Each committed tick is
/// published as a frame. A terminated game restarts from a fresh state with
/// score zero; only the first life carries a seeded score so the stream
/// joins mid-session like a real broadcast.
pub async fn run_live_game(
    handle: Arc<LiveGameHandle>,
    config: SnakeConfig,
    decision_interval_ms: u64,
    cancel: CancellationToken,
) {
    let mut rng = StdRng::from_os_rng();
    let mut state = SnakeState::new(&config, &mut rng).start();
    state.score = rng.random_range(100..400);
    handle.score.store(state.score, Ordering::Relaxed);

    let mut tick: u64 = 0;
    let mut decide = tokio::time::interval(Duration::from_millis(decision_interval_ms));
    decide.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let move_delay = tokio::time::sleep(Duration::from_millis(state.tick_interval_ms as u64));
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = decide.tick() => {
                let dir = bot::choose_direction(&state, &mut rng);
                state = state.request_direction(dir);
            }
            _ = move_delay => {
                if state.status == GameStatus::Terminated {
                    state = SnakeState::new(&config, &mut rng).start();
                    tick = 0;
                } else {
                    state = state.tick(&mut rng);
                    tick += 1;
                }
                handle.score.store(state.score, Ordering::Relaxed);
                let _ = handle.frames.send(SpectateFrame {
                    tick,
                    state: state.clone(),
                });
            }
        }
    }

    tracing::info!(game_id = %handle.id, "Live game driver stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SnakeConfig {
        SnakeConfig {
            initial_tick_ms: 10,
            min_tick_ms: 5,
            ..SnakeConfig::default()
        }
    }

    #[test]
    fn register_and_list() {
        let hub = SpectateHub::new(16);
        hub.register("live2", "NightOwl", BoundaryMode::PassThrough);
        hub.register("live1", "StreamerPro", BoundaryMode::Walls);

        let listed = hub.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "live1");
        assert_eq!(listed[1].id, "live2");
        assert!(hub.get("live1").is_some());
        assert!(hub.get("nope").is_none());
    }

    #[tokio::test]
    async fn driver_publishes_valid_frames() {
        let hub = SpectateHub::new(16);
        let handle = hub.register("live1", "StreamerPro", BoundaryMode::Walls);
        let mut rx = handle.subscribe();

        tokio::spawn(run_live_game(
            Arc::clone(&handle),
            fast_config(),
            20,
            hub.cancel_token(),
        ));

        for _ in 0..10 {
            let frame = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("timed out waiting for frame")
                .expect("frame channel closed");
            assert!(
                !frame.state.body.contains(&frame.state.food),
                "food inside body in a published frame"
            );
        }

        hub.shutdown();
    }

    #[tokio::test]
    async fn first_life_carries_seeded_score() {
        let hub = SpectateHub::new(16);
        let handle = hub.register("live1", "StreamerPro", BoundaryMode::Walls);
        let mut rx = handle.subscribe();

        tokio::spawn(run_live_game(
            Arc::clone(&handle),
            fast_config(),
            20,
            hub.cancel_token(),
        ));

        let frame = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for frame")
            .expect("frame channel closed");
        assert!(frame.state.score >= 100, "score {}", frame.state.score);
        assert!(handle.score() >= 100);

        hub.shutdown();
    }

    #[tokio::test]
    async fn shutdown_stops_the_driver() {
        let hub = SpectateHub::new(16);
        let handle = hub.register("live1", "StreamerPro", BoundaryMode::Walls);

        let task = tokio::spawn(run_live_game(
            Arc::clone(&handle),
            fast_config(),
            20,
            hub.cancel_token(),
        ));

        hub.shutdown();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("driver did not stop after cancel")
            .unwrap();
    }
}
