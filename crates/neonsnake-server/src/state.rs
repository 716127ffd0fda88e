use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::accounts::AccountStore;
use crate::auth::AuthConfig;
use crate::config::ServerConfig;
use crate::leaderboard::Leaderboard;
use crate::spectate::SpectateHub;

pub type SharedAccountStore = Arc<RwLock<AccountStore>>;
pub type SharedLeaderboard = Arc<RwLock<Leaderboard>>;

#[derive(Clone)]
pub struct AppState {
    pub accounts: SharedAccountStore,
    pub leaderboard: SharedLeaderboard,
    pub spectate: Arc<SpectateHub>,
    pub auth: AuthConfig,
    pub config: Arc<ServerConfig>,
    pub sse_subscriber_count: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let auth = AuthConfig {
            session_secret: config
                .auth
                .session_secret
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
        };

        let mut leaderboard = Leaderboard::new(config.limits.max_leaderboard_entries);
        leaderboard.seed_defaults();

        Self {
            accounts: Arc::new(RwLock::new(AccountStore::new())),
            leaderboard: Arc::new(RwLock::new(leaderboard)),
            spectate: Arc::new(SpectateHub::new(config.limits.broadcast_capacity)),
            auth,
            config: Arc::new(config),
            sse_subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// RAII guard for the SSE subscriber count: increments on creation,
/// decrements when the stream is dropped.
pub struct ConnectionGuard {
    counter: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    pub fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self { counter }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
