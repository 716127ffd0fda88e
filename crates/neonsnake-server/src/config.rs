use serde::Deserialize;

/// Top-level server configuration, loaded from `neonsnake.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    pub auth: AuthFileConfig,
    pub limits: LimitsConfig,
    pub spectate: SpectateConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            web_root: "web".to_string(),
            auth: AuthFileConfig::default(),
            limits: LimitsConfig::default(),
            spectate: SpectateConfig::default(),
        }
    }
}

/// Auth section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthFileConfig {
    /// Secret for signing session tokens. When unset a random per-process
    /// secret is generated; sessions are in-memory, so tokens never need to
    /// outlive the process anyway.
    pub session_secret: Option<String>,
}

/// Infrastructure limits (subscriber caps, buffer sizes).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_sse_subscribers: usize,
    pub max_leaderboard_entries: usize,
    pub broadcast_capacity: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_sse_subscribers: 100,
            max_leaderboard_entries: 500,
            broadcast_capacity: 256,
        }
    }
}

/// Live-game driver settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpectateConfig {
    /// How often the pursuit heuristic proposes a direction (ms). Shorter
    /// than any tick interval so a decision lands before every move.
    pub decision_interval_ms: u64,
}

impl Default for SpectateConfig {
    fn default() -> Self {
        Self {
            decision_interval_ms: 200,
        }
    }
}

impl ServerConfig {
    /// Validate configuration, exiting on values the server cannot run with.
    pub fn validate(&self) {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            tracing::error!(
                addr = %self.listen_addr,
                "listen_addr is not a valid socket address"
            );
            std::process::exit(1);
        }

        if self.auth.session_secret.is_some() {
            tracing::warn!(
                "session_secret is set in config file — use NEONSNAKE_SESSION_SECRET in production"
            );
        }

        if self.limits.max_sse_subscribers == 0 {
            tracing::error!("limits.max_sse_subscribers must be > 0");
            std::process::exit(1);
        }
        if self.limits.max_leaderboard_entries == 0 {
            tracing::error!("limits.max_leaderboard_entries must be > 0");
            std::process::exit(1);
        }
        if self.limits.broadcast_capacity == 0 {
            tracing::error!("limits.broadcast_capacity must be > 0");
            std::process::exit(1);
        }
        if self.spectate.decision_interval_ms == 0 {
            tracing::error!("spectate.decision_interval_ms must be > 0");
            std::process::exit(1);
        }
    }

    /// Load config from `neonsnake.toml` if it exists, then apply env var
    /// overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("neonsnake.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from neonsnake.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse neonsnake.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No neonsnake.toml found, using defaults");
                ServerConfig::default()
            },
        };

        if let Ok(addr) = std::env::var("NEONSNAKE_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("NEONSNAKE_WEB_ROOT")
            && !root.is_empty()
        {
            config.web_root = root;
        }
        if let Ok(secret) = std::env::var("NEONSNAKE_SESSION_SECRET")
            && !secret.is_empty()
        {
            config.auth.session_secret = Some(secret);
        }
        if let Ok(val) = std::env::var("NEONSNAKE_MAX_SSE_SUBSCRIBERS")
            && let Ok(n) = val.parse::<usize>()
        {
            config.limits.max_sse_subscribers = n;
        }
        if let Ok(val) = std::env::var("NEONSNAKE_MAX_LEADERBOARD_ENTRIES")
            && let Ok(n) = val.parse::<usize>()
        {
            config.limits.max_leaderboard_entries = n;
        }

        config
    }
}
