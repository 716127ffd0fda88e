use serde::Serialize;
use uuid::Uuid;

use neonsnake_core::BoundaryMode;

use crate::time::timestamp_now;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub username: String,
    pub score: u32,
    pub mode: BoundaryMode,
    pub submitted_at: String,
}

/// In-memory high-score table, kept sorted descending by score.
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    max_entries: usize,
}

impl Leaderboard {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Populate the table with the stock arcade roster shown before anyone
    /// has played.
    pub fn seed_defaults(&mut self) {
        const SEED: [(&str, u32, BoundaryMode); 10] = [
            ("NeonMaster", 2500, BoundaryMode::Walls),
            ("PixelQueen", 2340, BoundaryMode::PassThrough),
            ("RetroGamer", 2100, BoundaryMode::Walls),
            ("SnakeKing", 1980, BoundaryMode::PassThrough),
            ("ArcadeHero", 1850, BoundaryMode::Walls),
            ("CyberSnake", 1720, BoundaryMode::PassThrough),
            ("GlowWorm", 1650, BoundaryMode::Walls),
            ("BitRunner", 1580, BoundaryMode::PassThrough),
            ("NightCrawler", 1490, BoundaryMode::Walls),
            ("VoidWalker", 1420, BoundaryMode::PassThrough),
        ];
        for (username, score, mode) in SEED {
            self.entries.push(LeaderboardEntry {
                id: Uuid::new_v4(),
                username: username.to_string(),
                score,
                mode,
                submitted_at: timestamp_now(),
            });
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// All entries, best first, optionally filtered by boundary mode.
    pub fn entries(&self, mode: Option<BoundaryMode>) -> Vec<LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| mode.is_none_or(|m| e.mode == m))
            .cloned()
            .collect()
    }

    /// Record a score and return its 1-based overall rank. Stable sort, so
    /// an equal score ranks below the earlier submission. The table is
    /// truncated to its capacity afterwards; a rank past the cut is still
    /// reported even though the entry no longer appears.
    pub fn submit(&mut self, username: &str, score: u32, mode: BoundaryMode) -> usize {
        let entry = LeaderboardEntry {
            id: Uuid::new_v4(),
            username: username.to_string(),
            score,
            mode,
            submitted_at: timestamp_now(),
        };
        let id = entry.id;

        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));

        let rank = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .map(|i| i + 1)
            .unwrap_or(self.entries.len());

        self.entries.truncate(self.max_entries);
        rank
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
