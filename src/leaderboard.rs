//! Leaderboard: built-in rivals plus the player's last score.

use crate::utils::persistence::{KeyValueStore, StoreError};

/// Store key holding the last finished run's score.
pub const SCORE_KEY: &str = "@score";

/// Shown for the player when no nickname is set.
pub const ANONYMOUS_NAME: &str = "You";

const SEED: [(&str, u32); 7] = [
    ("Crystal 🇺🇸", 150),
    ("Peter 🇨🇦", 120),
    ("Jose 🇲🇽", 119),
    ("Gerhard 🇩🇪", 116),
    ("Christa 🇬🇧", 103),
    ("James 🇦🇺", 92),
    ("Laurand 🇺🇸", 85),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

pub fn seed_entries() -> Vec<LeaderboardEntry> {
    SEED.iter()
        .map(|&(name, score)| LeaderboardEntry {
            name: name.to_string(),
            score,
        })
        .collect()
}

/// Last saved score. Missing, unreadable or non-numeric values are `None`.
pub fn load_last_score(store: &KeyValueStore) -> Option<u32> {
    let raw = match store.get(SCORE_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("failed to fetch the score: {}", e);
            return None;
        }
    };
    match raw.trim().parse() {
        Ok(score) => Some(score),
        Err(e) => {
            log::warn!("ignoring stored score '{}': {}", raw, e);
            None
        }
    }
}

pub fn save_last_score(store: &KeyValueStore, score: u32) -> Result<(), StoreError> {
    store.set(SCORE_KEY, &score.to_string())
}

/// Merge the player's score into `entries` by name (or append it), then
/// sort by score, highest first. Ties keep their seed order.
pub fn merge_score(
    mut entries: Vec<LeaderboardEntry>,
    nickname: &str,
    score: Option<u32>,
) -> Vec<LeaderboardEntry> {
    if let Some(score) = score {
        let name = match nickname.trim() {
            "" => ANONYMOUS_NAME,
            name => name,
        };
        match entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.score = score,
            None => entries.push(LeaderboardEntry {
                name: name.to_string(),
                score,
            }),
        }
    }
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// What the leaderboard screen shows. Rebuilt on every focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub last_score: Option<u32>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: merge_score(seed_entries(), "", None),
            last_score: None,
        }
    }

    pub fn refresh(&mut self, store: &KeyValueStore, nickname: &str) {
        self.last_score = load_last_score(store);
        self.entries = merge_score(seed_entries(), nickname, self.last_score);
    }

    /// 1-based rank of `nickname`, if listed.
    pub fn rank_of(&self, nickname: &str) -> Option<usize> {
        let name = match nickname.trim() {
            "" => ANONYMOUS_NAME,
            name => name,
        };
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| i + 1)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}
