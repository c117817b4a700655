//! Match-level data model — scoreboard and respawn scheduling.
//!
//! Stored in `MatchEngine`, NOT as ECS entities.

use std::collections::BTreeMap;

use arena_core::state::ScoreEntry;
use arena_core::types::PlayerId;

/// Kill tally per player. Keys are fixed at match start; a kill credited
/// to an unregistered id is dropped.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    kills: BTreeMap<PlayerId, u32>,
}

impl ScoreBoard {
    /// Fresh scoreboard with zeroed entries for the given players.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            kills: players.into_iter().map(|p| (p, 0)).collect(),
        }
    }

    /// Credit one kill to `attacker`.
    pub fn add_kill(&mut self, attacker: PlayerId) {
        if let Some(kills) = self.kills.get_mut(&attacker) {
            *kills += 1;
        }
    }

    pub fn kills(&self, player: PlayerId) -> u32 {
        self.kills.get(&player).copied().unwrap_or(0)
    }

    /// Player with the highest tally. Ties resolve to the lower id,
    /// which cannot matter for win detection: only one player can cross
    /// the winning score on a single kill.
    pub fn leader(&self) -> Option<(PlayerId, u32)> {
        self.kills
            .iter()
            .max_by_key(|(_, kills)| **kills)
            .map(|(p, kills)| (*p, *kills))
    }

    /// Scoreboard lines in player-id order.
    pub fn entries(&self) -> Vec<ScoreEntry> {
        self.kills
            .iter()
            .map(|(player_id, kills)| ScoreEntry {
                player_id: *player_id,
                kills: *kills,
            })
            .collect()
    }
}

/// Pending respawn tasks, keyed by player so at most one task can exist
/// per id.
#[derive(Debug, Clone, Default)]
pub struct RespawnQueue {
    due: BTreeMap<PlayerId, u64>,
}

impl RespawnQueue {
    /// Schedule a respawn at `due_tick`. Returns false (and leaves the
    /// existing task untouched) if one is already pending for `player`.
    pub fn schedule(&mut self, player: PlayerId, due_tick: u64) -> bool {
        if self.due.contains_key(&player) {
            return false;
        }
        self.due.insert(player, due_tick);
        true
    }

    /// Remove and return all players whose deadline has arrived.
    pub fn take_due(&mut self, current_tick: u64) -> Vec<PlayerId> {
        let ready: Vec<PlayerId> = self
            .due
            .iter()
            .filter(|(_, due)| current_tick >= **due)
            .map(|(p, _)| *p)
            .collect();
        for player in &ready {
            self.due.remove(player);
        }
        ready
    }

    pub fn is_pending(&self, player: PlayerId) -> bool {
        self.due.contains_key(&player)
    }

    /// Players still waiting, in id order.
    pub fn pending(&self) -> Vec<PlayerId> {
        self.due.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.due.clear();
    }
}
