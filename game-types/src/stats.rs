use serde::{Deserialize, Serialize};

/// Aggregate per-game counters for one player, read from the event sink.
///
/// Advisory display data only: readers fall back to the default when the
/// game has no recorded destination or a read fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_players: u32,
    pub players_solved: u32,
    /// 1-based: the first solver is rank 1.
    pub player_rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solve_time: Option<String>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_players: 1,
            players_solved: 1,
            player_rank: 1,
            solve_time: None,
        }
    }
}
