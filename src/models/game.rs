use serde::Deserialize;

/// Boss the tap batches are damaging
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boss {
    pub level: u32,
    pub current_health: i64,
    pub max_health: i64,
}

/// Free booster counters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBoosts {
    pub current_turbo_amount: u32,
    pub current_refill_energy_amount: u32,
}

/// Full game state returned by the config query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub coins_amount: i64,
    pub current_energy: i64,
    pub max_energy: i64,
    pub current_boss: Boss,
    pub free_boosts: FreeBoosts,
}

/// Result of a processed taps batch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapsBatchResult {
    pub coins_amount: i64,
    pub current_energy: i64,
    pub max_energy: i64,
    pub current_boss: Boss,
}

/// Result of a booster activation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterResult {
    pub current_energy: i64,
    pub current_boss: Boss,
}

/// Profile fields from the "me" query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
}
