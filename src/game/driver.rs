//! Per-account game loop
//!
//! A pure decision core picks the next move from the observed game fields;
//! the driver executes it, refreshes the state, and repeats until the pass
//! ends. Any executor failure abandons the account's pass, never the
//! process.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::error::Result;
use crate::game::api::{BoosterKind, GameApi};
use crate::models::game::GameState;

/// Boss level after which a dead boss ends the account's run
pub const FINAL_BOSS_LEVEL: u32 = 10;

/// Mega-tap rounds performed under a turbo booster
const TURBO_ROUNDS: u32 = 10;
/// Taps per turbo round before halving
const TURBO_TAPS: u64 = 500_000_000;
/// Tries per turbo round, halving the batch on each failure
const TURBO_ROUND_TRIES: u32 = 3;

/// The fields the driver branches on
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    pub energy: i64,
    pub recharges: u32,
    pub turbos: u32,
    pub boss_level: u32,
    pub boss_health: i64,
}

impl From<&GameState> for GameView {
    fn from(state: &GameState) -> Self {
        Self {
            energy: state.current_energy,
            recharges: state.free_boosts.current_refill_energy_amount,
            turbos: state.free_boosts.current_turbo_amount,
            boss_level: state.current_boss.level,
            boss_health: state.current_boss.current_health,
        }
    }
}

/// Next move for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Dead final boss: advance once more and end the run
    Finished,
    /// Dead boss below the final level: advance and keep playing
    AdvanceBoss,
    /// Energy above the floor: spend it on a taps batch
    Tap,
    /// Energy at or below the floor with refills left
    Recharge,
    /// Nothing left to do this pass
    Stop,
}

/// Decide the next move from the observed fields
///
/// Boss-advance on zero health is a single idempotent rule here, wherever
/// the zero was observed.
pub fn next_action(view: &GameView, energy_floor: i64) -> Action {
    if view.boss_health == 0 {
        if view.boss_level >= FINAL_BOSS_LEVEL {
            return Action::Finished;
        }
        return Action::AdvanceBoss;
    }
    if view.energy > energy_floor {
        return Action::Tap;
    }
    if view.recharges > 0 {
        return Action::Recharge;
    }
    Action::Stop
}

/// Plays one account until its pass completes
pub struct Driver {
    api: GameApi,
    config: RunnerConfig,
}

impl Driver {
    pub fn new(api: GameApi, config: RunnerConfig) -> Self {
        Self { api, config }
    }

    /// Run one full pass for this account
    pub async fn run_pass(&self) -> Result<()> {
        let tag = self.api.tag();
        let mut state = self.api.game_state().await?;

        info!(
            account = %tag,
            balance = state.coins_amount,
            energy = state.current_energy,
            max_energy = state.max_energy,
            boss_level = state.current_boss.level,
            boss_health = state.current_boss.current_health,
            boss_max_health = state.current_boss.max_health,
            turbo = state.free_boosts.current_turbo_amount,
            recharge = state.free_boosts.current_refill_energy_amount,
            "Starting pass"
        );

        loop {
            let view = GameView::from(&state);
            match next_action(&view, self.config.energy_floor) {
                Action::Finished => {
                    info!(account = %tag, boss_level = view.boss_level, "Final boss defeated, run complete");
                    if let Err(e) = self.api.set_next_boss().await {
                        warn!(account = %tag, error = %e, "Boss advance failed on finished run");
                    }
                    return Ok(());
                }
                Action::AdvanceBoss => {
                    info!(account = %tag, "Boss defeated, advancing to the next one");
                    self.api.set_next_boss().await?;
                    state = self.api.game_state().await?;
                }
                Action::Tap => {
                    let taps = {
                        let mut rng = rand::thread_rng();
                        rng.gen_range(self.config.taps_min..=self.config.taps_max)
                    };
                    self.api.submit_taps(taps).await?;

                    state = self.api.game_state().await?;
                    info!(
                        account = %tag,
                        taps,
                        balance = state.coins_amount,
                        energy = state.current_energy,
                        max_energy = state.max_energy,
                        "Taps submitted"
                    );

                    if state.free_boosts.current_turbo_amount > 0 {
                        self.turbo_sequence(&tag).await?;
                        state = self.api.game_state().await?;
                    }

                    self.jitter_sleep(500, 1000).await;
                }
                Action::Recharge => {
                    info!(account = %tag, "Energy low, activating recharge booster");
                    let result = self.api.activate_booster(BoosterKind::Recharge).await?;
                    info!(account = %tag, energy = result.current_energy, "Energy recharged");
                    state = self.api.game_state().await?;
                }
                Action::Stop => {
                    debug!(account = %tag, "Pass complete");
                    return Ok(());
                }
            }
        }
    }

    /// Activate a turbo booster and hammer the boss with mega batches
    ///
    /// A failed round halves the batch and retries; giving up on a round is
    /// not fatal to the account.
    async fn turbo_sequence(&self, tag: &str) -> Result<()> {
        info!(account = %tag, "Activating turbo booster");
        let activated = self.api.activate_booster(BoosterKind::Turbo).await?;

        if activated.current_boss.current_health == 0 {
            info!(account = %tag, "Boss defeated, advancing to the next one");
            self.api.set_next_boss().await?;
            return Ok(());
        }

        for round in 1..=TURBO_ROUNDS {
            let mut taps = TURBO_TAPS;

            for attempt in 1..=TURBO_ROUND_TRIES {
                match self.api.submit_taps(taps).await {
                    Ok(result) => {
                        if result.current_boss.current_health == 0 {
                            info!(account = %tag, "Boss defeated, advancing to the next one");
                            self.api.set_next_boss().await?;
                        }
                        info!(
                            account = %tag,
                            round,
                            taps,
                            balance = result.coins_amount,
                            energy = result.current_energy,
                            "Turbo taps landed"
                        );
                        self.jitter_sleep(500, 1000).await;
                        break;
                    }
                    Err(e) => {
                        taps /= 2;
                        if attempt == TURBO_ROUND_TRIES {
                            warn!(account = %tag, round, error = %e, "Giving up on turbo round");
                        } else {
                            warn!(
                                account = %tag,
                                round,
                                attempt,
                                retry_taps = taps,
                                error = %e,
                                "Turbo taps failed, halving batch"
                            );
                        }
                        sleep(Duration::from_millis(200)).await;
                    }
                }
            }
        }

        Ok(())
    }

    async fn jitter_sleep(&self, min_ms: u64, max_ms: u64) {
        let ms = {
            let mut rng = rand::thread_rng();
            rng.gen_range(min_ms..=max_ms)
        };
        sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(
        energy: i64,
        recharges: u32,
        turbos: u32,
        boss_level: u32,
        boss_health: i64,
    ) -> GameView {
        GameView {
            energy,
            recharges,
            turbos,
            boss_level,
            boss_health,
        }
    }

    #[test]
    fn test_taps_while_energy_above_floor() {
        assert_eq!(next_action(&view(900, 0, 0, 1, 5000), 500), Action::Tap);
        assert_eq!(next_action(&view(501, 0, 0, 1, 5000), 500), Action::Tap);
    }

    #[test]
    fn test_recharges_when_low_with_boosters() {
        assert_eq!(next_action(&view(500, 3, 0, 1, 5000), 500), Action::Recharge);
        assert_eq!(next_action(&view(10, 1, 0, 1, 5000), 500), Action::Recharge);
    }

    #[test]
    fn test_stops_when_low_without_boosters() {
        assert_eq!(next_action(&view(500, 0, 0, 1, 5000), 500), Action::Stop);
        assert_eq!(next_action(&view(0, 0, 2, 1, 5000), 500), Action::Stop);
    }

    #[test]
    fn test_dead_boss_advances_regardless_of_energy() {
        assert_eq!(next_action(&view(900, 0, 0, 3, 0), 500), Action::AdvanceBoss);
        assert_eq!(next_action(&view(0, 0, 0, 3, 0), 500), Action::AdvanceBoss);
    }

    #[test]
    fn test_dead_final_boss_finishes_run() {
        assert_eq!(
            next_action(&view(900, 5, 1, FINAL_BOSS_LEVEL, 0), 500),
            Action::Finished
        );
        assert_eq!(
            next_action(&view(900, 0, 0, FINAL_BOSS_LEVEL + 2, 0), 500),
            Action::Finished
        );
    }

    #[test]
    fn test_live_final_boss_keeps_tapping() {
        assert_eq!(
            next_action(&view(900, 0, 0, FINAL_BOSS_LEVEL, 100), 500),
            Action::Tap
        );
    }

    #[test]
    fn test_view_from_state() {
        let state: GameState = serde_json::from_value(serde_json::json!({
            "coinsAmount": 1,
            "currentEnergy": 750,
            "maxEnergy": 1000,
            "currentBoss": { "level": 2, "currentHealth": 300, "maxHealth": 400 },
            "freeBoosts": { "currentTurboAmount": 1, "currentRefillEnergyAmount": 4 }
        }))
        .unwrap();

        let view = GameView::from(&state);
        assert_eq!(view.energy, 750);
        assert_eq!(view.recharges, 4);
        assert_eq!(view.turbos, 1);
        assert_eq!(view.boss_level, 2);
        assert_eq!(view.boss_health, 300);
    }
}
