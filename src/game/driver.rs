//! Simulation driver: replays a gameplay log tick by tick.
//!
//! Log entries carry cumulative timestamps; each entry advances the
//! simulation clock and drives one tick of kinematics, firing, spawning, and
//! combat in that fixed order. The run ends when the log is exhausted, the
//! 60 second cap is reached, or the player is defeated.

use crate::config::{ArenaConfig, CharacterProfile};
use crate::game::constants::timing;
use crate::game::state::SimState;
use crate::game::systems::{combat, kinematics, spawner};
use crate::protocol::{GameplayLogEntry, VirtueStats};
use crate::util::clock::WallClock;

/// Why a simulation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every log entry was consumed without another terminal condition
    LogExhausted,
    /// The simulated clock reached the match time cap
    TimeLimit,
    /// Player health dropped to zero
    PlayerDefeated,
}

/// Final tally of one simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Enemies whose health crossed to <= 0 during the run
    pub defeated: u32,
    /// Simulated seconds survived, capped at the match limit
    pub elapsed_secs: f32,
    pub reason: EndReason,
}

impl SimulationResult {
    /// The score the server derives from its own replay
    pub fn canonical_score(&self) -> i64 {
        (self.defeated as f32 * self.elapsed_secs).round() as i64
    }
}

/// Replay the full gameplay log and produce the final tally.
///
/// Pure in everything except the injected wall clock: for a fixed config,
/// character, virtue, log, and clock, repeated runs are identical.
pub fn run(
    config: &ArenaConfig,
    profile: &CharacterProfile,
    virtue: &VirtueStats,
    log: &[GameplayLogEntry],
    clock: &dyn WallClock,
) -> SimulationResult {
    let mut state = SimState::new(config, profile, virtue);
    let mut reason = EndReason::LogExhausted;

    for entry in log {
        // Cumulative timestamps; structural validation rejects regressions,
        // saturation keeps the clock monotonic regardless
        let delta_ms = entry.time.saturating_sub(state.clock_ms);
        state.clock_ms = state.clock_ms.max(entry.time);

        if state.clock_ms >= timing::TIME_LIMIT_MS {
            reason = EndReason::TimeLimit;
            break;
        }

        let dt = delta_ms as f32 / 1000.0;
        kinematics::update(&mut state, config, entry.movement, dt);

        if entry.fire.x != 0.0 || entry.fire.y != 0.0 {
            state.fire_projectile(entry.fire);
        }

        spawner::update(&mut state, config);
        combat::resolve(&mut state, config, clock);

        if state.player.is_defeated() {
            reason = EndReason::PlayerDefeated;
            break;
        }
    }

    let elapsed_secs = (state.clock_ms as f32 / 1000.0).min(timing::TIME_LIMIT_SECS);
    SimulationResult {
        defeated: state.defeated,
        elapsed_secs,
        reason,
    }
}
