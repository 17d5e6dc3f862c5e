//! Collision and combat resolution, evaluated once per tick after motion.
//!
//! Ordering within a tick: player/enemy contacts, then projectile hits, then
//! cleanup. Defeats are counted at the moment health first crosses to <= 0;
//! cleanup then drops dead and out-of-bounds entities so they never take part
//! in a later tick.
//!
//! The hit-invulnerability window is measured against the wall clock of the
//! validating process, not the simulated clock. That reproduces the recorded
//! behavior of the live game exactly; see the clock module.

use crate::config::ArenaConfig;
use crate::game::constants::{combat, timing};
use crate::game::state::SimState;
use crate::util::clock::WallClock;

/// Resolve all collisions and combat for the current tick
pub fn resolve(state: &mut SimState, config: &ArenaConfig, clock: &dyn WallClock) {
    resolve_player_contacts(state, clock);
    resolve_projectile_hits(state);
    cleanup(state, config);
}

/// Player vs. enemy contacts. Skipped entirely while the invulnerability
/// window from the last hit is still open; once open, every overlapping
/// enemy is processed in this tick.
fn resolve_player_contacts(state: &mut SimState, clock: &dyn WallClock) {
    let now = clock.now_ms();
    let eligible = match state.player.last_hit_ms {
        Some(last) => now.saturating_sub(last) >= timing::HIT_INVULN_MS,
        None => true,
    };
    if !eligible {
        return;
    }

    let SimState {
        player,
        enemies,
        defeated,
        ..
    } = state;

    let player_box = player.aabb();
    for enemy in enemies.iter_mut() {
        if !player_box.intersects(&enemy.aabb()) {
            continue;
        }

        player.last_hit_ms = Some(now);

        if player.extra_life {
            // One free kill per run, then the scan stops for this tick
            player.extra_life = false;
            if enemy.is_alive() {
                enemy.health = 0.0;
                *defeated += 1;
            }
            break;
        }

        let damage_to_player = combat::BASE_HIT_DAMAGE * (1.0 - player.damage_reduction);
        let damage_to_enemy = combat::BASE_CONTACT_DAMAGE * (1.0 + player.damage_bonus);
        if enemy.is_alive() {
            enemy.health -= damage_to_enemy;
            if !enemy.is_alive() {
                *defeated += 1;
            }
        }
        player.health -= damage_to_player;
    }
}

/// Projectile vs. enemy. Each projectile scans enemies newest-first, lands
/// on the first live overlap, and is spent on that hit.
fn resolve_projectile_hits(state: &mut SimState) {
    let SimState {
        enemies,
        projectiles,
        defeated,
        ..
    } = state;

    for p_idx in (0..projectiles.len()).rev() {
        let projectile_box = projectiles[p_idx].aabb();
        let mut hit = false;

        for enemy in enemies.iter_mut().rev() {
            if enemy.is_alive() && projectile_box.intersects(&enemy.aabb()) {
                enemy.health -= combat::PROJECTILE_DAMAGE;
                if !enemy.is_alive() {
                    *defeated += 1;
                }
                hit = true;
                break;
            }
        }

        if hit {
            projectiles.remove(p_idx);
        }
    }
}

/// Drop defeated and out-of-bounds entities. Defeats were already counted
/// when health crossed zero; an enemy leaving the arena alive counts for
/// nothing.
fn cleanup(state: &mut SimState, config: &ArenaConfig) {
    state
        .enemies
        .retain(|e| e.is_alive() && !e.out_of_bounds(config));
    state.projectiles.retain(|p| !p.out_of_bounds(config));
}
