//! Kinematics engine: per-tick motion for the player, enemies, and
//! projectiles.
//!
//! The player moves along the normalized input vector at their derived speed
//! and is clamped so the bounding box stays fully inside the arena. Enemies
//! and projectiles integrate their velocity unconditionally; the combat
//! resolver culls them once out of bounds.

use crate::config::ArenaConfig;
use crate::game::state::SimState;
use crate::util::vec2::Vec2;

/// Advance all positions by `dt` seconds given the tick's movement input
pub fn update(state: &mut SimState, config: &ArenaConfig, movement: Vec2, dt: f32) {
    let (direction, len) = movement.normalize_with_length();
    if len > 0.0 {
        state.player.position += direction * state.player.speed * dt;
    }

    // Keep the player's bounding box fully inside the arena
    let max_x = config.width - state.player.size.width;
    let max_y = config.height - state.player.size.height;
    state.player.position.x = state.player.position.x.clamp(0.0, max_x);
    state.player.position.y = state.player.position.y.clamp(0.0, max_y);

    for enemy in state.enemies.iter_mut() {
        enemy.position += enemy.velocity * dt;
    }

    for projectile in state.projectiles.iter_mut() {
        projectile.position += projectile.velocity * dt;
    }
}
