//! Spawn scheduler: fires every wave whose trigger time has been reached.
//!
//! The wave list is sorted ascending by trigger time and consumed exactly
//! once through `SimState::spawn_cursor`. A single tick may fire zero, one,
//! or several waves depending on how much time it spans; firing order always
//! follows the schedule.

use crate::config::{ArenaConfig, Edge};
use crate::game::constants::enemy_speed;
use crate::game::state::SimState;
use crate::util::vec2::Vec2;

/// Fire all waves with `trigger_ms <= clock`, spawning their enemies
pub fn update(state: &mut SimState, config: &ArenaConfig) {
    while state.spawn_cursor < config.waves.len()
        && config.waves[state.spawn_cursor].trigger_ms <= state.clock_ms
    {
        let wave = config.waves[state.spawn_cursor];
        state.spawn_cursor += 1;

        let archetype = &config.enemies[wave.archetype];
        let position = spawn_position(config, wave.edge, wave.percent, archetype.size.width, archetype.size.height);

        let speed = enemy_speed(config.movement_patterns[wave.archetype]);
        let velocity = (config.center() - position).normalize() * speed;

        state.add_enemy(position, velocity, archetype.size, archetype.max_health, wave.archetype);
    }
}

/// Project an edge percent onto a spawn point just outside the arena.
/// Top and bottom edges run across the width, left and right across the
/// height; the enemy box sits flush against the boundary.
fn spawn_position(config: &ArenaConfig, edge: Edge, percent: f32, width: f32, height: f32) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(config.width * percent / 100.0, -height),
        Edge::Bottom => Vec2::new(config.width * percent / 100.0, config.height),
        Edge::Right => Vec2::new(config.width, config.height * percent / 100.0),
        Edge::Left => Vec2::new(-width, config.height * percent / 100.0),
    }
}
