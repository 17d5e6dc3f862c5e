//! Simulation state definitions.
//!
//! All state here is owned by a single validator invocation: a run allocates
//! its own player/enemy/projectile collections and nothing survives past the
//! verdict. Entities carry stable ids so removals mid-tick never leave a
//! dangling reference.

use smallvec::SmallVec;

use crate::config::{ArenaConfig, CharacterProfile, Size};
use crate::game::constants::{movement, projectile};
use crate::protocol::VirtueStats;
use crate::util::aabb::Aabb;
use crate::util::vec2::Vec2;

/// Identifier for enemies and projectiles, unique within one run
pub type EntityId = u64;

/// Player state for one simulation run.
///
/// Speed and damage stats are derived once at spawn from the character
/// profile and virtue bundle; the tick loop applies them uniformly.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Top-left position in arena space
    pub position: Vec2,
    pub size: Size,
    pub health: f32,
    /// Units per second, after character and virtue multipliers
    pub speed: f32,
    /// Additive outgoing-damage multiplier from virtue stats
    pub damage_bonus: f32,
    /// Fraction of incoming damage removed, from virtue stats
    pub damage_reduction: f32,
    /// Wall-clock epoch ms of the last enemy contact; None before any hit
    pub last_hit_ms: Option<u64>,
    /// One-shot trait: first enemy contact is a free kill
    pub extra_life: bool,
    /// Side length of this player's square projectiles
    pub projectile_size: f32,
}

impl PlayerState {
    /// Spawn at arena center with stats derived from profile and virtue
    pub fn spawn(config: &ArenaConfig, profile: &CharacterProfile, virtue: &VirtueStats) -> Self {
        let position = Vec2::new(
            config.width / 2.0 - profile.size.width / 2.0,
            config.height / 2.0 - profile.size.height / 2.0,
        );
        let speed =
            movement::BASE_PLAYER_SPEED * profile.speed_multiplier * (1.0 + virtue.speed);

        Self {
            position,
            size: profile.size,
            health: profile.max_health,
            speed,
            damage_bonus: virtue.damage,
            damage_reduction: virtue.reduction,
            last_hit_ms: None,
            extra_life: profile.extra_life,
            projectile_size: projectile::BASE_SIZE * profile.projectile_scale,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos(self.position, self.size.width, self.size.height)
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }
}

/// One live enemy
#[derive(Debug, Clone)]
pub struct EnemyState {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Size,
    pub health: f32,
    /// Index into the arena's archetype table
    pub archetype: usize,
}

impl EnemyState {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos(self.position, self.size.width, self.size.height)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Enemies get a margin of their own size on every side before culling,
    /// so freshly spawned ones (placed just outside the boundary) survive.
    pub fn out_of_bounds(&self, config: &ArenaConfig) -> bool {
        !(self.position.x > -self.size.width
            && self.position.x < config.width + self.size.width
            && self.position.y > -self.size.height
            && self.position.y < config.height + self.size.height)
    }
}

/// One live projectile (square bounding box)
#[derive(Debug, Clone)]
pub struct ProjectileState {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
}

impl ProjectileState {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos(self.position, self.size, self.size)
    }

    /// Projectiles are culled at the arena boundary (tighter than enemies)
    pub fn out_of_bounds(&self, config: &ArenaConfig) -> bool {
        !(self.position.x > -self.size
            && self.position.x < config.width
            && self.position.y > -self.size
            && self.position.y < config.height)
    }
}

/// Complete mutable state of one simulation run
#[derive(Debug, Clone)]
pub struct SimState {
    /// Simulation clock in milliseconds, driven by the gameplay log
    pub clock_ms: u64,
    pub player: PlayerState,
    pub enemies: SmallVec<[EnemyState; 16]>,
    pub projectiles: SmallVec<[ProjectileState; 8]>,
    /// Cursor into the sorted wave list; waves before it have fired
    pub spawn_cursor: usize,
    /// Enemies whose health crossed to <= 0, counted once each
    pub defeated: u32,
    next_entity_id: EntityId,
}

impl SimState {
    pub fn new(config: &ArenaConfig, profile: &CharacterProfile, virtue: &VirtueStats) -> Self {
        Self {
            clock_ms: 0,
            player: PlayerState::spawn(config, profile, virtue),
            enemies: SmallVec::new(),
            projectiles: SmallVec::new(),
            spawn_cursor: 0,
            defeated: 0,
            next_entity_id: 0,
        }
    }

    /// Generate a new unique entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Add an enemy to the run
    pub fn add_enemy(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        size: Size,
        health: f32,
        archetype: usize,
    ) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(EnemyState {
            id,
            position,
            velocity,
            size,
            health,
            archetype,
        });
        id
    }

    /// Fire one projectile from the player's center in the given direction.
    /// Zero directions are the caller's responsibility to filter.
    pub fn fire_projectile(&mut self, direction: Vec2) -> EntityId {
        let size = self.player.projectile_size;
        let center = self.player.aabb().center();
        let position = Vec2::new(center.x - size / 2.0, center.y - size / 2.0);
        let velocity = direction.normalize() * projectile::SPEED;

        let id = self.next_entity_id();
        self.projectiles.push(ProjectileState {
            id,
            position,
            velocity,
            size,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::movement::BASE_PLAYER_SPEED;

    fn test_config() -> ArenaConfig {
        ArenaConfig::builtin().unwrap()
    }

    fn neutral_virtue() -> VirtueStats {
        VirtueStats {
            speed: 0.0,
            damage: 0.0,
            reduction: 0.0,
        }
    }

    #[test]
    fn test_player_spawns_centered() {
        let config = test_config();
        let profile = config.character("character3").unwrap();
        let player = PlayerState::spawn(&config, profile, &neutral_virtue());

        assert_eq!(player.position.x, 500.0 - 105.0 / 2.0);
        assert_eq!(player.position.y, 350.0 - 105.0 / 2.0);
        assert_eq!(player.health, 100.0);
        assert_eq!(player.speed, BASE_PLAYER_SPEED);
        assert!(player.last_hit_ms.is_none());
    }

    #[test]
    fn test_speed_derivation_stacks_multipliers() {
        let config = test_config();
        let profile = config.character("character2").unwrap();
        let virtue = VirtueStats {
            speed: 0.10,
            damage: 0.0,
            reduction: 0.0,
        };
        let player = PlayerState::spawn(&config, profile, &virtue);

        // 300 * 1.40 * 1.10
        assert!((player.speed - 462.0).abs() < 0.001);
    }

    #[test]
    fn test_damage_stats_come_from_virtue_only() {
        let config = test_config();
        let profile = config.character("character1").unwrap();
        let virtue = VirtueStats {
            speed: 0.0,
            damage: 0.25,
            reduction: 0.15,
        };
        let player = PlayerState::spawn(&config, profile, &virtue);

        assert_eq!(player.damage_bonus, 0.25);
        assert_eq!(player.damage_reduction, 0.15);
        assert!(player.extra_life);
    }

    #[test]
    fn test_projectile_size_uses_character_scale() {
        let config = test_config();
        let virtue = neutral_virtue();

        let maria = PlayerState::spawn(&config, config.character("character1").unwrap(), &virtue);
        assert_eq!(maria.projectile_size, 90.0);

        let joao = PlayerState::spawn(&config, config.character("character3").unwrap(), &virtue);
        assert_eq!(joao.projectile_size, 30.0);
    }

    #[test]
    fn test_entity_ids_unique() {
        let config = test_config();
        let profile = config.character("character3").unwrap();
        let mut state = SimState::new(&config, profile, &neutral_virtue());

        let id1 = state.fire_projectile(Vec2::new(1.0, 0.0));
        let id2 = state.add_enemy(Vec2::ZERO, Vec2::ZERO, Size::new(70.0, 70.0), 100.0, 0);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_fire_projectile_from_player_center() {
        let config = test_config();
        let profile = config.character("character3").unwrap();
        let mut state = SimState::new(&config, profile, &neutral_virtue());

        state.fire_projectile(Vec2::new(0.0, -1.0));
        let p = &state.projectiles[0];
        let player_center = state.player.aabb().center();

        assert!((p.position.x + p.size / 2.0 - player_center.x).abs() < 0.001);
        assert!((p.position.y + p.size / 2.0 - player_center.y).abs() < 0.001);
        assert!((p.velocity.y + 800.0).abs() < 0.001);
        assert_eq!(p.velocity.x, 0.0);
    }

    #[test]
    fn test_enemy_out_of_bounds_margin() {
        let config = test_config();
        let mut enemy = EnemyState {
            id: 0,
            position: Vec2::new(-60.0, 100.0),
            velocity: Vec2::ZERO,
            size: Size::new(70.0, 70.0),
            health: 100.0,
            archetype: 0,
        };
        // Within own-size margin: kept
        assert!(!enemy.out_of_bounds(&config));

        enemy.position.x = -70.0;
        assert!(enemy.out_of_bounds(&config));

        enemy.position = Vec2::new(500.0, config.height + 70.0);
        assert!(enemy.out_of_bounds(&config));
    }

    #[test]
    fn test_projectile_out_of_bounds() {
        let config = test_config();
        let mut p = ProjectileState {
            id: 0,
            position: Vec2::new(999.0, 100.0),
            velocity: Vec2::ZERO,
            size: 30.0,
        };
        assert!(!p.out_of_bounds(&config));

        p.position.x = 1000.0;
        assert!(p.out_of_bounds(&config));

        p.position = Vec2::new(100.0, -30.0);
        assert!(p.out_of_bounds(&config));
    }
}
