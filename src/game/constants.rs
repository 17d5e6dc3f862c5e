use crate::util::vec2::Vec2;

/// Match timing constants
pub mod timing {
    /// Hard cap on simulated match duration in milliseconds
    pub const TIME_LIMIT_MS: u64 = 60_000;
    /// Same cap in seconds, for score derivation
    pub const TIME_LIMIT_SECS: f32 = 60.0;
    /// Minimum wall-clock gap between player hits (invulnerability window)
    pub const HIT_INVULN_MS: u64 = 500;
}

/// Movement constants
pub mod movement {
    /// Base player speed in units per second, before character and virtue
    /// multipliers
    pub const BASE_PLAYER_SPEED: f32 = 300.0;
    /// Scale from a movement-pattern magnitude to units per second
    pub const ENEMY_SPEED_SCALE: f32 = 60.0;
    /// Pattern magnitude floor for degenerate (zero) patterns
    pub const ENEMY_FALLBACK_PATTERN_SPEED: f32 = 2.0;
}

/// Combat constants
pub mod combat {
    /// Damage dealt to the player per enemy contact, before reduction
    pub const BASE_HIT_DAMAGE: f32 = 35.0;
    /// Damage dealt to the enemy per contact, before bonus
    pub const BASE_CONTACT_DAMAGE: f32 = 34.0;
    /// Flat damage dealt by one projectile hit
    pub const PROJECTILE_DAMAGE: f32 = 100.0;
}

/// Projectile constants
pub mod projectile {
    /// Projectile travel speed in units per second
    pub const SPEED: f32 = 800.0;
    /// Side length of the square projectile bounding box, before the
    /// character's projectile scale
    pub const BASE_SIZE: f32 = 30.0;
}

/// Travel speed for an enemy archetype given its movement-pattern vector.
/// Degenerate patterns fall back to a fixed magnitude so every archetype
/// still reaches the arena.
#[inline]
pub fn enemy_speed(pattern: Vec2) -> f32 {
    let magnitude = pattern.length();
    let magnitude = if magnitude > 0.0 {
        magnitude
    } else {
        movement::ENEMY_FALLBACK_PATTERN_SPEED
    };
    magnitude * movement::ENEMY_SPEED_SCALE
}
