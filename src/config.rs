//! Static arena configuration and validator settings.
//!
//! The arena tables (characters, enemy archetypes, movement patterns, spawn
//! schedule) are fixed game data: built once at startup, then treated as
//! read-only for the life of the process. Every simulation run borrows the
//! same `ArenaConfig`; nothing here is mutated per submission.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

/// Bounding size of an entity in arena units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Playable character profile. All per-character behavior is data: a new
/// character is a new entry here, not a new branch in the simulation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Display name
    pub name: String,
    /// Starting and maximum health
    pub max_health: f32,
    /// Bounding size
    pub size: Size,
    /// Multiplier applied to the base movement speed (1.0 for most)
    pub speed_multiplier: f32,
    /// Multiplier applied to the base projectile size (1.0 for most)
    pub projectile_scale: f32,
    /// One-shot trait: the first enemy contact is a free kill
    pub extra_life: bool,
}

/// Enemy archetype profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub max_health: f32,
    pub size: Size,
}

/// Arena edge an enemy wave enters from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    fn parse(s: &str) -> Option<Edge> {
        match s {
            "top" => Some(Edge::Top),
            "right" => Some(Edge::Right),
            "bottom" => Some(Edge::Bottom),
            "left" => Some(Edge::Left),
            _ => None,
        }
    }
}

/// One scheduled enemy spawn. The schedule is sorted ascending by trigger
/// time and consumed in that order exactly once per simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnWave {
    pub edge: Edge,
    /// Position along the edge, percent of the edge length (0-100)
    pub percent: f32,
    /// Index into the enemy archetype table
    pub archetype: usize,
    /// Trigger time in milliseconds from match start
    pub trigger_ms: u64,
}

/// Errors raised while building the arena configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("spawn schedule line {0}: expected 4 columns")]
    MalformedRow(usize),
    #[error("spawn schedule line {0}: unknown edge '{1}'")]
    UnknownEdge(usize, String),
    #[error("spawn schedule line {0}: invalid number in column '{1}'")]
    InvalidNumber(usize, &'static str),
    #[error("spawn schedule line {0}: percent {1} outside 0-100")]
    PercentOutOfRange(usize, f32),
    #[error("spawn schedule line {0}: archetype index {1} out of range (have {2})")]
    ArchetypeOutOfRange(usize, usize, usize),
    #[error("spawn schedule line {0}: trigger times must be non-decreasing")]
    UnsortedSchedule(usize),
    #[error("movement pattern table must cover all {0} archetypes, has {1}")]
    MissingMovementPattern(usize, usize),
}

/// Built-in spawn schedule: twenty waves over the first twenty seconds.
/// Columns: entry edge, percent along that edge, archetype index, trigger
/// time in seconds from match start.
const SPAWN_SCHEDULE_CSV: &str = "\
edge,percent,archetype,seconds
top,50,0,1
left,20,1,2.5
right,80,2,3.5
top,10,3,5
top,90,4,5.5
bottom,50,5,7
left,50,6,8.5
right,50,7,9.5
bottom,25,8,11
bottom,75,9,11.5
top,50,0,13
left,30,1,14
right,70,2,14
top,20,3,15.5
top,80,4,15.5
bottom,50,5,17
left,50,6,18
right,50,7,18
bottom,10,8,19.5
bottom,90,9,19.5";

/// Immutable description of the arena: dimensions, character and enemy
/// tables, per-archetype movement patterns, and the spawn schedule.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub characters: HashMap<String, CharacterProfile>,
    pub enemies: Vec<EnemyArchetype>,
    /// Per-archetype movement pattern vector; its magnitude (with a floor)
    /// times the speed scale gives the archetype's travel speed.
    pub movement_patterns: Vec<Vec2>,
    pub waves: Vec<SpawnWave>,
}

impl ArenaConfig {
    /// Build the configuration from the built-in tables
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut characters = HashMap::new();
        characters.insert(
            "character1".to_string(),
            CharacterProfile {
                name: "Maria".to_string(),
                max_health: 120.0,
                size: Size::new(98.0, 98.0),
                speed_multiplier: 1.0,
                projectile_scale: 3.0,
                extra_life: true,
            },
        );
        characters.insert(
            "character2".to_string(),
            CharacterProfile {
                name: "Motoboy".to_string(),
                max_health: 100.0,
                size: Size::new(90.0, 90.0),
                speed_multiplier: 1.40,
                projectile_scale: 1.0,
                extra_life: false,
            },
        );
        characters.insert(
            "character3".to_string(),
            CharacterProfile {
                name: "Joao".to_string(),
                max_health: 100.0,
                size: Size::new(105.0, 105.0),
                speed_multiplier: 1.0,
                projectile_scale: 1.0,
                extra_life: false,
            },
        );

        let enemies = vec![
            EnemyArchetype { max_health: 100.0, size: Size::new(70.0, 70.0) },
            EnemyArchetype { max_health: 100.0, size: Size::new(80.0, 80.0) },
            EnemyArchetype { max_health: 110.0, size: Size::new(75.0, 75.0) },
            EnemyArchetype { max_health: 80.0, size: Size::new(60.0, 60.0) },
            EnemyArchetype { max_health: 90.0, size: Size::new(65.0, 65.0) },
            EnemyArchetype { max_health: 150.0, size: Size::new(90.0, 90.0) },
            EnemyArchetype { max_health: 100.0, size: Size::new(70.0, 70.0) },
            EnemyArchetype { max_health: 110.0, size: Size::new(75.0, 75.0) },
            EnemyArchetype { max_health: 120.0, size: Size::new(80.0, 80.0) },
            EnemyArchetype { max_health: 120.0, size: Size::new(80.0, 80.0) },
        ];

        let movement_patterns = vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(0.0, 1.2),
            Vec2::new(1.2, 0.0),
            Vec2::new(-1.2, 0.0),
            Vec2::new(0.0, -1.2),
            Vec2::new(0.8, 1.5),
            Vec2::new(-0.8, 1.5),
            Vec2::new(1.5, 0.8),
        ];
        if movement_patterns.len() < enemies.len() {
            return Err(ConfigError::MissingMovementPattern(
                enemies.len(),
                movement_patterns.len(),
            ));
        }

        let waves = parse_spawn_schedule(SPAWN_SCHEDULE_CSV, enemies.len())?;

        Ok(Self {
            width: 1000.0,
            height: 700.0,
            characters,
            enemies,
            movement_patterns,
            waves,
        })
    }

    /// Arena center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Look up a character profile by wire identifier
    pub fn character(&self, id: &str) -> Option<&CharacterProfile> {
        self.characters.get(id)
    }
}

/// Parse a spawn schedule from CSV (header row ignored). Rejects malformed
/// rows, unknown edges, out-of-range values, and unsorted trigger times.
pub fn parse_spawn_schedule(
    csv: &str,
    archetype_count: usize,
) -> Result<Vec<SpawnWave>, ConfigError> {
    let mut waves = Vec::new();
    let mut prev_trigger = 0u64;

    for (idx, line) in csv.trim().lines().skip(1).enumerate() {
        let line_no = idx + 2; // 1-based, after the header
        let cols: Vec<&str> = line.split(',').map(str::trim).collect();
        if cols.len() != 4 {
            return Err(ConfigError::MalformedRow(line_no));
        }

        let edge = Edge::parse(cols[0])
            .ok_or_else(|| ConfigError::UnknownEdge(line_no, cols[0].to_string()))?;
        let percent: f32 = cols[1]
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(line_no, "percent"))?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(ConfigError::PercentOutOfRange(line_no, percent));
        }
        let archetype: usize = cols[2]
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(line_no, "archetype"))?;
        if archetype >= archetype_count {
            return Err(ConfigError::ArchetypeOutOfRange(
                line_no,
                archetype,
                archetype_count,
            ));
        }
        let seconds: f32 = cols[3]
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(line_no, "seconds"))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ConfigError::InvalidNumber(line_no, "seconds"));
        }
        let trigger_ms = (seconds * 1000.0) as u64;

        if trigger_ms < prev_trigger {
            return Err(ConfigError::UnsortedSchedule(line_no));
        }
        prev_trigger = trigger_ms;

        waves.push(SpawnWave {
            edge,
            percent,
            archetype,
            trigger_ms,
        });
    }

    Ok(waves)
}

/// Tunable validator settings
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Fractional score tolerance (0.02 = 2%)
    pub score_tolerance: f32,
    /// Flat tolerance floor in points, for low scores
    pub score_floor: i64,
    /// Maximum wall-clock seconds between attempt grant and submission
    pub replay_window_secs: u64,
    /// Maximum accepted gameplay-log length
    pub max_log_entries: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            score_tolerance: 0.02,
            score_floor: 5,
            replay_window_secs: 90,
            max_log_entries: 2400, // 60 s of 50 ms client ticks, with headroom
        }
    }
}

impl ValidatorConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(tol) = std::env::var("SCORE_TOLERANCE") {
            if let Ok(parsed) = tol.parse::<f32>() {
                if parsed >= 0.0 && parsed < 1.0 {
                    config.score_tolerance = parsed;
                } else {
                    tracing::warn!("SCORE_TOLERANCE must be in [0, 1), using default");
                }
            } else {
                tracing::warn!("Invalid SCORE_TOLERANCE '{}', using default", tol);
            }
        }

        if let Ok(window) = std::env::var("REPLAY_WINDOW_SECS") {
            if let Ok(parsed) = window.parse::<u64>() {
                if parsed > 0 {
                    config.replay_window_secs = parsed;
                } else {
                    tracing::warn!("REPLAY_WINDOW_SECS must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid REPLAY_WINDOW_SECS '{}', using default", window);
            }
        }

        if let Ok(max_len) = std::env::var("MAX_LOG_ENTRIES") {
            if let Ok(parsed) = max_len.parse::<usize>() {
                if parsed > 0 {
                    config.max_log_entries = parsed;
                } else {
                    tracing::warn!("MAX_LOG_ENTRIES must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid MAX_LOG_ENTRIES '{}', using default", max_len);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.score_tolerance) {
            return Err("score_tolerance must be in [0, 1)".to_string());
        }
        if self.score_floor < 0 {
            return Err("score_floor cannot be negative".to_string());
        }
        if self.replay_window_secs == 0 {
            return Err("replay_window_secs must be at least 1".to_string());
        }
        if self.max_log_entries == 0 {
            return Err("max_log_entries must be at least 1".to_string());
        }
        Ok(())
    }
}
