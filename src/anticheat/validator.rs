//! Structural submission checks and score comparison.
//!
//! Structural validation runs before any simulation work: a submission that
//! fails here is rejected without spending a single tick on it. Score
//! judgment runs after the replay and compares the client's claim against
//! the server's own tally.

use thiserror::Error;

use crate::config::{ArenaConfig, ValidatorConfig};
use crate::protocol::Submission;

/// Structural defects that make a submission unreplayable
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("gameplay log is empty")]
    EmptyLog,

    #[error("gameplay log has {len} entries, limit is {max}")]
    LogTooLong { len: usize, max: usize },

    #[error("unknown character id: {0}")]
    UnknownCharacter(String),

    #[error("non-finite value in movement, fire, or virtue stats")]
    NonFiniteInput,

    #[error("log timestamp regresses at entry {index}")]
    NonMonotonicLog { index: usize },
}

/// Check everything about a submission that can be checked without
/// simulating it.
pub fn check_structure(
    submission: &Submission,
    arena: &ArenaConfig,
    limits: &ValidatorConfig,
) -> Result<(), ValidationError> {
    let log = &submission.gameplay_log;

    if log.is_empty() {
        return Err(ValidationError::EmptyLog);
    }
    if log.len() > limits.max_log_entries {
        return Err(ValidationError::LogTooLong {
            len: log.len(),
            max: limits.max_log_entries,
        });
    }

    if arena.character(&submission.character_info.id).is_none() {
        return Err(ValidationError::UnknownCharacter(
            submission.character_info.id.clone(),
        ));
    }

    let stats = &submission.virtue_info.stats;
    if !stats.speed.is_finite() || !stats.damage.is_finite() || !stats.reduction.is_finite() {
        return Err(ValidationError::NonFiniteInput);
    }

    let mut last_time = 0u64;
    for (index, entry) in log.iter().enumerate() {
        if !entry.movement.is_finite() || !entry.fire.is_finite() {
            return Err(ValidationError::NonFiniteInput);
        }
        if entry.time < last_time {
            return Err(ValidationError::NonMonotonicLog { index });
        }
        last_time = entry.time;
    }

    Ok(())
}

/// Outcome of comparing a claimed score against the replayed one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreVerdict {
    pub accepted: bool,
    pub claimed_score: i64,
    pub canonical_score: i64,
    /// Absolute gap between claim and replay
    pub difference: i64,
}

/// Compares claimed scores against replayed ones with a proportional
/// tolerance and an absolute floor for low-score runs.
#[derive(Debug, Clone, Copy)]
pub struct ScoreValidator {
    tolerance: f32,
    floor: i64,
}

impl ScoreValidator {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            tolerance: config.score_tolerance,
            floor: config.score_floor,
        }
    }

    /// Accept when the gap is within the proportional tolerance of the
    /// canonical score, or within the absolute floor, whichever is larger.
    /// The floor keeps short low-scoring runs from rejecting on rounding
    /// noise, where two percent of the score is a fraction of a point.
    pub fn judge(&self, claimed_score: i64, canonical_score: i64) -> ScoreVerdict {
        let difference = (claimed_score - canonical_score).abs();
        let allowed = ((canonical_score as f32 * self.tolerance).abs() as i64).max(self.floor);
        ScoreVerdict {
            accepted: difference <= allowed,
            claimed_score,
            canonical_score,
            difference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CharacterInfo, GameplayLogEntry, VirtueInfo, VirtueStats};
    use crate::util::vec2::Vec2;

    fn base_submission() -> Submission {
        Submission {
            user_name: "tester".to_string(),
            claimed_score: 0,
            character_info: CharacterInfo {
                id: "character1".to_string(),
            },
            virtue_info: VirtueInfo {
                stats: VirtueStats {
                    speed: 0.1,
                    damage: 0.1,
                    reduction: 0.1,
                },
            },
            gameplay_log: vec![GameplayLogEntry {
                time: 50,
                movement: Vec2::ZERO,
                fire: Vec2::ZERO,
            }],
            last_attempt_granted_at: 0,
        }
    }

    fn configs() -> (ArenaConfig, ValidatorConfig) {
        (ArenaConfig::builtin().unwrap(), ValidatorConfig::default())
    }

    #[test]
    fn test_valid_submission_passes() {
        let (arena, limits) = configs();
        assert!(check_structure(&base_submission(), &arena, &limits).is_ok());
    }

    #[test]
    fn test_empty_log_rejected() {
        let (arena, limits) = configs();
        let mut sub = base_submission();
        sub.gameplay_log.clear();
        assert_eq!(
            check_structure(&sub, &arena, &limits),
            Err(ValidationError::EmptyLog)
        );
    }

    #[test]
    fn test_oversized_log_rejected() {
        let (arena, limits) = configs();
        let mut sub = base_submission();
        sub.gameplay_log = (0..limits.max_log_entries as u64 + 1)
            .map(|i| GameplayLogEntry {
                time: i * 50,
                movement: Vec2::ZERO,
                fire: Vec2::ZERO,
            })
            .collect();
        assert!(matches!(
            check_structure(&sub, &arena, &limits),
            Err(ValidationError::LogTooLong { .. })
        ));
    }

    #[test]
    fn test_unknown_character_rejected() {
        let (arena, limits) = configs();
        let mut sub = base_submission();
        sub.character_info.id = "character9".to_string();
        assert_eq!(
            check_structure(&sub, &arena, &limits),
            Err(ValidationError::UnknownCharacter("character9".to_string()))
        );
    }

    #[test]
    fn test_non_finite_virtue_rejected() {
        let (arena, limits) = configs();
        let mut sub = base_submission();
        sub.virtue_info.stats.damage = f32::NAN;
        assert_eq!(
            check_structure(&sub, &arena, &limits),
            Err(ValidationError::NonFiniteInput)
        );
    }

    #[test]
    fn test_non_finite_log_entry_rejected() {
        let (arena, limits) = configs();
        let mut sub = base_submission();
        sub.gameplay_log[0].fire = Vec2::new(f32::INFINITY, 0.0);
        assert_eq!(
            check_structure(&sub, &arena, &limits),
            Err(ValidationError::NonFiniteInput)
        );
    }

    #[test]
    fn test_regressing_timestamp_rejected() {
        let (arena, limits) = configs();
        let mut sub = base_submission();
        sub.gameplay_log = vec![
            GameplayLogEntry {
                time: 100,
                movement: Vec2::ZERO,
                fire: Vec2::ZERO,
            },
            GameplayLogEntry {
                time: 99,
                movement: Vec2::ZERO,
                fire: Vec2::ZERO,
            },
        ];
        assert_eq!(
            check_structure(&sub, &arena, &limits),
            Err(ValidationError::NonMonotonicLog { index: 1 })
        );
    }

    #[test]
    fn test_equal_timestamps_allowed() {
        let (arena, limits) = configs();
        let mut sub = base_submission();
        sub.gameplay_log = vec![
            GameplayLogEntry {
                time: 100,
                movement: Vec2::ZERO,
                fire: Vec2::ZERO,
            },
            GameplayLogEntry {
                time: 100,
                movement: Vec2::ZERO,
                fire: Vec2::ZERO,
            },
        ];
        assert!(check_structure(&sub, &arena, &limits).is_ok());
    }

    #[test]
    fn test_judge_proportional_band() {
        let validator = ScoreValidator::new(&ValidatorConfig::default());
        // Canonical 1000: two percent allows 20 either way
        assert!(validator.judge(1000, 1000).accepted);
        assert!(validator.judge(1020, 1000).accepted);
        assert!(validator.judge(980, 1000).accepted);
        assert!(!validator.judge(1021, 1000).accepted);
        assert!(!validator.judge(979, 1000).accepted);
    }

    #[test]
    fn test_judge_floor_dominates_low_scores() {
        let validator = ScoreValidator::new(&ValidatorConfig::default());
        // Canonical 4: two percent is under a point, the floor of 5 rules
        assert!(validator.judge(0, 4).accepted);
        assert!(validator.judge(9, 4).accepted);
        assert!(!validator.judge(10, 4).accepted);
        // Zero canonical still admits claims up to the floor
        assert!(validator.judge(5, 0).accepted);
        assert!(!validator.judge(6, 0).accepted);
    }

    #[test]
    fn test_judge_exact_band_edge() {
        let validator = ScoreValidator::new(&ValidatorConfig::default());
        // Canonical 100: allowed gap is max(2, 5) = 5
        assert!(validator.judge(105, 100).accepted);
        assert!(validator.judge(95, 100).accepted);
        assert!(!validator.judge(106, 100).accepted);
    }

    #[test]
    fn test_judge_reports_difference() {
        let validator = ScoreValidator::new(&ValidatorConfig::default());
        let verdict = validator.judge(120, 100);
        assert_eq!(verdict.difference, 20);
        assert_eq!(verdict.claimed_score, 120);
        assert_eq!(verdict.canonical_score, 100);
    }
}
