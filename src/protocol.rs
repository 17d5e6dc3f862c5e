//! Wire types for score submissions and verdicts.
//!
//! Field names follow the client's JSON contract (camelCase). These shapes
//! are what the surrounding request handlers hand to the validator; nothing
//! here is persisted directly.

use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

/// Selected character, referenced by arena-config identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub id: String,
}

/// Stat-modifier bundle applied to the player for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtueInfo {
    pub stats: VirtueStats,
}

/// Fractional stat multipliers, applied once at simulation start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VirtueStats {
    /// Added to 1.0 and multiplied into movement speed
    pub speed: f32,
    /// Added to the outgoing damage multiplier
    pub damage: f32,
    /// Fraction of incoming damage removed
    pub reduction: f32,
}

/// One recorded client tick. `time` is cumulative milliseconds since match
/// start; the movement and fire vectors are raw (unnormalized) input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameplayLogEntry {
    pub time: u64,
    #[serde(rename = "move")]
    pub movement: Vec2,
    pub fire: Vec2,
}

/// A complete score submission as received from a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub user_name: String,
    pub claimed_score: i64,
    pub character_info: CharacterInfo,
    pub virtue_info: VirtueInfo,
    pub gameplay_log: Vec<GameplayLogEntry>,
    /// When the user-record collaborator last granted this user an attempt,
    /// epoch milliseconds
    pub last_attempt_granted_at: u64,
}

/// Validation outcome returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub accepted: bool,
    pub claimed_score: i64,
    /// Score derived by the server's own simulation; absent when the
    /// submission was rejected before simulating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_wire_shape() {
        let json = r#"{
            "userName": "ana",
            "claimedScore": 120,
            "characterInfo": { "id": "character2" },
            "virtueInfo": { "stats": { "speed": 0.1, "damage": 0.05, "reduction": 0.0 } },
            "gameplayLog": [
                { "time": 50, "move": { "x": 1.0, "y": 0.0 }, "fire": { "x": 0.0, "y": 0.0 } }
            ],
            "lastAttemptGrantedAt": 1700000000000
        }"#;

        let sub: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.user_name, "ana");
        assert_eq!(sub.claimed_score, 120);
        assert_eq!(sub.character_info.id, "character2");
        assert_eq!(sub.gameplay_log.len(), 1);
        assert_eq!(sub.gameplay_log[0].time, 50);
        assert_eq!(sub.gameplay_log[0].movement.x, 1.0);
        assert_eq!(sub.last_attempt_granted_at, 1_700_000_000_000);
    }

    #[test]
    fn test_verdict_omits_empty_fields() {
        let verdict = Verdict {
            accepted: true,
            claimed_score: 40,
            canonical_score: Some(40),
            reason: None,
        };
        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"canonicalScore\":40"));
        assert!(!json.contains("reason"));
    }

    #[test]
    fn test_non_numeric_score_rejected_by_serde() {
        let json = r#"{
            "userName": "ana",
            "claimedScore": "lots",
            "characterInfo": { "id": "character1" },
            "virtueInfo": { "stats": { "speed": 0, "damage": 0, "reduction": 0 } },
            "gameplayLog": [],
            "lastAttemptGrantedAt": 0
        }"#;
        assert!(serde_json::from_str::<Submission>(json).is_err());
    }
}
