//! Server-side score validation.
//!
//! Every submitted run is judged by replaying its gameplay log through the
//! same deterministic simulation the client ran, then comparing the client's
//! claimed score against the replayed one. The pipeline rejects as early as
//! it can: structural defects before the freshness gate, the freshness gate
//! before any simulation work.

pub mod replay_window;
pub mod validator;

use thiserror::Error;
use uuid::Uuid;

use crate::config::{ArenaConfig, ValidatorConfig};
use crate::game::driver;
use crate::protocol::{Submission, Verdict};
use crate::util::clock::{SystemClock, WallClock};

use replay_window::{ReplayWindowGate, ReplayWindowViolation};
use validator::{ScoreValidator, ScoreVerdict, ValidationError};

/// Every way a submission can fail validation
#[derive(Debug, Error, PartialEq)]
pub enum RejectReason {
    #[error("malformed submission: {0}")]
    Structure(#[from] ValidationError),

    #[error("stale attempt: {0}")]
    StaleAttempt(#[from] ReplayWindowViolation),

    #[error("score mismatch: claimed {claimed}, replay produced {canonical}")]
    ScoreMismatch { claimed: i64, canonical: i64 },
}

/// Full validation pipeline for one submission
pub struct SubmissionValidator<C: WallClock> {
    arena: ArenaConfig,
    limits: ValidatorConfig,
    score: ScoreValidator,
    window: ReplayWindowGate,
    clock: C,
}

impl SubmissionValidator<SystemClock> {
    pub fn new(arena: ArenaConfig, limits: ValidatorConfig) -> Self {
        Self::with_clock(arena, limits, SystemClock)
    }
}

impl<C: WallClock> SubmissionValidator<C> {
    pub fn with_clock(arena: ArenaConfig, limits: ValidatorConfig, clock: C) -> Self {
        let score = ScoreValidator::new(&limits);
        let window = ReplayWindowGate::new(&limits);
        Self {
            arena,
            limits,
            score,
            window,
            clock,
        }
    }

    /// Judge one submission and produce the wire verdict.
    pub fn validate(&self, submission: &Submission) -> Verdict {
        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "validate",
            id = %submission_id,
            user = %submission.user_name,
        );
        let _guard = span.enter();

        match self.judge(submission) {
            Ok(verdict) => Verdict {
                accepted: true,
                claimed_score: verdict.claimed_score,
                canonical_score: Some(verdict.canonical_score),
                reason: None,
            },
            Err(reason) => {
                tracing::warn!(%reason, "submission rejected");
                let canonical_score = match &reason {
                    RejectReason::ScoreMismatch { canonical, .. } => Some(*canonical),
                    _ => None,
                };
                Verdict {
                    accepted: false,
                    claimed_score: submission.claimed_score,
                    canonical_score,
                    reason: Some(reason.to_string()),
                }
            }
        }
    }

    fn judge(&self, submission: &Submission) -> Result<ScoreVerdict, RejectReason> {
        validator::check_structure(submission, &self.arena, &self.limits)?;
        self.window
            .check(submission.last_attempt_granted_at, self.clock.now_ms())?;

        let profile = self
            .arena
            .character(&submission.character_info.id)
            .ok_or_else(|| {
                ValidationError::UnknownCharacter(submission.character_info.id.clone())
            })?;

        let result = driver::run(
            &self.arena,
            profile,
            &submission.virtue_info.stats,
            &submission.gameplay_log,
            &self.clock,
        );
        let canonical = result.canonical_score();

        tracing::info!(
            claimed = submission.claimed_score,
            simulated = canonical,
            defeated = result.defeated,
            duration_secs = result.elapsed_secs,
            reason = ?result.reason,
            "replay finished"
        );

        let verdict = self.score.judge(submission.claimed_score, canonical);
        if !verdict.accepted {
            return Err(RejectReason::ScoreMismatch {
                claimed: verdict.claimed_score,
                canonical: verdict.canonical_score,
            });
        }
        Ok(verdict)
    }
}
