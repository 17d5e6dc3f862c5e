//! Attempt freshness gate.
//!
//! Every attempt is granted server side before play begins. A submission
//! arriving long after its grant was either replayed from a stale capture or
//! assembled offline, so it is rejected before simulation.

use thiserror::Error;

use crate::config::ValidatorConfig;

#[derive(Debug, Error, PartialEq)]
#[error("submission arrived {elapsed_ms} ms after grant, window is {window_ms} ms")]
pub struct ReplayWindowViolation {
    pub elapsed_ms: u64,
    pub window_ms: u64,
}

/// Rejects submissions that arrive too long after their attempt grant
#[derive(Debug, Clone, Copy)]
pub struct ReplayWindowGate {
    window_ms: u64,
}

impl ReplayWindowGate {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            window_ms: config.replay_window_secs * 1000,
        }
    }

    /// Check a submission stamped with its grant time against the current
    /// wall clock. A grant in the future counts as zero elapsed time.
    pub fn check(&self, granted_at_ms: u64, now_ms: u64) -> Result<(), ReplayWindowViolation> {
        let elapsed_ms = now_ms.saturating_sub(granted_at_ms);
        if elapsed_ms > self.window_ms {
            return Err(ReplayWindowViolation {
                elapsed_ms,
                window_ms: self.window_ms,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ReplayWindowGate {
        ReplayWindowGate::new(&ValidatorConfig::default())
    }

    #[test]
    fn test_fresh_submission_passes() {
        assert!(gate().check(1_000_000, 1_030_000).is_ok());
    }

    #[test]
    fn test_exactly_at_window_passes() {
        assert!(gate().check(1_000_000, 1_090_000).is_ok());
    }

    #[test]
    fn test_past_window_rejected() {
        let err = gate().check(1_000_000, 1_090_001).unwrap_err();
        assert_eq!(err.elapsed_ms, 90_001);
        assert_eq!(err.window_ms, 90_000);
    }

    #[test]
    fn test_future_grant_counts_as_fresh() {
        // Clock skew between grant writer and validator
        assert!(gate().check(2_000_000, 1_000_000).is_ok());
    }
}
