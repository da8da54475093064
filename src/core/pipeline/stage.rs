use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

/// Lifecycle of a single synthesis request.
///
/// `Idle → Classifying → Mapping → BaseSynthesizing → Transforming → Encoded → Done`,
/// with `Failed` reachable from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Classifying,
    Mapping,
    BaseSynthesizing,
    Transforming,
    Encoded,
    Done,
    Failed,
}

impl PipelineStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Classifying => "classifying",
            PipelineStage::Mapping => "mapping",
            PipelineStage::BaseSynthesizing => "base_synthesizing",
            PipelineStage::Transforming => "transforming",
            PipelineStage::Encoded => "encoded",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }

    /// The stage that normally follows this one.
    pub const fn next(&self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Idle => Some(PipelineStage::Classifying),
            PipelineStage::Classifying => Some(PipelineStage::Mapping),
            PipelineStage::Mapping => Some(PipelineStage::BaseSynthesizing),
            PipelineStage::BaseSynthesizing => Some(PipelineStage::Transforming),
            PipelineStage::Transforming => Some(PipelineStage::Encoded),
            PipelineStage::Encoded => Some(PipelineStage::Done),
            PipelineStage::Done | PipelineStage::Failed => None,
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks and logs stage transitions for one request.
#[derive(Debug)]
pub(crate) struct StageTracker {
    request_id: Uuid,
    stage: PipelineStage,
    entered: Instant,
}

impl StageTracker {
    pub(crate) fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            stage: PipelineStage::Idle,
            entered: Instant::now(),
        }
    }

    pub(crate) fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Moves to the next stage.
    pub(crate) fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            debug!(
                request_id = %self.request_id,
                from = %self.stage,
                to = %next,
                stage_ms = self.entered.elapsed().as_millis() as u64,
                "Stage transition"
            );
            self.stage = next;
            self.entered = Instant::now();
        }
    }

    /// Records a failure in the current stage.
    pub(crate) fn fail(&mut self, reason: &dyn std::error::Error) {
        error!(
            request_id = %self.request_id,
            stage = %self.stage,
            error = %reason,
            "Synthesis request failed"
        );
        self.stage = PipelineStage::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_order() {
        let mut stage = PipelineStage::Idle;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            visited.push(stage);
        }
        assert_eq!(
            visited,
            vec![
                PipelineStage::Idle,
                PipelineStage::Classifying,
                PipelineStage::Mapping,
                PipelineStage::BaseSynthesizing,
                PipelineStage::Transforming,
                PipelineStage::Encoded,
                PipelineStage::Done,
            ]
        );
        assert!(stage.is_terminal());
    }

    #[test]
    fn test_tracker_fail_is_terminal() {
        let mut tracker = StageTracker::new(Uuid::new_v4());
        tracker.advance();
        tracker.advance();
        assert_eq!(tracker.stage(), PipelineStage::Mapping);

        let err = std::io::Error::other("boom");
        tracker.fail(&err);
        assert_eq!(tracker.stage(), PipelineStage::Failed);
        tracker.advance();
        assert_eq!(tracker.stage(), PipelineStage::Failed);
    }

    #[test]
    fn test_stage_serialization() {
        assert_eq!(
            serde_json::to_string(&PipelineStage::BaseSynthesizing).unwrap(),
            "\"base_synthesizing\""
        );
    }
}
