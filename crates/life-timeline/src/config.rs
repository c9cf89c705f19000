//! Timeline configuration: the covered span and the policy for undated events.

use serde::{Deserialize, Serialize};

use crate::span::TimelineSpan;

/// What to do with an event that has no `event_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndatedPolicy {
    /// Keep it in the timeline's top-level undated bucket.
    #[default]
    Bucket,
    /// Fail with `TimelineError::UndatedEvent`.
    Reject,
}

/// Settings fixed when a timeline is constructed.
///
/// Deserializes from TOML/JSON shaped like:
///
/// ```toml
/// undated = "bucket"
///
/// [span]
/// start_year = 1990
/// end_year = 2026
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub span: TimelineSpan,
    #[serde(default)]
    pub undated: UndatedPolicy,
}

impl TimelineConfig {
    pub fn new(span: TimelineSpan) -> Self {
        Self {
            span,
            undated: UndatedPolicy::default(),
        }
    }

    pub fn with_undated(self, undated: UndatedPolicy) -> Self {
        Self { undated, ..self }
    }
}

impl From<TimelineSpan> for TimelineConfig {
    fn from(span: TimelineSpan) -> Self {
        Self::new(span)
    }
}
