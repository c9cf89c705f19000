//! Error types for timeline construction and reorganization.

use thiserror::Error;

/// Failures reported by timeline operations.
///
/// Every variant is recoverable: when an operation returns an error, the
/// timeline it was called on is unchanged and no new timeline exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// The row carries neither a text nor an image payload, both, or an empty text.
    #[error("Malformed event {id}: {reason}")]
    MalformedEvent { id: String, reason: String },

    /// The event's date lies outside the configured span.
    #[error("Event {id} dated {year}-{month:02} is outside the timeline span {start}..={end}")]
    OutOfRangeEvent {
        id: String,
        year: i32,
        month: u32,
        start: i32,
        end: i32,
    },

    /// The source month does not hold the event being moved.
    #[error("Event {event_id} is not in source month {month_id}")]
    EventNotInSourceMonth { event_id: String, month_id: String },

    /// The target month is not part of the timeline skeleton.
    #[error("Target month {0} is not in the timeline")]
    TargetMonthNotFound(String),

    #[error("Invalid timeline span: {0}")]
    InvalidSpan(String),

    /// The event has no date and the undated policy rejects it.
    #[error("Event {0} has no date")]
    UndatedEvent(String),

    #[error("Event {0} is already in the timeline")]
    DuplicateEvent(String),

    #[error("Event {0} is not in the timeline")]
    EventNotFound(String),

    #[error("Invalid month id: {0}")]
    InvalidMonthId(String),

    /// A deserialized timeline does not match the skeleton of its own span.
    #[error("Invalid timeline structure: {0}")]
    InvalidStructure(String),
}

/// Convenience alias used throughout life-timeline.
pub type Result<T> = std::result::Result<T, TimelineError>;
