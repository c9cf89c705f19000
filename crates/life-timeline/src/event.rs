//! Life events and their text/image variants.
//!
//! Rows arrive from the persistence layer as [`EventRow`] with an optional
//! `event_text` and an optional `event_image`. Exactly one of them must be set;
//! [`LifeEvent`] is the validated form, where the variant is a tagged union and
//! the malformed shapes cannot be represented.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Opaque identifier of a life event, as assigned by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

/// Opaque reference to the user owning an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(EventId);
string_id!(UserId);

/// A raw event record as stored remotely.
///
/// The payload fields are both optional here; [`LifeEvent::try_from`] decides
/// which variant the row describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: EventId,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_image: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EventRow {
    /// True iff the row carries a text payload field.
    pub fn has_text(&self) -> bool {
        self.event_text.is_some()
    }

    /// True iff the row carries an image reference field.
    pub fn has_image(&self) -> bool {
        self.event_image.is_some()
    }
}

/// The variant-specific part of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Text { event_text: String },
    Image { event_image: String },
}

/// A validated, immutable life event.
///
/// Serializes in the [`EventRow`] shape so the persistence layer sees the
/// same fields it handed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRow", into = "EventRow")]
pub struct LifeEvent {
    pub id: EventId,
    pub user_id: UserId,
    pub event_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub payload: EventPayload,
}

impl LifeEvent {
    /// Build a text event. Fails with `MalformedEvent` when `text` is empty or only whitespace.
    pub fn text(
        id: impl Into<EventId>,
        user_id: impl Into<UserId>,
        text: impl Into<String>,
    ) -> Result<Self> {
        Self::try_from(EventRow {
            id: id.into(),
            user_id: user_id.into(),
            event_text: Some(text.into()),
            ..EventRow::default()
        })
    }

    /// Build an image event. Fails with `MalformedEvent` when `image` is blank.
    pub fn image(
        id: impl Into<EventId>,
        user_id: impl Into<UserId>,
        image: impl Into<String>,
    ) -> Result<Self> {
        Self::try_from(EventRow {
            id: id.into(),
            user_id: user_id.into(),
            event_image: Some(image.into()),
            ..EventRow::default()
        })
    }

    /// Return a copy of this event carrying `date`.
    pub fn with_date(self, date: NaiveDate) -> Self {
        Self {
            event_date: Some(date),
            ..self
        }
    }

    /// Return a copy of this event carrying `created_at`.
    pub fn with_created_at(self, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at: Some(created_at),
            ..self
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Text { event_text } => Some(event_text),
            EventPayload::Image { .. } => None,
        }
    }

    pub fn as_image(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Image { event_image } => Some(event_image),
            EventPayload::Text { .. } => None,
        }
    }

    /// The `(year, month)` the event is dated in, if any.
    pub fn year_month(&self) -> Option<(i32, u32)> {
        self.event_date.map(|d| (d.year(), d.month()))
    }
}

/// True iff the event is the text variant.
pub fn is_text_event(event: &LifeEvent) -> bool {
    matches!(event.payload, EventPayload::Text { .. })
}

/// True iff the event is the image variant.
pub fn is_image_event(event: &LifeEvent) -> bool {
    matches!(event.payload, EventPayload::Image { .. })
}

impl TryFrom<EventRow> for LifeEvent {
    type Error = TimelineError;

    fn try_from(row: EventRow) -> Result<Self> {
        let malformed = |reason: &str| TimelineError::MalformedEvent {
            id: row.id.to_string(),
            reason: reason.to_string(),
        };

        let payload = match (&row.event_text, &row.event_image) {
            (Some(_), Some(_)) => {
                return Err(malformed("both event_text and event_image are set"))
            }
            (None, None) => return Err(malformed("neither event_text nor event_image is set")),
            (Some(text), None) if text.trim().is_empty() => {
                return Err(malformed("event_text is empty"))
            }
            (None, Some(image)) if image.trim().is_empty() => {
                return Err(malformed("event_image is empty"))
            }
            (Some(text), None) => EventPayload::Text {
                event_text: text.clone(),
            },
            (None, Some(image)) => EventPayload::Image {
                event_image: image.clone(),
            },
        };

        Ok(LifeEvent {
            id: row.id,
            user_id: row.user_id,
            event_date: row.event_date,
            created_at: row.created_at,
            payload,
        })
    }
}

impl From<LifeEvent> for EventRow {
    fn from(event: LifeEvent) -> Self {
        let (event_text, event_image) = match event.payload {
            EventPayload::Text { event_text } => (Some(event_text), None),
            EventPayload::Image { event_image } => (None, Some(event_image)),
        };
        EventRow {
            id: event.id,
            user_id: event.user_id,
            event_text,
            event_image,
            event_date: event.event_date,
            created_at: event.created_at,
        }
    }
}
