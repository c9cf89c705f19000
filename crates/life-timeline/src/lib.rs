//! # life-timeline
//!
//! A life history laid out as decades → years → months, with a pure
//! reorganizer that moves events between months.
//!
//! A timeline is built once from raw event rows, read by the presentation
//! layer, and replaced by a new value on every user action. Nothing in this
//! crate performs I/O or mutates a timeline that was handed in.
//!
//! ```rust
//! use life_timeline::{EventRow, LifeTimeline, MonthId, TimelineSpan};
//!
//! let span = TimelineSpan::new(1990, 1999).unwrap();
//! let row = EventRow {
//!     id: "e1".into(),
//!     user_id: "u1".into(),
//!     event_text: Some("First bike".into()),
//!     event_date: chrono::NaiveDate::from_ymd_opt(1995, 6, 14),
//!     ..EventRow::default()
//! };
//! let timeline = LifeTimeline::initiate(span, [row]).unwrap();
//!
//! let june = MonthId::new(1995, 6).unwrap();
//! let july = MonthId::new(1995, 7).unwrap();
//! let event = timeline.month(june).unwrap().events()[0].clone();
//!
//! let moved = timeline.move_event(&event, june, july).unwrap();
//! assert!(moved.month(june).unwrap().events().is_empty());
//! assert_eq!(moved.month(july).unwrap().events(), &[event]);
//! // The original value is untouched.
//! assert_eq!(timeline.month(june).unwrap().events().len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`event`] — Text/image event variants and raw persistence rows
//! - [`span`] — The covered range of years
//! - [`config`] — Span plus the policy for undated events
//! - [`timeline`] — The decade/year/month skeleton and construction
//! - [`reorganize`] — `move_event`, `insert_event`, `remove_event`
//! - [`intent`] — Persistence intents from diffing two timelines
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod event;
pub mod intent;
pub mod reorganize;
pub mod span;
pub mod timeline;

pub use config::{TimelineConfig, UndatedPolicy};
pub use error::TimelineError;
pub use event::{is_image_event, is_text_event, EventId, EventPayload, EventRow, LifeEvent, UserId};
pub use intent::{diff, TimelineIntent};
pub use reorganize::{insert_event, move_event, remove_event};
pub use span::TimelineSpan;
pub use timeline::{
    Decade, DecadeId, EventLocation, LifeTimeline, Month, MonthId, TimelineShape, Year, YearId,
};
