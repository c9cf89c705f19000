//! Persistence intents derived by comparing two timelines.
//!
//! The core never talks to storage. A caller that holds the timeline before
//! and after a transition calls [`diff`] and hands the resulting intents to
//! whatever persists events.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::event::{EventId, LifeEvent};
use crate::timeline::{EventLocation, LifeTimeline};

/// A change the persistence layer should apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum TimelineIntent {
    /// Store a new event.
    Create { event: LifeEvent },
    /// Delete the event with this id.
    Delete { id: EventId },
    /// The event with this id now lives in `to`.
    Move { id: EventId, to: EventLocation },
}

/// Intents that turn `before` into `after`.
///
/// Events are matched by id. Creates and moves come first, in `after`'s
/// chronological order, followed by deletes in `before`'s order. An event whose
/// id and location are unchanged produces nothing.
pub fn diff(before: &LifeTimeline, after: &LifeTimeline) -> Vec<TimelineIntent> {
    let previous: HashMap<&EventId, EventLocation> =
        before.events().map(|(loc, e)| (&e.id, loc)).collect();

    let mut intents = Vec::new();
    let mut present = HashSet::new();

    for (location, event) in after.events() {
        present.insert(&event.id);
        match previous.get(&event.id) {
            None => intents.push(TimelineIntent::Create {
                event: event.clone(),
            }),
            Some(old) if *old != location => intents.push(TimelineIntent::Move {
                id: event.id.clone(),
                to: location,
            }),
            Some(_) => {}
        }
    }

    intents.extend(
        before
            .events()
            .filter(|(_, e)| !present.contains(&e.id))
            .map(|(_, e)| TimelineIntent::Delete { id: e.id.clone() }),
    );

    intents
}
