//! State transitions over a [`LifeTimeline`].
//!
//! Every function here takes the current timeline by reference and returns a
//! new one. The input is never modified, and on error no timeline is produced,
//! so callers can keep the previous value for undo or to diff against.
//!
//! Only the months a transition touches are copied; the rest are shared with
//! the input timeline.

use crate::error::{Result, TimelineError};
use crate::event::{EventId, LifeEvent};
use crate::timeline::{EventLocation, LifeTimeline, MonthId};

/// Relocate `event` from `source` to the end of `target`.
///
/// A move onto the same month returns a timeline equal to the input. The
/// event itself is carried unchanged, including its `event_date`.
///
/// # Errors
/// - `EventNotInSourceMonth` if `source` does not hold an event with
///   `event.id`, including when `source` is not in the timeline.
/// - `TargetMonthNotFound` if `target` is not in the timeline.
pub fn move_event(
    timeline: &LifeTimeline,
    event: &LifeEvent,
    source: MonthId,
    target: MonthId,
) -> Result<LifeTimeline> {
    let not_in_source = || TimelineError::EventNotInSourceMonth {
        event_id: event.id.to_string(),
        month_id: source.to_string(),
    };

    let source_month = timeline.month(source).ok_or_else(not_in_source)?;
    let index = source_month
        .events()
        .iter()
        .position(|e| e.id == event.id)
        .ok_or_else(not_in_source)?;

    if timeline.month(target).is_none() {
        return Err(TimelineError::TargetMonthNotFound(target.to_string()));
    }

    if source == target {
        return Ok(timeline.clone());
    }

    let mut next = timeline.clone();
    // Both months were checked above, so the lookups below cannot miss.
    let moved = next
        .month_mut(source)
        .map(|m| m.events_mut().remove(index))
        .ok_or_else(not_in_source)?;
    next.month_mut(target)
        .ok_or_else(|| TimelineError::TargetMonthNotFound(target.to_string()))?
        .events_mut()
        .push(moved);
    Ok(next)
}

/// Add a new event, placed by its date under the timeline's undated policy.
///
/// # Errors
/// - `DuplicateEvent` if an event with the same id is already present.
/// - `OutOfRangeEvent` / `UndatedEvent` as for [`LifeTimeline::initiate`].
pub fn insert_event(timeline: &LifeTimeline, event: LifeEvent) -> Result<LifeTimeline> {
    if timeline.find_event(&event.id).is_some() {
        return Err(TimelineError::DuplicateEvent(event.id.to_string()));
    }
    // Resolve before cloning so a rejected event costs nothing.
    timeline.resolve_location(&event)?;
    let mut next = timeline.clone();
    next.place(event)?;
    Ok(next)
}

/// Remove the event with `id`, wherever it sits.
///
/// Returns the new timeline together with the removed event.
///
/// # Errors
/// Returns `EventNotFound` if no event has that id.
pub fn remove_event(timeline: &LifeTimeline, id: &EventId) -> Result<(LifeTimeline, LifeEvent)> {
    let not_found = || TimelineError::EventNotFound(id.to_string());
    let (location, _) = timeline.find_event(id).ok_or_else(not_found)?;

    let mut next = timeline.clone();
    let events = match location {
        EventLocation::Month(month) => next.month_mut(month).ok_or_else(not_found)?.events_mut(),
        EventLocation::Undated => next.undated_mut(),
    };
    let index = events
        .iter()
        .position(|e| &e.id == id)
        .ok_or_else(not_found)?;
    let removed = events.remove(index);
    Ok((next, removed))
}

impl LifeTimeline {
    /// Method form of [`move_event`].
    pub fn move_event(&self, event: &LifeEvent, source: MonthId, target: MonthId) -> Result<Self> {
        move_event(self, event, source, target)
    }

    /// Method form of [`insert_event`].
    pub fn insert_event(&self, event: LifeEvent) -> Result<Self> {
        insert_event(self, event)
    }

    /// Method form of [`remove_event`].
    pub fn remove_event(&self, id: &EventId) -> Result<(Self, LifeEvent)> {
        remove_event(self, id)
    }
}
