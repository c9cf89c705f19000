//! The decade → year → month hierarchy and its construction.
//!
//! The skeleton (which decades, years and months exist) is derived entirely
//! from the [`TimelineSpan`] and never changes after construction. Months are
//! held behind `Arc`, so a timeline produced by a transition shares every month
//! it did not touch with the timeline it was derived from.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{TimelineConfig, UndatedPolicy};
use crate::error::{Result, TimelineError};
use crate::event::{EventId, EventRow, LifeEvent};
use crate::span::{decade_start, TimelineSpan};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Identifier of a month bucket, derived from its position (`"1995-06"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthId {
    year: i32,
    month: u32,
}

impl MonthId {
    /// # Errors
    /// Returns `TimelineError::InvalidMonthId` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TimelineError::InvalidMonthId(format!(
                "{}-{}: month must be 1-12",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn decade(&self) -> i32 {
        decade_start(self.year)
    }

    /// First calendar day of the month, for persisting a relocated event's date.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthId {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TimelineError::InvalidMonthId(s.to_string());
        // rsplit so that negative years ("-005-03") keep their sign.
        let (year, month) = s.rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthId::new(year, month)
    }
}

impl From<MonthId> for String {
    fn from(id: MonthId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for MonthId {
    type Error = TimelineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<&Month> for MonthId {
    fn from(month: &Month) -> Self {
        month.id
    }
}

/// Identifier of a year bucket (`"1995"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearId(i32);

/// Identifier of a decade bucket (`"1990s"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DecadeId(i32);

impl fmt::Display for YearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DecadeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<YearId> for String {
    fn from(id: YearId) -> Self {
        id.to_string()
    }
}

impl From<DecadeId> for String {
    fn from(id: DecadeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for YearId {
    type Error = TimelineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
            .map(YearId)
            .map_err(|_| TimelineError::InvalidStructure(format!("invalid year id {:?}", s)))
    }
}

impl TryFrom<String> for DecadeId {
    type Error = TimelineError;

    fn try_from(s: String) -> Result<Self> {
        s.strip_suffix('s')
            .and_then(|d| d.parse().ok())
            .map(DecadeId)
            .ok_or_else(|| TimelineError::InvalidStructure(format!("invalid decade id {:?}", s)))
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// One calendar month and the events placed in it, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    id: MonthId,
    month: u32,
    events: Vec<LifeEvent>,
}

impl Month {
    fn empty(id: MonthId) -> Self {
        Self {
            id,
            month: id.month(),
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> MonthId {
        self.id
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.id.year()
    }

    pub fn events(&self) -> &[LifeEvent] {
        &self.events
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.events.iter().any(|e| &e.id == id)
    }

    pub(crate) fn events_mut(&mut self) -> &mut Vec<LifeEvent> {
        &mut self.events
    }
}

/// A year holding exactly twelve months, January first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year {
    id: YearId,
    year: i32,
    months: Vec<Arc<Month>>,
}

impl Year {
    fn empty(year: i32) -> Self {
        let months = (1..=12)
            .map(|month| Arc::new(Month::empty(MonthId { year, month })))
            .collect();
        Self {
            id: YearId(year),
            year,
            months,
        }
    }

    pub fn id(&self) -> YearId {
        self.id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> impl Iterator<Item = &Month> {
        self.months.iter().map(Arc::as_ref)
    }

    /// The shared handle for `month` (1-12), used to observe structural sharing.
    pub fn month_handle(&self, month: u32) -> Option<&Arc<Month>> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months.get(idx)
    }
}

/// A decade and the covered years that fall in it, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decade {
    id: DecadeId,
    decade: i32,
    years: Vec<Year>,
}

impl Decade {
    pub fn id(&self) -> DecadeId {
        self.id
    }

    pub fn decade(&self) -> i32 {
        self.decade
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }
}

/// Where an event currently sits in a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "month")]
pub enum EventLocation {
    Month(MonthId),
    Undated,
}

/// The skeleton of a timeline: every decade, year and month id in order.
///
/// Two timelines over the same span always have equal shapes, whatever events
/// they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineShape(pub Vec<(DecadeId, Vec<(YearId, Vec<MonthId>)>)>);

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// A user's monthly life history over a fixed span.
///
/// Values are never changed in place by the public API; transitions in
/// [`crate::reorganize`] return new timelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimelineSnapshot")]
pub struct LifeTimeline {
    config: TimelineConfig,
    decades: Vec<Decade>,
    undated: Vec<LifeEvent>,
}

impl LifeTimeline {
    /// Build the empty skeleton for `config.span`.
    pub fn empty(config: impl Into<TimelineConfig>) -> Self {
        let config = config.into();
        let span = config.span;
        let decades = span
            .decades()
            .map(|decade| Decade {
                id: DecadeId(decade),
                decade,
                years: span.years_in_decade(decade).map(Year::empty).collect(),
            })
            .collect();
        Self {
            config,
            decades,
            undated: Vec::new(),
        }
    }

    /// Build the skeleton and place each raw row into its month by date.
    ///
    /// Rows are validated into [`LifeEvent`]s first; events keep their input
    /// order within a month.
    ///
    /// # Errors
    /// - `MalformedEvent` for a row that is neither a text nor an image event.
    /// - `OutOfRangeEvent` for a row dated outside the span.
    /// - `UndatedEvent` for an undated row under `UndatedPolicy::Reject`.
    /// - `DuplicateEvent` if two rows share an id.
    pub fn initiate(
        config: impl Into<TimelineConfig>,
        rows: impl IntoIterator<Item = EventRow>,
    ) -> Result<Self> {
        let events = rows
            .into_iter()
            .map(LifeEvent::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::from_events(config, events)
    }

    /// Like [`initiate`](Self::initiate), for events that are already validated.
    pub fn from_events(
        config: impl Into<TimelineConfig>,
        events: impl IntoIterator<Item = LifeEvent>,
    ) -> Result<Self> {
        let mut timeline = Self::empty(config);
        let mut seen = HashSet::new();
        for event in events {
            if !seen.insert(event.id.clone()) {
                return Err(TimelineError::DuplicateEvent(event.id.to_string()));
            }
            timeline.place(event)?;
        }
        Ok(timeline)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn span(&self) -> TimelineSpan {
        self.config.span
    }

    pub fn decades(&self) -> &[Decade] {
        &self.decades
    }

    /// Events without a date, kept under `UndatedPolicy::Bucket`.
    pub fn undated(&self) -> &[LifeEvent] {
        &self.undated
    }

    /// Every month in chronological order.
    pub fn months(&self) -> impl Iterator<Item = &Month> {
        self.decades
            .iter()
            .flat_map(|d| d.years.iter())
            .flat_map(|y| y.months())
    }

    pub fn month(&self, id: MonthId) -> Option<&Month> {
        let (d, y, m) = self.position(id)?;
        Some(self.decades[d].years[y].months[m].as_ref())
    }

    pub fn year(&self, year: i32) -> Option<&Year> {
        let (d, y, _) = self.position(MonthId { year, month: 1 })?;
        Some(&self.decades[d].years[y])
    }

    /// Total number of events, undated bucket included.
    pub fn event_count(&self) -> usize {
        self.months().map(|m| m.events.len()).sum::<usize>() + self.undated.len()
    }

    /// Every event with its location, months first then the undated bucket.
    pub fn events(&self) -> impl Iterator<Item = (EventLocation, &LifeEvent)> {
        self.months()
            .flat_map(|m| m.events.iter().map(move |e| (EventLocation::Month(m.id), e)))
            .chain(self.undated.iter().map(|e| (EventLocation::Undated, e)))
    }

    pub fn find_event(&self, id: &EventId) -> Option<(EventLocation, &LifeEvent)> {
        self.events().find(|(_, e)| &e.id == id)
    }

    pub fn shape(&self) -> TimelineShape {
        shape_of(&self.decades)
    }

    /// Indices of `id` in `decades[d].years[y].months[m]`, if it is in the span.
    fn position(&self, id: MonthId) -> Option<(usize, usize, usize)> {
        if !self.config.span.contains_year(id.year) {
            return None;
        }
        let first_decade = self.decades.first()?.decade;
        let d = usize::try_from((id.decade() - first_decade) / 10).ok()?;
        let first_year = self.decades.get(d)?.years.first()?.year;
        let y = usize::try_from(id.year - first_year).ok()?;
        let m = usize::try_from(id.month).ok()?.checked_sub(1)?;
        self.decades.get(d)?.years.get(y)?.months.get(m)?;
        Some((d, y, m))
    }

    /// Mutable access to one month, cloning it first if it is shared.
    pub(crate) fn month_mut(&mut self, id: MonthId) -> Option<&mut Month> {
        let (d, y, m) = self.position(id)?;
        Some(Arc::make_mut(&mut self.decades[d].years[y].months[m]))
    }

    pub(crate) fn undated_mut(&mut self) -> &mut Vec<LifeEvent> {
        &mut self.undated
    }

    /// The location `event` belongs in according to its date and the undated policy.
    pub(crate) fn resolve_location(&self, event: &LifeEvent) -> Result<EventLocation> {
        match event.year_month() {
            Some((year, month)) => {
                let span = self.config.span;
                if !span.contains_year(year) {
                    return Err(TimelineError::OutOfRangeEvent {
                        id: event.id.to_string(),
                        year,
                        month,
                        start: span.start_year(),
                        end: span.end_year(),
                    });
                }
                Ok(EventLocation::Month(MonthId::new(year, month)?))
            }
            None => match self.config.undated {
                UndatedPolicy::Bucket => Ok(EventLocation::Undated),
                UndatedPolicy::Reject => Err(TimelineError::UndatedEvent(event.id.to_string())),
            },
        }
    }

    /// Append `event` to the month its date resolves to. Does not check for duplicates.
    pub(crate) fn place(&mut self, event: LifeEvent) -> Result<()> {
        match self.resolve_location(&event)? {
            EventLocation::Month(id) => {
                let month = self
                    .month_mut(id)
                    .ok_or_else(|| TimelineError::TargetMonthNotFound(id.to_string()))?;
                month.events.push(event);
            }
            EventLocation::Undated => self.undated.push(event),
        }
        Ok(())
    }
}

fn shape_of(decades: &[Decade]) -> TimelineShape {
    TimelineShape(
        decades
            .iter()
            .map(|d| {
                let years: Vec<(YearId, Vec<MonthId>)> = d
                    .years
                    .iter()
                    .map(|y| (y.id, y.months().map(|m| m.id).collect::<Vec<_>>()))
                    .collect();
                (d.id, years)
            })
            .collect(),
    )
}

/// The unvalidated serialized form of a [`LifeTimeline`].
#[derive(Deserialize)]
struct TimelineSnapshot {
    config: TimelineConfig,
    decades: Vec<Decade>,
    #[serde(default)]
    undated: Vec<LifeEvent>,
}

impl TryFrom<TimelineSnapshot> for LifeTimeline {
    type Error = TimelineError;

    /// Rebuild the skeleton from the snapshot's span and refill it with the
    /// snapshot's month contents, rejecting any structural drift.
    fn try_from(snapshot: TimelineSnapshot) -> Result<Self> {
        let mut timeline = LifeTimeline::empty(snapshot.config);
        if shape_of(&snapshot.decades) != timeline.shape() {
            return Err(TimelineError::InvalidStructure(format!(
                "decades do not match span {}..={}",
                timeline.span().start_year(),
                timeline.span().end_year()
            )));
        }

        let mut seen = HashSet::new();
        let months = snapshot
            .decades
            .into_iter()
            .flat_map(|d| d.years)
            .flat_map(|y| y.months);
        for month in months {
            let month = Arc::unwrap_or_clone(month);
            for event in &month.events {
                if !seen.insert(event.id.clone()) {
                    return Err(TimelineError::DuplicateEvent(event.id.to_string()));
                }
            }
            if !month.events.is_empty() {
                if let Some(slot) = timeline.month_mut(month.id) {
                    slot.events = month.events;
                }
            }
        }
        for event in &snapshot.undated {
            if timeline.config.undated == UndatedPolicy::Reject {
                return Err(TimelineError::UndatedEvent(event.id.to_string()));
            }
            if !seen.insert(event.id.clone()) {
                return Err(TimelineError::DuplicateEvent(event.id.to_string()));
            }
        }
        timeline.undated = snapshot.undated;
        Ok(timeline)
    }
}
