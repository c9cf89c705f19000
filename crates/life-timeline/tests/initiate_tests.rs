//! Tests for timeline construction, spans and lookups.

use chrono::{Datelike, NaiveDate};
use life_timeline::{
    EventLocation, EventRow, LifeTimeline, MonthId, TimelineConfig, TimelineError, TimelineSpan,
    UndatedPolicy,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn span(start: i32, end: i32) -> TimelineSpan {
    TimelineSpan::new(start, end).unwrap()
}

fn text_row(id: &str, date: Option<(i32, u32, u32)>) -> EventRow {
    EventRow {
        id: id.into(),
        user_id: "user-1".into(),
        event_text: Some(format!("event {}", id)),
        event_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        ..EventRow::default()
    }
}

fn month(year: i32, month: u32) -> MonthId {
    MonthId::new(year, month).unwrap()
}

// ── Skeleton ────────────────────────────────────────────────────────────────

#[test]
fn empty_nineties_has_one_decade_ten_years_120_months() {
    let timeline = LifeTimeline::initiate(span(1990, 1999), Vec::new()).unwrap();

    assert_eq!(timeline.decades().len(), 1);
    assert_eq!(timeline.decades()[0].decade(), 1990);
    assert_eq!(timeline.decades()[0].years().len(), 10);
    assert_eq!(timeline.months().count(), 120);
    assert!(timeline.months().all(|m| m.events().is_empty()));
    assert_eq!(timeline.event_count(), 0);
}

#[test]
fn every_year_has_twelve_months_in_order() {
    let timeline = LifeTimeline::empty(span(1990, 1999));

    for decade in timeline.decades() {
        for year in decade.years() {
            let numbers: Vec<u32> = year.months().map(|m| m.month()).collect();
            assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
            assert!(year.months().all(|m| m.year() == year.year()));
        }
    }
}

#[test]
fn partial_decades_at_span_edges() {
    let timeline = LifeTimeline::empty(span(1987, 2003));

    let decades: Vec<i32> = timeline.decades().iter().map(|d| d.decade()).collect();
    assert_eq!(decades, [1980, 1990, 2000]);

    let years = |i: usize| -> Vec<i32> {
        timeline.decades()[i].years().iter().map(|y| y.year()).collect()
    };
    assert_eq!(years(0), [1987, 1988, 1989]);
    assert_eq!(years(1).len(), 10);
    assert_eq!(years(2), [2000, 2001, 2002, 2003]);
    assert_eq!(timeline.months().count(), 17 * 12);
}

#[test]
fn months_are_chronological() {
    let timeline = LifeTimeline::empty(span(1998, 2001));
    let ids: Vec<MonthId> = timeline.months().map(|m| m.id()).collect();

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids.first(), Some(&month(1998, 1)));
    assert_eq!(ids.last(), Some(&month(2001, 12)));
}

#[test]
fn from_birth_year_starts_at_birth_decade() {
    let span = TimelineSpan::from_birth_year(1993, 2026).unwrap();
    assert_eq!(span.start_year(), 1990);
    assert_eq!(span.end_year(), 2026);
}

#[test]
fn inverted_span_is_rejected() {
    assert!(matches!(
        TimelineSpan::new(2000, 1999),
        Err(TimelineError::InvalidSpan(_))
    ));
}

#[test]
fn oversized_span_is_rejected() {
    assert!(matches!(
        TimelineSpan::new(0, 5000),
        Err(TimelineError::InvalidSpan(_))
    ));
}

#[test]
fn span_beyond_the_calendar_is_rejected() {
    assert!(matches!(
        TimelineSpan::new(i32::MAX - 5, i32::MAX),
        Err(TimelineError::InvalidSpan(_))
    ));
    assert!(matches!(
        TimelineSpan::new(i32::MIN, i32::MIN + 3),
        Err(TimelineError::InvalidSpan(_))
    ));
}

#[test]
fn span_at_the_calendar_edges_builds_full_years() {
    let last = NaiveDate::MAX.year();
    let first = NaiveDate::MIN.year();

    let late = LifeTimeline::empty(span(last - 5, last));
    let early = LifeTimeline::empty(span(first, first + 3));

    assert_eq!(late.months().count(), 72);
    assert_eq!(early.months().count(), 48);
}

// ── Seeding ─────────────────────────────────────────────────────────────────

#[test]
fn dated_event_lands_only_in_its_month() {
    let timeline =
        LifeTimeline::initiate(span(1990, 1999), vec![text_row("e1", Some((1995, 6, 20)))]).unwrap();

    let june = timeline.month(month(1995, 6)).unwrap();
    assert_eq!(june.events().len(), 1);
    assert_eq!(june.events()[0].id.0, "e1");

    let holders: Vec<MonthId> = timeline
        .months()
        .filter(|m| !m.events().is_empty())
        .map(|m| m.id())
        .collect();
    assert_eq!(holders, [month(1995, 6)]);
    assert_eq!(
        timeline.find_event(&"e1".into()).map(|(loc, _)| loc),
        Some(EventLocation::Month(month(1995, 6)))
    );
}

#[test]
fn events_keep_input_order_within_a_month() {
    let rows = vec![
        text_row("b", Some((1995, 6, 30))),
        text_row("a", Some((1995, 6, 1))),
        text_row("c", Some((1995, 6, 15))),
    ];
    let timeline = LifeTimeline::initiate(span(1990, 1999), rows).unwrap();

    let ids: Vec<&str> = timeline
        .month(month(1995, 6))
        .unwrap()
        .events()
        .iter()
        .map(|e| e.id.0.as_str())
        .collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[test]
fn out_of_range_event_is_reported() {
    let err = LifeTimeline::initiate(
        span(1990, 1999),
        vec![text_row("ok", Some((1991, 1, 1))), text_row("late", Some((2005, 3, 1)))],
    )
    .unwrap_err();

    assert_eq!(
        err,
        TimelineError::OutOfRangeEvent {
            id: "late".into(),
            year: 2005,
            month: 3,
            start: 1990,
            end: 1999,
        }
    );
}

#[test]
fn malformed_row_fails_construction() {
    let mut bad = text_row("bad", Some((1995, 1, 1)));
    bad.event_text = None;

    let err = LifeTimeline::initiate(span(1990, 1999), vec![bad]).unwrap_err();
    assert!(matches!(err, TimelineError::MalformedEvent { .. }));
}

#[test]
fn duplicate_ids_fail_construction() {
    let err = LifeTimeline::initiate(
        span(1990, 1999),
        vec![text_row("dup", Some((1991, 1, 1))), text_row("dup", Some((1992, 1, 1)))],
    )
    .unwrap_err();
    assert_eq!(err, TimelineError::DuplicateEvent("dup".into()));
}

#[test]
fn undated_event_goes_to_bucket_by_default() {
    let timeline =
        LifeTimeline::initiate(span(1990, 1999), vec![text_row("nodate", None)]).unwrap();

    assert_eq!(timeline.undated().len(), 1);
    assert_eq!(timeline.event_count(), 1);
    assert!(timeline.months().all(|m| m.events().is_empty()));
    assert_eq!(
        timeline.find_event(&"nodate".into()).map(|(loc, _)| loc),
        Some(EventLocation::Undated)
    );
}

#[test]
fn undated_event_rejected_under_reject_policy() {
    let config = TimelineConfig::new(span(1990, 1999)).with_undated(UndatedPolicy::Reject);

    let err = LifeTimeline::initiate(config, vec![text_row("nodate", None)]).unwrap_err();
    assert_eq!(err, TimelineError::UndatedEvent("nodate".into()));
}

// ── Lookups ─────────────────────────────────────────────────────────────────

#[test]
fn month_lookup_outside_span_is_none() {
    let timeline = LifeTimeline::empty(span(1990, 1999));

    assert!(timeline.month(month(1989, 12)).is_none());
    assert!(timeline.month(month(2000, 1)).is_none());
    assert!(timeline.month(month(2999, 1)).is_none());
    assert!(timeline.year(1995).is_some());
    assert!(timeline.year(2000).is_none());
}

#[test]
fn month_id_rejects_bad_month_numbers() {
    assert!(matches!(MonthId::new(1995, 0), Err(TimelineError::InvalidMonthId(_))));
    assert!(matches!(MonthId::new(1995, 13), Err(TimelineError::InvalidMonthId(_))));
}

#[test]
fn month_id_parses_and_displays() {
    let id: MonthId = "1995-06".parse().unwrap();
    assert_eq!(id, month(1995, 6));
    assert_eq!(id.to_string(), "1995-06");
    assert_eq!(id.decade(), 1990);
    assert_eq!(id.first_day(), NaiveDate::from_ymd_opt(1995, 6, 1));

    assert!("1995".parse::<MonthId>().is_err());
    assert!("1995-xx".parse::<MonthId>().is_err());
}

#[test]
fn negative_years_are_supported() {
    let timeline = LifeTimeline::empty(span(-12, 3));
    let decades: Vec<i32> = timeline.decades().iter().map(|d| d.decade()).collect();
    assert_eq!(decades, [-20, -10, 0]);

    let id: MonthId = month(-5, 3).to_string().parse().unwrap();
    assert_eq!(id, month(-5, 3));
    assert!(timeline.month(id).is_some());
}
