//! Tests for adding and removing events.

use chrono::NaiveDate;
use life_timeline::{
    EventLocation, LifeEvent, LifeTimeline, MonthId, TimelineConfig, TimelineError, TimelineSpan,
    UndatedPolicy,
};

fn nineties() -> TimelineSpan {
    TimelineSpan::new(1990, 1999).unwrap()
}

fn dated(id: &str, y: i32, m: u32) -> LifeEvent {
    LifeEvent::image(id, "user-1", format!("{}.png", id))
        .unwrap()
        .with_date(NaiveDate::from_ymd_opt(y, m, 10).unwrap())
}

#[test]
fn insert_places_event_by_date() {
    let before = LifeTimeline::empty(nineties());

    let after = before.insert_event(dated("p1", 1993, 9)).unwrap();

    let sept = after.month(MonthId::new(1993, 9).unwrap()).unwrap();
    assert_eq!(sept.events().len(), 1);
    assert_eq!(after.event_count(), 1);
    assert_eq!(before.event_count(), 0);
}

#[test]
fn insert_appends_after_existing_events() {
    let before = LifeTimeline::from_events(nineties(), vec![dated("a", 1993, 9)]).unwrap();

    let after = before.insert_event(dated("b", 1993, 9)).unwrap();

    let ids: Vec<&str> = after
        .month(MonthId::new(1993, 9).unwrap())
        .unwrap()
        .events()
        .iter()
        .map(|e| e.id.0.as_str())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn insert_duplicate_id_fails() {
    let before = LifeTimeline::from_events(nineties(), vec![dated("a", 1993, 9)]).unwrap();

    let err = before.insert_event(dated("a", 1996, 1)).unwrap_err();
    assert_eq!(err, TimelineError::DuplicateEvent("a".into()));
}

#[test]
fn insert_out_of_range_fails() {
    let before = LifeTimeline::empty(nineties());

    let err = before.insert_event(dated("late", 2010, 1)).unwrap_err();
    assert!(matches!(err, TimelineError::OutOfRangeEvent { year: 2010, .. }));
}

#[test]
fn insert_undated_follows_policy() {
    let bucket = LifeTimeline::empty(nineties());
    let undated = LifeEvent::text("u", "user-1", "someday").unwrap();

    let after = bucket.insert_event(undated.clone()).unwrap();
    assert_eq!(after.undated(), &[undated.clone()]);

    let strict =
        LifeTimeline::empty(TimelineConfig::new(nineties()).with_undated(UndatedPolicy::Reject));
    let err = strict.insert_event(undated).unwrap_err();
    assert_eq!(err, TimelineError::UndatedEvent("u".into()));
}

#[test]
fn remove_returns_event_and_new_timeline() {
    let before =
        LifeTimeline::from_events(nineties(), vec![dated("a", 1993, 9), dated("b", 1993, 9)])
            .unwrap();

    let (after, removed) = before.remove_event(&"a".into()).unwrap();

    assert_eq!(removed.id.0, "a");
    assert_eq!(after.event_count(), 1);
    assert!(after.find_event(&"a".into()).is_none());
    assert_eq!(
        after.find_event(&"b".into()).map(|(loc, _)| loc),
        Some(EventLocation::Month(MonthId::new(1993, 9).unwrap()))
    );
    assert_eq!(before.event_count(), 2);
}

#[test]
fn remove_from_undated_bucket() {
    let undated = LifeEvent::text("u", "user-1", "someday").unwrap();
    let before = LifeTimeline::from_events(nineties(), vec![undated]).unwrap();

    let (after, _) = before.remove_event(&"u".into()).unwrap();

    assert!(after.undated().is_empty());
}

#[test]
fn remove_missing_event_fails() {
    let before = LifeTimeline::empty(nineties());

    let err = before.remove_event(&"nope".into()).unwrap_err();
    assert_eq!(err, TimelineError::EventNotFound("nope".into()));
}

#[test]
fn remove_then_insert_relocates_between_bucket_and_month() {
    let undated = LifeEvent::text("u", "user-1", "someday").unwrap();
    let before = LifeTimeline::from_events(nineties(), vec![undated]).unwrap();

    let (without, event) = before.remove_event(&"u".into()).unwrap();
    let dated = event.with_date(NaiveDate::from_ymd_opt(1994, 2, 2).unwrap());
    let after = without.insert_event(dated).unwrap();

    assert!(after.undated().is_empty());
    assert_eq!(
        after.find_event(&"u".into()).map(|(loc, _)| loc),
        Some(EventLocation::Month(MonthId::new(1994, 2).unwrap()))
    );
    assert_eq!(after.shape(), before.shape());
}
