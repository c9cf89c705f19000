//! WASM bindings for life-timeline.
//!
//! Exposes timeline construction, event relocation, insertion/removal and
//! intent diffing to the browser via `wasm-bindgen`. Every complex value crosses
//! the boundary as a JSON string: the timeline itself, event rows, and intents.
//! The presentation layer keeps the current timeline JSON as its state and
//! replaces it with the string each call returns.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p life-timeline-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/life-timeline-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/life_timeline_wasm.wasm
//! ```

use life_timeline::{
    EventId, EventRow, LifeEvent, LifeTimeline, MonthId, TimelineConfig, TimelineError,
};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn from_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_month(id: &str) -> Result<MonthId, JsValue> {
    id.parse().map_err(js_err)
}

fn js_err(e: TimelineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build a timeline from a config and a JSON array of event rows.
///
/// `config_json` is `{"span":{"start_year":..,"end_year":..},"undated":"bucket"|"reject"}`.
/// `rows_json` is an array of `{id, user_id, event_text | event_image, event_date?, created_at?}`.
/// Returns the timeline as a JSON string.
#[wasm_bindgen(js_name = "initiate")]
pub fn initiate(config_json: &str, rows_json: &str) -> Result<String, JsValue> {
    let config: TimelineConfig = from_json(config_json, "config")?;
    let rows: Vec<EventRow> = from_json(rows_json, "event rows")?;
    let timeline = LifeTimeline::initiate(config, rows).map_err(js_err)?;
    to_json(&timeline)
}

/// Move an event from `source` to `target` (both `"YYYY-MM"`).
///
/// `event_json` is the event as it appears inside the timeline, which is what
/// the drag layer carries. Returns the new timeline JSON; the input string is
/// untouched, so the caller can keep it for undo.
#[wasm_bindgen(js_name = "moveEvent")]
pub fn move_event(
    timeline_json: &str,
    event_json: &str,
    source: &str,
    target: &str,
) -> Result<String, JsValue> {
    let timeline: LifeTimeline = from_json(timeline_json, "timeline")?;
    let event: LifeEvent = from_json(event_json, "event")?;
    let next = timeline
        .move_event(&event, parse_month(source)?, parse_month(target)?)
        .map_err(js_err)?;
    to_json(&next)
}

/// Add one event row. Returns the new timeline JSON.
#[wasm_bindgen(js_name = "insertEvent")]
pub fn insert_event(timeline_json: &str, row_json: &str) -> Result<String, JsValue> {
    let timeline: LifeTimeline = from_json(timeline_json, "timeline")?;
    let row: EventRow = from_json(row_json, "event row")?;
    let event = LifeEvent::try_from(row).map_err(js_err)?;
    let next = timeline.insert_event(event).map_err(js_err)?;
    to_json(&next)
}

/// Remove the event with `event_id`. Returns the new timeline JSON.
#[wasm_bindgen(js_name = "removeEvent")]
pub fn remove_event(timeline_json: &str, event_id: &str) -> Result<String, JsValue> {
    let timeline: LifeTimeline = from_json(timeline_json, "timeline")?;
    let (next, _) = timeline
        .remove_event(&EventId::from(event_id))
        .map_err(js_err)?;
    to_json(&next)
}

/// Persistence intents that turn `before_json` into `after_json`.
///
/// Returns a JSON array of `{intent: "create"|"delete"|"move", ...}` objects.
#[wasm_bindgen(js_name = "diffTimelines")]
pub fn diff_timelines(before_json: &str, after_json: &str) -> Result<String, JsValue> {
    let before: LifeTimeline = from_json(before_json, "timeline")?;
    let after: LifeTimeline = from_json(after_json, "timeline")?;
    to_json(&life_timeline::diff(&before, &after))
}

/// True iff `event_json` is a valid text event.
///
/// Fails for rows that are neither text nor image events.
#[wasm_bindgen(js_name = "isTextEvent")]
pub fn is_text_event(event_json: &str) -> Result<bool, JsValue> {
    let event: LifeEvent = from_json(event_json, "event")?;
    Ok(life_timeline::is_text_event(&event))
}

/// True iff `event_json` is a valid image event.
///
/// Fails for rows that are neither text nor image events.
#[wasm_bindgen(js_name = "isImageEvent")]
pub fn is_image_event(event_json: &str) -> Result<bool, JsValue> {
    let event: LifeEvent = from_json(event_json, "event")?;
    Ok(life_timeline::is_image_event(&event))
}
