//! WASM bindings for `day-layout`.
//!
//! Exposes `layOutDay` to JavaScript so a browser day view can hand over its
//! events as JSON and position its elements from the returned layout.

use day_layout::{layout_json, LayoutConfig, LayoutError};
use wasm_bindgen::prelude::*;

/// Lay out a JSON array of `{"start", "end"}` events.
///
/// `config_json` is an optional object such as `{"totalWidth": 600, "gutter": 3}`;
/// missing keys take their defaults.
pub fn lay_out_day_json(
    events_json: &str,
    config_json: Option<&str>,
) -> Result<String, LayoutError> {
    let config = match config_json {
        Some(json) => LayoutConfig::from_json(json)?,
        None => LayoutConfig::default(),
    };
    layout_json(events_json, &config)
}

/// JavaScript entry point: `layOutDay(eventsJson, configJson?) -> string`.
#[wasm_bindgen(js_name = layOutDay)]
pub fn lay_out_day(events_json: &str, config_json: Option<String>) -> Result<String, JsError> {
    lay_out_day_json(events_json, config_json.as_deref()).map_err(|e| JsError::new(&e.to_string()))
}
