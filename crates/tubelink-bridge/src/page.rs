//! Embed page config rendering
//!
//! The host toolkit renders an HTML template parameterized by one JSON
//! object: fixed 100%/100% sizing, an `events` mapping naming the channels
//! the page script wires up, the player vars, and a top-level `videoId`
//! duplicate when one is configured.

use crate::error::Result;
use crate::events::Channel;
use serde_json::{Map, Value};
use tubelink_core::EmbedParameters;

/// Build the page config object for the current parameters.
pub(crate) fn player_config(params: &EmbedParameters) -> Value {
    let mut events = Map::new();
    for name in Channel::ALL_NAMES {
        // The page script uses the mapping to know which callbacks to wire;
        // each channel maps to its own name.
        events.insert(name.to_string(), Value::String(name.to_string()));
    }

    let mut config = Map::new();
    config.insert("width".to_string(), Value::String("100%".to_string()));
    config.insert("height".to_string(), Value::String("100%".to_string()));
    config.insert("events".to_string(), Value::Object(events));
    config.insert(
        "playerVars".to_string(),
        Value::Object(params.as_map().clone()),
    );
    if let Some(id) = params.video_id() {
        config.insert("videoId".to_string(), Value::String(id.to_string()));
    }
    Value::Object(config)
}

/// Serialize the page config. Failure here means the caller supplied
/// malformed embed parameters; it aborts the load rather than degrading.
pub(crate) fn render_player_config(params: &EmbedParameters) -> Result<String> {
    Ok(serde_json::to_string(&player_config(params))?)
}
