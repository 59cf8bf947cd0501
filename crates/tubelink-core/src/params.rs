//! Embed parameters (player vars)
//!
//! The remote embed's configuration: a key → JSON value mapping supplied
//! either raw or rebuilt from a list of typed parameters. The typed-list form
//! fully replaces any previously set mapping; it does not merge.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One typed embed parameter, contributing a single key/value pair.
///
/// Boolean-like parameters encode as the strings `"1"`/`"0"`, which is the
/// form the embed protocol documents and the form the end-of-video loop
/// check compares against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EmbedParameter {
    VideoId(String),
    Autoplay(bool),
    /// Start playback muted. Combined with `Autoplay`, the bridge mutes
    /// before issuing the initial play.
    Mute(bool),
    /// Replay the video (or playlist) when it ends.
    Loop(bool),
    Controls(bool),
    PlaysInline(bool),
    ShowRelatedVideos(bool),
    StartSeconds(u32),
    EndSeconds(u32),
    Origin(String),
    ListType(String),
    List(String),
}

impl EmbedParameter {
    /// Player-vars key this parameter contributes.
    pub fn key(&self) -> &'static str {
        match self {
            EmbedParameter::VideoId(_) => "videoId",
            EmbedParameter::Autoplay(_) => "autoplay",
            EmbedParameter::Mute(_) => "mute",
            EmbedParameter::Loop(_) => "loop",
            EmbedParameter::Controls(_) => "controls",
            EmbedParameter::PlaysInline(_) => "playsinline",
            EmbedParameter::ShowRelatedVideos(_) => "rel",
            EmbedParameter::StartSeconds(_) => "start",
            EmbedParameter::EndSeconds(_) => "end",
            EmbedParameter::Origin(_) => "origin",
            EmbedParameter::ListType(_) => "listType",
            EmbedParameter::List(_) => "list",
        }
    }

    /// Player-vars value this parameter contributes.
    pub fn value(&self) -> Value {
        fn flag(on: &bool) -> Value {
            Value::String(if *on { "1" } else { "0" }.to_string())
        }
        match self {
            EmbedParameter::VideoId(id) => Value::String(id.clone()),
            EmbedParameter::Autoplay(on) => flag(on),
            EmbedParameter::Mute(on) => flag(on),
            EmbedParameter::Loop(on) => flag(on),
            EmbedParameter::Controls(on) => flag(on),
            EmbedParameter::PlaysInline(on) => flag(on),
            EmbedParameter::ShowRelatedVideos(on) => flag(on),
            EmbedParameter::StartSeconds(s) => Value::from(*s),
            EmbedParameter::EndSeconds(s) => Value::from(*s),
            EmbedParameter::Origin(origin) => Value::String(origin.clone()),
            EmbedParameter::ListType(t) => Value::String(t.clone()),
            EmbedParameter::List(l) => Value::String(l.clone()),
        }
    }
}

/// The remote embed's configuration mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedParameters {
    vars: Map<String, Value>,
}

impl EmbedParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw key → value mapping.
    pub fn from_map(vars: Map<String, Value>) -> Self {
        Self { vars }
    }

    /// Build from a typed parameter list. Later entries win on key collision.
    pub fn from_list(params: &[EmbedParameter]) -> Self {
        let mut vars = Map::new();
        for param in params {
            vars.insert(param.key().to_string(), param.value());
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.vars.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// The underlying mapping, as embedded under `playerVars` in the page
    /// config object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.vars
    }

    /// Video id, when one is configured. Duplicated at the top level of the
    /// page config object.
    pub fn video_id(&self) -> Option<&str> {
        self.vars.get("videoId").and_then(Value::as_str)
    }

    /// Whether autoplay was requested. The embed page normalizes `"1"`, `1`,
    /// and `true` to the same thing, so all three shapes are accepted.
    pub fn autoplay_requested(&self) -> bool {
        self.flag_set("autoplay")
    }

    /// Whether starting muted was requested.
    pub fn automute_requested(&self) -> bool {
        self.flag_set("mute")
    }

    /// Whether looping was requested. Strict: only the string `"1"` counts.
    pub fn loop_requested(&self) -> bool {
        matches!(self.vars.get("loop"), Some(Value::String(s)) if s == "1")
    }

    fn flag_set(&self, key: &str) -> bool {
        match self.vars.get(key) {
            Some(Value::String(s)) => s == "1",
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_list_contributes_keys_and_values() {
        let params = EmbedParameters::from_list(&[
            EmbedParameter::VideoId("abc123".into()),
            EmbedParameter::Autoplay(true),
            EmbedParameter::Loop(false),
            EmbedParameter::StartSeconds(30),
        ]);
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("videoId"), Some(&json!("abc123")));
        assert_eq!(params.get("autoplay"), Some(&json!("1")));
        assert_eq!(params.get("loop"), Some(&json!("0")));
        assert_eq!(params.get("start"), Some(&json!(30)));
    }

    #[test]
    fn test_typed_list_fully_replaces_raw_mapping() {
        let mut raw = Map::new();
        raw.insert("videoId".to_string(), json!("old"));
        raw.insert("color".to_string(), json!("white"));
        let previous = EmbedParameters::from_map(raw);
        assert_eq!(previous.len(), 2);

        // Rebuilding from a list drops every previously set key.
        let replaced = EmbedParameters::from_list(&[EmbedParameter::Mute(true)]);
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced.get("mute"), Some(&json!("1")));
        assert_eq!(replaced.get("videoId"), None);
        assert_eq!(replaced.get("color"), None);
    }

    #[test]
    fn test_loop_requested_is_strict_string_compare() {
        let mut params = EmbedParameters::new();
        assert!(!params.loop_requested());

        params.insert("loop", json!("1"));
        assert!(params.loop_requested());

        params.insert("loop", json!(1));
        assert!(!params.loop_requested());

        params.insert("loop", json!(true));
        assert!(!params.loop_requested());

        params.insert("loop", json!("0"));
        assert!(!params.loop_requested());
    }

    #[test]
    fn test_autoplay_and_mute_accept_common_shapes() {
        for value in [json!("1"), json!(1), json!(true)] {
            let mut params = EmbedParameters::new();
            params.insert("autoplay", value.clone());
            params.insert("mute", value);
            assert!(params.autoplay_requested());
            assert!(params.automute_requested());
        }
        let mut params = EmbedParameters::new();
        params.insert("autoplay", json!("yes"));
        params.insert("mute", json!(0));
        assert!(!params.autoplay_requested());
        assert!(!params.automute_requested());
    }

    #[test]
    fn test_video_id_accessor() {
        let params = EmbedParameters::from_list(&[EmbedParameter::VideoId("abc123".into())]);
        assert_eq!(params.video_id(), Some("abc123"));
        assert_eq!(EmbedParameters::new().video_id(), None);
    }
}
