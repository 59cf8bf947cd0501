//! Scripted Session Example
//!
//! Drives a full bridge session against the in-memory script host: load the
//! embed page, let the page report ready, answer the state queries, and walk
//! through a state-change/quality/time sequence. Run with
//! `RUST_LOG=debug cargo run --example scripted_session` to watch the
//! command traffic.

use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use tubelink_bridge::testing::MockScriptHost;
use tubelink_bridge::{EmbedParameter, EmbedParameters, PlayerBridge, ScriptValue};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = Rc::new(MockScriptHost::new());
    let bridge = PlayerBridge::new(
        host.clone(),
        (1280, 720),
        EmbedParameters::from_list(&[
            EmbedParameter::VideoId("abc123".into()),
            EmbedParameter::Autoplay(true),
            EmbedParameter::Mute(true),
        ]),
    );

    bridge.set_listener(|event| println!("event: {:?}", event));
    bridge.load().expect("embed page config must serialize");

    // The page script comes up and reports ready; the bridge mutes, then
    // plays once the mute completion lands, then re-queries the mirror.
    bridge.handle_message("onReady", ScriptValue::Null);
    host.complete_matching("player.mute()", Ok(ScriptValue::Null));
    host.complete_matching("getDuration", Ok(ScriptValue::Float(631.0)));
    host.complete_matching("isMuted", Ok(ScriptValue::Bool(true)));
    host.complete_all(Ok(ScriptValue::Null));

    bridge.handle_message("onStateChange", ScriptValue::Int(1));
    bridge.handle_message("onQualityChange", ScriptValue::Str("hd1080".into()));
    bridge.handle_message("onUpdateCurrentTime", ScriptValue::Float(42.5));
    host.complete_all(Ok(ScriptValue::Null));

    println!("snapshot: {:#?}", bridge.snapshot());
    println!("statements issued:");
    for statement in host.statements() {
        println!("  {statement}");
    }
}
