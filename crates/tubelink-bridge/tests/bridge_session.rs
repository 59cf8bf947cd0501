//! End-to-end scripted sessions against the in-memory host.

use std::cell::RefCell;
use std::rc::Rc;
use tubelink_bridge::testing::MockScriptHost;
use tubelink_bridge::{
    EmbedParameter, EmbedParameters, EvalError, PlayerBridge, PlayerEvent, PlayerState,
    ScriptValue, VideoQuality,
};

fn event_sink(bridge: &PlayerBridge) -> Rc<RefCell<Vec<PlayerEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    bridge.set_listener(move |event| sink.borrow_mut().push(event));
    events
}

#[test]
fn test_load_renders_video_id_in_player_vars_and_top_level() {
    let host = Rc::new(MockScriptHost::new());
    let bridge = PlayerBridge::new(
        host.clone(),
        (640, 360),
        EmbedParameters::from_list(&[EmbedParameter::VideoId("abc123".into())]),
    );
    bridge.load().unwrap();

    let config = host.last_config().expect("page loaded");
    assert_eq!(config["playerVars"]["videoId"], "abc123");
    assert_eq!(config["videoId"], "abc123");
    assert_eq!(config["width"], "100%");
    assert_eq!(config["height"], "100%");
    assert_eq!(config["events"]["onStateChange"], "onStateChange");
}

#[test]
fn test_reload_renders_replaced_parameters() {
    let host = Rc::new(MockScriptHost::new());
    let bridge = PlayerBridge::new(host.clone(), (640, 360), EmbedParameters::new());
    bridge.load().unwrap();
    assert!(host.last_config().unwrap().get("videoId").is_none());

    bridge.set_parameters(&[
        EmbedParameter::VideoId("xyz789".into()),
        EmbedParameter::Loop(true),
    ]);
    bridge.load().unwrap();

    assert_eq!(host.loaded_configs().len(), 2);
    let config = host.last_config().unwrap();
    assert_eq!(config["videoId"], "xyz789");
    assert_eq!(config["playerVars"]["loop"], "1");
}

#[test]
fn test_muted_autoplay_session() {
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
    let events = event_sink(&bridge);
    bridge.load().unwrap();

    // Page script comes up and reports ready.
    bridge.handle_message("onReady", ScriptValue::Null);
    assert_eq!(events.borrow().as_slice(), &[PlayerEvent::Ready]);
    assert!(bridge.is_ready());

    // Mute confirmation arrives as the host toolkit's benign no-value
    // report; only then does the bridge start playback.
    assert!(host.complete_matching("player.mute()", Err(EvalError::UnsupportedResultType)));
    assert!(bridge.is_muted());
    assert!(host.statements().iter().any(|s| s == "player.playVideo();"));

    // The ready-triggered refresh lands piecemeal; unanswered queries leave
    // their fields at defaults.
    assert!(host.complete_matching("getDuration", Ok(ScriptValue::Float(631.0))));
    assert!(host.complete_matching(
        "getAvailablePlaybackRates",
        Ok(ScriptValue::FloatList(vec![0.5, 1.0, 1.5, 2.0]))
    ));
    assert!(host.complete_matching(
        "getPlaylist",
        Ok(ScriptValue::StrList(vec!["abc123".into(), "def456".into()]))
    ));
    assert!(host.complete_matching("getPlaylistIndex", Ok(ScriptValue::Int(0))));
    assert!(host.complete_matching(
        "getVideoUrl",
        Ok(ScriptValue::Str("https://example.test/watch?v=abc123".into()))
    ));

    let snap = bridge.snapshot();
    assert_eq!(snap.duration, Some(631.0));
    assert_eq!(snap.available_rates, vec![0.5, 1.0, 1.5, 2.0]);
    assert_eq!(snap.playlist, vec!["abc123".to_string(), "def456".to_string()]);
    assert_eq!(snap.playlist_index, 0);
    assert_eq!(
        snap.video_url.as_deref(),
        Some("https://example.test/watch?v=abc123")
    );
    assert_eq!(snap.buffered_fraction, 0.0);

    // Playback progresses.
    bridge.handle_message("onStateChange", ScriptValue::Int(1));
    bridge.handle_message("onQualityChange", ScriptValue::Str("hd1080".into()));
    bridge.handle_message("onUpdateCurrentTime", ScriptValue::Float(42.5));

    assert_eq!(bridge.state(), PlayerState::Playing);
    assert_eq!(bridge.quality(), VideoQuality::Hd1080);
    assert_eq!(bridge.current_time(), 42.5);

    let seen = events.borrow();
    assert_eq!(
        seen.as_slice(),
        &[
            PlayerEvent::Ready,
            PlayerEvent::StateChanged(PlayerState::Playing),
            PlayerEvent::QualityChanged(VideoQuality::Hd1080),
            PlayerEvent::CurrentTime(42.5),
        ]
    );
}

#[test]
fn test_looping_session_restarts_at_end() {
    let host = Rc::new(MockScriptHost::new());
    let bridge = PlayerBridge::new(
        host.clone(),
        (640, 360),
        EmbedParameters::from_list(&[
            EmbedParameter::VideoId("abc123".into()),
            EmbedParameter::Loop(true),
        ]),
    );
    let events = event_sink(&bridge);
    bridge.load().unwrap();

    bridge.handle_message("onStateChange", ScriptValue::Int(0));
    let plays = host
        .statements()
        .iter()
        .filter(|s| *s == "player.playVideo();")
        .count();
    assert_eq!(plays, 1);
    assert_eq!(
        events.borrow().as_slice(),
        &[PlayerEvent::StateChanged(PlayerState::Ended)]
    );
}

#[test]
fn test_out_of_order_completions_update_independent_fields() {
    let host = Rc::new(MockScriptHost::new());
    let bridge = PlayerBridge::new(host.clone(), (640, 360), EmbedParameters::new());
    bridge.handle_message("onReady", ScriptValue::Null);

    // Completions arrive in reverse issuance order; each field still lands.
    assert!(host.complete_matching("getVideoLoadedFraction", Ok(ScriptValue::Float(0.25))));
    assert!(host.complete_matching("isMuted", Ok(ScriptValue::Bool(true))));
    assert_eq!(bridge.buffered_fraction(), 0.25);
    assert!(bridge.is_muted());

    // A failed query afterwards does not roll anything back.
    assert!(host.complete_matching("getDuration", Err(EvalError::Failed("gone".into()))));
    assert_eq!(bridge.duration(), None);
}
