//! Bridge host
//!
//! `PlayerBridge` owns the command encoder and event decoder: it exposes the
//! native control API, relays inbound channel messages as typed events, and
//! keeps the `PlayerSnapshot` mirror in sync via asynchronous queries.
//!
//! Everything runs on one cooperative thread. Completion callbacks capture
//! only `Weak` references back to the bridge's state, so a pending completion
//! that fires after the bridge is torn down is a no-op rather than a cycle.

use crate::command::{self, Arg};
use crate::error::Result;
use crate::events::{Channel, PlayerEvent};
use crate::page;
use crate::script::{command_succeeded, ScriptHost, ScriptValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};
use tubelink_core::{EmbedParameter, EmbedParameters, PlayerSnapshot, PlayerState, VideoQuality};

type Listener = Box<dyn FnMut(PlayerEvent)>;

/// Native-side bridge for one embedded player surface.
///
/// Commands are fire-and-forget: they complete on a later turn of the event
/// loop and their failures are swallowed (logged at debug). Callers must not
/// assume a command's effect is visible before its completion fires, and the
/// snapshot is a cache of last reported values, never authoritative.
pub struct PlayerBridge {
    host: Rc<dyn ScriptHost>,
    state: Rc<RefCell<PlayerSnapshot>>,
    params: RefCell<EmbedParameters>,
    /// Single listener slot; re-registering replaces the previous listener.
    listener: RefCell<Option<Listener>>,
    /// Bumped on every set/clear so dispatch can tell whether the callback
    /// touched the slot while it held the listener.
    listener_generation: Cell<u64>,
    size: Cell<(u32, u32)>,
}

impl PlayerBridge {
    /// Create a bridge and register its message channels with the host.
    ///
    /// Channel registration is irreversible setup: the embed page only posts
    /// to channels present at load time, so all nine are registered here,
    /// before any [`load`](Self::load).
    pub fn new(host: Rc<dyn ScriptHost>, size: (u32, u32), params: EmbedParameters) -> Self {
        for name in Channel::ALL_NAMES {
            host.add_message_channel(name);
        }
        Self {
            host,
            state: Rc::new(RefCell::new(PlayerSnapshot::default())),
            params: RefCell::new(params),
            listener: RefCell::new(None),
            listener_generation: Cell::new(0),
            size: Cell::new(size),
        }
    }

    // === Lifecycle ===

    /// Render and load the embed page from the current parameters.
    ///
    /// Calling this again reloads the page fully. The only error paths are
    /// config serialization (malformed caller-supplied parameters) and the
    /// host refusing the page; both abort the load.
    pub fn load(&self) -> Result<()> {
        let config = page::render_player_config(&self.params.borrow())?;
        info!("loading embed page");
        self.host.load_embed_page(&config)
    }

    // === Event subscription ===

    /// Register the listener receiving all dispatched events. A single slot:
    /// re-registering replaces the previous listener.
    pub fn set_listener<F: FnMut(PlayerEvent) + 'static>(&self, listener: F) {
        self.listener_generation.set(self.listener_generation.get() + 1);
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn clear_listener(&self) {
        self.listener_generation.set(self.listener_generation.get() + 1);
        *self.listener.borrow_mut() = None;
    }

    // === Parameters ===

    /// Replace the embed parameters with a raw mapping.
    pub fn set_raw_parameters(&self, params: EmbedParameters) {
        *self.params.borrow_mut() = params;
    }

    /// Rebuild the embed parameters from a typed list. Fully replaces any
    /// previously set mapping; it does not merge.
    pub fn set_parameters(&self, params: &[EmbedParameter]) {
        *self.params.borrow_mut() = EmbedParameters::from_list(params);
    }

    pub fn parameters(&self) -> EmbedParameters {
        self.params.borrow().clone()
    }

    // === Transport controls ===

    pub fn play(&self) {
        self.issue(command::call("playVideo", &[]));
    }

    pub fn pause(&self) {
        self.issue(command::call("pauseVideo", &[]));
    }

    pub fn stop(&self) {
        self.issue(command::call("stopVideo", &[]));
    }

    pub fn clear(&self) {
        self.issue(command::call("clearVideo", &[]));
    }

    /// Seek to a position in seconds. `allow_seek_ahead` permits seeking
    /// beyond the buffered range (triggering a new request in the player).
    pub fn seek(&self, seconds: f64, allow_seek_ahead: bool) {
        self.issue(command::call(
            "seekTo",
            &[Arg::Float(seconds), Arg::Bool(allow_seek_ahead)],
        ));
    }

    pub fn previous_video(&self) {
        self.issue(command::call("previousVideo", &[]));
    }

    pub fn next_video(&self) {
        self.issue(command::call("nextVideo", &[]));
    }

    pub fn play_video_at(&self, index: i64) {
        self.issue(command::call("playVideoAt", &[Arg::Int(index)]));
    }

    // === Mute / unmute ===

    /// Issue the mute command; on confirmed success (including the benign
    /// no-value report) the mirror's mute flag is set. On any other error
    /// the mirror is left stale and no event is raised.
    pub fn mute(&self) {
        self.send_mute_command(true);
    }

    /// Unmute counterpart of [`mute`](Self::mute), same confirmation rule.
    pub fn unmute(&self) {
        self.send_mute_command(false);
    }

    fn send_mute_command(&self, muted: bool) {
        let method = if muted { "mute" } else { "unMute" };
        let statement = command::call(method, &[]);
        debug!(statement = %statement, "issuing player command");
        let state = Rc::downgrade(&self.state);
        self.host.evaluate(
            &statement,
            Some(Box::new(move |result| {
                if command_succeeded(&result) {
                    if let Some(state) = state.upgrade() {
                        state.borrow_mut().is_muted = muted;
                    }
                } else {
                    debug!(method, "mute command failed; mirror left stale");
                }
            })),
        );
    }

    // === Configuration commands ===

    pub fn set_size(&self, width: u32, height: u32) {
        self.size.set((width, height));
        self.issue(command::call(
            "setSize",
            &[Arg::Int(width as i64), Arg::Int(height as i64)],
        ));
    }

    pub fn size(&self) -> (u32, u32) {
        self.size.get()
    }

    /// No local validation against `available_rates`; that is the caller's
    /// responsibility.
    pub fn set_playback_rate(&self, rate: f64) {
        self.issue(command::call("setPlaybackRate", &[Arg::Float(rate)]));
    }

    pub fn set_playback_quality(&self, quality: VideoQuality) {
        self.issue(command::call(
            "setPlaybackQuality",
            &[Arg::Str(quality.name())],
        ));
    }

    pub fn set_loop(&self, loop_playlists: bool) {
        self.issue(command::call("setLoop", &[Arg::Bool(loop_playlists)]));
    }

    pub fn set_shuffle(&self, shuffle: bool) {
        self.issue(command::call("setShuffle", &[Arg::Bool(shuffle)]));
    }

    // === Content loading ===

    /// Cue a video by id: prepares without playing.
    pub fn cue_video_by_id(&self, video_id: &str, start_seconds: f64, quality: VideoQuality) {
        self.issue(command::call(
            "cueVideoById",
            &[
                Arg::Str(video_id),
                Arg::Float(start_seconds),
                Arg::Str(quality.name()),
            ],
        ));
    }

    /// Load a video by id: prepares and plays.
    pub fn load_video_by_id(&self, video_id: &str, start_seconds: f64, quality: VideoQuality) {
        self.issue(command::call(
            "loadVideoById",
            &[
                Arg::Str(video_id),
                Arg::Float(start_seconds),
                Arg::Str(quality.name()),
            ],
        ));
    }

    pub fn cue_video_by_url(&self, url: &str, start_seconds: f64, quality: VideoQuality) {
        self.issue(command::call(
            "cueVideoByUrl",
            &[
                Arg::Str(url),
                Arg::Float(start_seconds),
                Arg::Str(quality.name()),
            ],
        ));
    }

    pub fn load_video_by_url(&self, url: &str, start_seconds: f64, quality: VideoQuality) {
        self.issue(command::call(
            "loadVideoByUrl",
            &[
                Arg::Str(url),
                Arg::Float(start_seconds),
                Arg::Str(quality.name()),
            ],
        ));
    }

    pub fn cue_playlist(
        &self,
        video_ids: &[String],
        index: i64,
        start_seconds: f64,
        quality: VideoQuality,
    ) {
        self.issue(command::call(
            "cuePlaylist",
            &[
                Arg::StrList(video_ids),
                Arg::Int(index),
                Arg::Float(start_seconds),
                Arg::Str(quality.name()),
            ],
        ));
    }

    pub fn load_playlist(
        &self,
        video_ids: &[String],
        index: i64,
        start_seconds: f64,
        quality: VideoQuality,
    ) {
        self.issue(command::call(
            "loadPlaylist",
            &[
                Arg::StrList(video_ids),
                Arg::Int(index),
                Arg::Float(start_seconds),
                Arg::Str(quality.name()),
            ],
        ));
    }

    /// Replace the cued playlist with the given ids, nothing else.
    pub fn cue_playlist_ids(&self, video_ids: &[String]) {
        self.issue(command::call("cuePlaylist", &[Arg::StrList(video_ids)]));
    }

    pub fn load_playlist_ids(&self, video_ids: &[String]) {
        self.issue(command::call("loadPlaylist", &[Arg::StrList(video_ids)]));
    }

    // === Read-only mirror access ===

    /// Clone of the full mirror.
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready
    }

    pub fn is_muted(&self) -> bool {
        self.state.borrow().is_muted
    }

    pub fn playback_rate(&self) -> f64 {
        self.state.borrow().playback_rate
    }

    pub fn available_rates(&self) -> Vec<f64> {
        self.state.borrow().available_rates.clone()
    }

    pub fn available_qualities(&self) -> Vec<VideoQuality> {
        self.state.borrow().available_qualities.clone()
    }

    pub fn buffered_fraction(&self) -> f64 {
        self.state.borrow().buffered_fraction
    }

    pub fn playlist(&self) -> Vec<String> {
        self.state.borrow().playlist.clone()
    }

    pub fn playlist_index(&self) -> i64 {
        self.state.borrow().playlist_index
    }

    pub fn video_url(&self) -> Option<String> {
        self.state.borrow().video_url.clone()
    }

    pub fn embed_code(&self) -> Option<String> {
        self.state.borrow().embed_code.clone()
    }

    pub fn state(&self) -> PlayerState {
        self.state.borrow().state
    }

    pub fn quality(&self) -> VideoQuality {
        self.state.borrow().quality
    }

    pub fn duration(&self) -> Option<f64> {
        self.state.borrow().duration
    }

    pub fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    // === Inbound: event decoding ===

    /// Decode one inbound channel message. Unrecognized channel names are
    /// dropped without dispatch.
    pub fn handle_message(&self, channel: &str, payload: ScriptValue) {
        let Some(channel) = Channel::from_name(channel) else {
            debug!(channel, "ignoring message on unknown channel");
            return;
        };
        match channel {
            Channel::Ready => self.on_ready(),
            Channel::StateChange => self.on_state_change(&payload),
            Channel::QualityChange => self.on_quality_change(&payload),
            Channel::Error => self.on_error(&payload),
            Channel::UpdateCurrentTime => self.on_update_current_time(&payload),
            Channel::PlaybackRateChange => self.on_playback_rate_change(&payload),
            Channel::ApiChange => self.dispatch(PlayerEvent::ApiChanged),
            Channel::IframeApiReady => self.dispatch(PlayerEvent::IframeReady),
            Channel::IframeApiFailedToLoad => self.dispatch(PlayerEvent::IframeLoadFailed),
        }
    }

    fn on_ready(&self) {
        self.state.borrow_mut().is_ready = true;

        let (autoplay, automute) = {
            let params = self.params.borrow();
            (params.autoplay_requested(), params.automute_requested())
        };
        match (autoplay, automute) {
            (true, true) => self.mute_then_play(),
            (false, true) => self.mute(),
            (true, false) => self.play(),
            (false, false) => {}
        }

        self.refresh_state();
        self.dispatch(PlayerEvent::Ready);
    }

    /// Autoplay while muted: the play command is issued only once the mute
    /// completion confirms success (or the benign no-value report). A hard
    /// mute failure swallows the play.
    fn mute_then_play(&self) {
        let statement = command::call("mute", &[]);
        debug!(statement = %statement, "issuing player command");
        let state = Rc::downgrade(&self.state);
        let host = Rc::downgrade(&self.host);
        self.host.evaluate(
            &statement,
            Some(Box::new(move |result| {
                if !command_succeeded(&result) {
                    debug!("mute before autoplay failed; play withheld");
                    return;
                }
                // Gate on the mirror still being alive: a torn-down bridge
                // must not keep driving the page.
                let Some(state) = state.upgrade() else { return };
                state.borrow_mut().is_muted = true;
                if let Some(host) = host.upgrade() {
                    issue_on(&*host, command::call("playVideo", &[]));
                }
            })),
        );
    }

    fn on_state_change(&self, payload: &ScriptValue) {
        let state = payload
            .as_i64()
            .map(PlayerState::from_code)
            .unwrap_or(PlayerState::Unstarted);
        self.state.borrow_mut().state = state;

        if state == PlayerState::Ended && self.params.borrow().loop_requested() {
            self.play();
        }
        self.dispatch(PlayerEvent::StateChanged(state));
    }

    fn on_quality_change(&self, payload: &ScriptValue) {
        let quality = payload
            .as_str()
            .map(VideoQuality::from_name)
            .unwrap_or(VideoQuality::Unknown);
        self.state.borrow_mut().quality = quality;
        self.dispatch(PlayerEvent::QualityChanged(quality));
    }

    fn on_error(&self, payload: &ScriptValue) {
        match payload.as_i64().and_then(tubelink_core::PlayerError::from_code) {
            Some(error) => self.dispatch(PlayerEvent::Error(error)),
            // Unrecognized codes carry no default; they are dropped.
            None => debug!(?payload, "dropping unrecognized player error code"),
        }
    }

    fn on_update_current_time(&self, payload: &ScriptValue) {
        self.refresh_state();
        if let Some(seconds) = payload.as_f64() {
            self.state.borrow_mut().current_time = seconds;
            self.dispatch(PlayerEvent::CurrentTime(seconds));
        }
    }

    fn on_playback_rate_change(&self, payload: &ScriptValue) {
        // Dispatch only; the mirror's rate refreshes via re-query instead.
        if let Some(rate) = payload.as_f64() {
            self.dispatch(PlayerEvent::PlaybackRateChanged(rate));
        }
    }

    // === State refresh ===

    /// Re-query every mirrored field. Each query updates only its own field
    /// on a type-compatible success; partial refresh is expected.
    fn refresh_state(&self) {
        self.query("isMuted", |value, snap| {
            if let Some(muted) = value.as_bool() {
                snap.is_muted = muted;
            }
        });
        self.query("getPlaybackRate", |value, snap| {
            if let Some(rate) = value.as_f64() {
                snap.playback_rate = rate;
            }
        });
        self.query("getAvailablePlaybackRates", |value, snap| {
            if let Some(rates) = value.as_f64_list() {
                snap.available_rates = rates.to_vec();
            }
        });
        self.query("getAvailableQualityLevels", |value, snap| {
            if let Some(names) = value.as_str_list() {
                snap.available_qualities = names
                    .iter()
                    .map(|name| VideoQuality::from_name(name))
                    .collect();
            }
        });
        self.query("getPlaylist", |value, snap| {
            if let Some(ids) = value.as_str_list() {
                snap.playlist = ids.to_vec();
            }
        });
        self.query("getPlaylistIndex", |value, snap| {
            if let Some(index) = value.as_i64() {
                snap.playlist_index = index;
            }
        });
        self.query("getVideoUrl", |value, snap| {
            if let Some(url) = value.as_str() {
                snap.video_url = Some(url.to_string());
            }
        });
        self.query("getVideoEmbedCode", |value, snap| {
            if let Some(code) = value.as_str() {
                snap.embed_code = Some(code.to_string());
            }
        });
        self.query("getDuration", |value, snap| {
            if let Some(duration) = value.as_f64() {
                snap.duration = Some(duration);
            }
        });
        self.query("getVideoLoadedFraction", |value, snap| {
            if let Some(fraction) = value.as_f64() {
                snap.buffered_fraction = fraction;
            }
        });
    }

    /// One best-effort query. Evaluation failure or a decode mismatch inside
    /// `apply` leaves the field stale; no retry, no event.
    fn query<F>(&self, method: &'static str, apply: F)
    where
        F: FnOnce(&ScriptValue, &mut PlayerSnapshot) + 'static,
    {
        let state = Rc::downgrade(&self.state);
        self.host.evaluate(
            &command::call(method, &[]),
            Some(Box::new(move |result| match result {
                Ok(value) => {
                    if let Some(state) = state.upgrade() {
                        apply(&value, &mut state.borrow_mut());
                    }
                }
                Err(error) => {
                    debug!(method, %error, "state query failed; field left stale");
                }
            })),
        );
    }

    // === Internals ===

    fn issue(&self, statement: String) {
        issue_on(&*self.host, statement);
    }

    fn dispatch(&self, event: PlayerEvent) {
        // Take the listener out before invoking it so the slot stays
        // replaceable from inside the callback. Restore it afterwards only
        // if the callback left the slot untouched: a set_listener or
        // clear_listener made during the callback wins.
        let listener = self.listener.borrow_mut().take();
        let generation = self.listener_generation.get();
        if let Some(mut listener) = listener {
            listener(event);
            if self.listener_generation.get() == generation {
                *self.listener.borrow_mut() = Some(listener);
            }
        }
    }
}

/// Fire-and-forget evaluation: failures are swallowed, benign no-value
/// reports are expected, anything else gets a debug line.
fn issue_on(host: &dyn ScriptHost, statement: String) {
    debug!(statement = %statement, "issuing player command");
    let logged = statement.clone();
    host.evaluate(
        &statement,
        Some(Box::new(move |result| {
            if let Err(error) = &result {
                if !error.is_benign_no_value() {
                    debug!(statement = %logged, %error, "player command failed");
                }
            }
        })),
    );
}
