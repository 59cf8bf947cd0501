//! Message channels and typed player events
//!
//! The embed page posts messages on a fixed, closed set of named channels.
//! The decoder maps each (channel, payload) pair to a typed [`PlayerEvent`]
//! delivered to the registered listener; unrecognized channel names are
//! dropped without dispatch.

use tubelink_core::{PlayerError, PlayerState, VideoQuality};

/// The nine message channels the embed page posts on.
///
/// All of them must be registered with the script host before the page
/// loads; channels added afterwards are invisible to the page script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    Ready,
    StateChange,
    QualityChange,
    Error,
    UpdateCurrentTime,
    PlaybackRateChange,
    ApiChange,
    IframeApiReady,
    IframeApiFailedToLoad,
}

impl Channel {
    pub(crate) const ALL_NAMES: [&'static str; 9] = [
        "onReady",
        "onStateChange",
        "onQualityChange",
        "onError",
        "onUpdateCurrentTime",
        "onPlaybackRateChange",
        "onApiChange",
        "onIframeAPIReady",
        "onIframeAPIFailedToLoad",
    ];

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "onReady" => Some(Channel::Ready),
            "onStateChange" => Some(Channel::StateChange),
            "onQualityChange" => Some(Channel::QualityChange),
            "onError" => Some(Channel::Error),
            "onUpdateCurrentTime" => Some(Channel::UpdateCurrentTime),
            "onPlaybackRateChange" => Some(Channel::PlaybackRateChange),
            "onApiChange" => Some(Channel::ApiChange),
            "onIframeAPIReady" => Some(Channel::IframeApiReady),
            "onIframeAPIFailedToLoad" => Some(Channel::IframeApiFailedToLoad),
            _ => None,
        }
    }
}

/// Typed event delivered to the bridge's listener.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The embed player finished initializing.
    Ready,
    /// Playback state changed.
    StateChanged(PlayerState),
    /// Playback quality changed.
    QualityChanged(VideoQuality),
    /// The embed service reported a documented error code.
    Error(PlayerError),
    /// Periodic playback-position report, in seconds.
    CurrentTime(f64),
    /// Playback rate changed. Does not itself mutate the mirror.
    PlaybackRateChanged(f64),
    /// The page's scripting API surface changed.
    ApiChanged,
    /// The iframe API finished loading in the page.
    IframeReady,
    /// The iframe API failed to load in the page.
    IframeLoadFailed,
}
