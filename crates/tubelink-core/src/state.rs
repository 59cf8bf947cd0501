//! Player state definitions
//!
//! Wire-code decoding for the embed protocol's state, quality, and error
//! enumerations, plus the `PlayerSnapshot` mirror.

use serde::{Deserialize, Serialize};

/// Playback state reported by the remote embed player.
///
/// Decoded from the integer codes the embed protocol posts on its
/// state-change channel. Unrecognized codes decode to [`PlayerState::Unstarted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    VideoCued,
}

impl PlayerState {
    /// Decode a wire code. Unknown codes map to `Unstarted`.
    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => PlayerState::Unstarted,
            0 => PlayerState::Ended,
            1 => PlayerState::Playing,
            2 => PlayerState::Paused,
            3 => PlayerState::Buffering,
            5 => PlayerState::VideoCued,
            _ => PlayerState::Unstarted,
        }
    }
}

/// Playback quality level reported by the remote embed player.
///
/// Unrecognized textual codes decode to [`VideoQuality::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    Small,
    Medium,
    Large,
    Hd720,
    Hd1080,
    HighRes,
    Auto,
    Unknown,
}

impl VideoQuality {
    /// Decode a textual wire code. `"default"` is an alias the embed service
    /// emits for auto quality; anything else unknown maps to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "small" => VideoQuality::Small,
            "medium" => VideoQuality::Medium,
            "large" => VideoQuality::Large,
            "hd720" => VideoQuality::Hd720,
            "hd1080" => VideoQuality::Hd1080,
            "highres" => VideoQuality::HighRes,
            "auto" | "default" => VideoQuality::Auto,
            _ => VideoQuality::Unknown,
        }
    }

    /// Wire name for outbound quality commands.
    pub fn name(&self) -> &'static str {
        match self {
            VideoQuality::Small => "small",
            VideoQuality::Medium => "medium",
            VideoQuality::Large => "large",
            VideoQuality::Hd720 => "hd720",
            VideoQuality::Hd1080 => "hd1080",
            VideoQuality::HighRes => "highres",
            VideoQuality::Auto => "auto",
            VideoQuality::Unknown => "unknown",
        }
    }
}

/// Error codes documented by the embed service.
///
/// Codes 101 and 150 both signal an embed that is not allowed to play in
/// embedded players; they decode to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerError {
    /// The request contained an invalid parameter value (code 2).
    InvalidParameter,
    /// The requested content cannot play in an HTML5 player (code 5).
    Html5Error,
    /// The requested video was not found (code 100).
    VideoNotFound,
    /// The content owner does not allow embedded playback (codes 101, 150).
    EmbedNotAllowed,
}

impl PlayerError {
    /// Decode a wire code. Unrecognized codes yield `None` and are dropped
    /// by the event decoder rather than surfaced with a default.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(PlayerError::InvalidParameter),
            5 => Some(PlayerError::Html5Error),
            100 => Some(PlayerError::VideoNotFound),
            101 | 150 => Some(PlayerError::EmbedNotAllowed),
            _ => None,
        }
    }
}

/// Last-known values reported by the remote embed player.
///
/// Fields mutate one at a time, each by its own query completion or by the
/// event decoder; a failed or type-mismatched query leaves its field
/// unchanged. The snapshot lives and dies with the owning bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub is_ready: bool,
    pub is_muted: bool,
    pub playback_rate: f64,
    pub available_rates: Vec<f64>,
    pub available_qualities: Vec<VideoQuality>,
    pub buffered_fraction: f64,
    pub playlist: Vec<String>,
    pub playlist_index: i64,
    pub video_url: Option<String>,
    pub embed_code: Option<String>,
    pub state: PlayerState,
    pub quality: VideoQuality,
    pub duration: Option<f64>,
    pub current_time: f64,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            is_ready: false,
            is_muted: false,
            playback_rate: 1.0,
            available_rates: Vec::new(),
            available_qualities: Vec::new(),
            buffered_fraction: 0.0,
            playlist: Vec::new(),
            playlist_index: 0,
            video_url: None,
            embed_code: None,
            state: PlayerState::Unstarted,
            quality: VideoQuality::Unknown,
            duration: None,
            current_time: 0.0,
        }
    }
}
