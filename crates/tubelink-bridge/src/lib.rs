//! TubeLink Bridge - Native Control and Event API for the Embed Player
//!
//! This crate wraps an embeddable web player surface:
//! - [`PlayerBridge`] exposes the native control API and the single
//!   event-listener registration point
//! - the command encoder turns typed calls into `player.<method>(…);`
//!   script statements, evaluated through the [`ScriptHost`] seam
//! - the event decoder maps named channel messages back into typed
//!   [`PlayerEvent`]s and `PlayerSnapshot` updates
//!
//! ## Quick start
//!
//! ```rust
//! use std::rc::Rc;
//! use tubelink_bridge::testing::MockScriptHost;
//! use tubelink_bridge::{EmbedParameter, PlayerBridge};
//!
//! let host = Rc::new(MockScriptHost::new());
//! let bridge = PlayerBridge::new(
//!     host.clone(),
//!     (640, 360),
//!     tubelink_bridge::EmbedParameters::from_list(&[
//!         EmbedParameter::VideoId("abc123".into()),
//!     ]),
//! );
//! bridge.load().unwrap();
//! bridge.play();
//! assert_eq!(host.statements(), vec!["player.playVideo();"]);
//! ```
//!
//! ## Modules
//!
//! - [`bridge`] - the bridge host
//! - [`events`] - channel names and typed events
//! - [`script`] - script host seam, values, evaluation errors
//! - [`error`] - error types
//! - [`testing`] - in-memory script host for tests and demos

pub mod bridge;
pub mod error;
pub mod events;
pub mod script;
pub mod testing;

mod command;
mod page;

pub use bridge::PlayerBridge;
pub use error::{BridgeError, Result};
pub use events::PlayerEvent;
pub use script::{command_succeeded, EvalCompletion, EvalError, EvalResult, ScriptHost, ScriptValue};

// Data-model re-exports for downstream convenience.
pub use tubelink_core::{
    EmbedParameter, EmbedParameters, PlayerError, PlayerSnapshot, PlayerState, VideoQuality,
};
