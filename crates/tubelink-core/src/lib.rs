//! TubeLink Core - Data Model for the Embed Player Bridge
//!
//! This crate defines the types shared between the bridge and its hosts:
//! - Player state, quality, and error enumerations with their wire codes
//! - The `PlayerSnapshot` mirror of the remote player's last reported values
//! - Embed parameters (player vars), raw and typed forms
//!
//! The snapshot is never authoritative: it caches what the remote embed last
//! reported and may be stale between an event and the completion of the
//! asynchronous re-query it triggers.

pub mod params;
pub mod state;

pub use params::{EmbedParameter, EmbedParameters};
pub use state::{PlayerError, PlayerSnapshot, PlayerState, VideoQuality};
