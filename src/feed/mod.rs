// src/feed/mod.rs

//! Data model and transport glue for the moderation backend.
//!
//! This module is responsible for:
//! - The read-only `Post` / `Report` shapes produced by the backend.
//! - The live-feed wire codec (`["event", payload]` frames).
//! - The authenticated `Session` used for both the websocket feed and the
//!   polled reports endpoint.
//!
//! It does **not** decide what is alert-worthy or how alerts are delivered;
//! that lives in `crate::alert` and `crate::watch`.

pub mod post;
pub mod session;
pub mod wire;

pub use post::{Post, Report, ReportsPayload};
pub use session::Session;
pub use wire::{InboundEvent, GLOBAL_MANAGE_ROOM, NEW_POST_EVENT, ROOM_EVENT};
