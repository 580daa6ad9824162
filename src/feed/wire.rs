// src/feed/wire.rs

//! Wire codec for the live feed.
//!
//! The feed speaks JSON text frames of the shape `["event", payload]`:
//!
//! - outbound: `["room", "globalmanage-recent-hashed"]` subscribes to the
//!   global moderation channel right after connecting
//! - inbound: `["newPost", { ...post... }]` announces a new post
//!
//! Anything else coming from the server (presence counts, other rooms) is
//! decoded as far as the envelope and then ignored.

use serde_json::{json, Value};

use crate::errors::{WatchError, WatchResult};
use crate::feed::post::Post;

/// Channel carrying all new posts visible to global staff.
pub const GLOBAL_MANAGE_ROOM: &str = "globalmanage-recent-hashed";

/// Outbound event name for room subscription.
pub const ROOM_EVENT: &str = "room";

/// Inbound event name announcing a new post.
pub const NEW_POST_EVENT: &str = "newPost";

/// Inbound application-level events the watcher reacts to.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    NewPost(Post),
}

/// Encode the room subscription frame sent right after connecting.
pub fn subscribe_frame() -> String {
    json!([ROOM_EVENT, GLOBAL_MANAGE_ROOM]).to_string()
}

/// Decode one inbound text frame.
///
/// Returns `Ok(None)` for well-formed frames carrying events we don't care
/// about. Returns `WatchError::Malformed` when the frame is not an
/// `["event", payload]` pair or a `newPost` payload does not parse as a
/// post; the caller treats that as fatal.
pub fn decode_frame(text: &str) -> WatchResult<Option<InboundEvent>> {
    let (event, payload): (String, Value) =
        serde_json::from_str(text).map_err(WatchError::malformed)?;

    match event.as_str() {
        NEW_POST_EVENT => {
            let post: Post = serde_json::from_value(payload).map_err(WatchError::malformed)?;
            Ok(Some(InboundEvent::NewPost(post)))
        }
        _ => Ok(None),
    }
}
