//! Domain layer for the whiteboard server.
//!
//! This module contains business types and the interfaces (repositories,
//! message pusher) that the use cases depend on. It is independent of
//! DTOs and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, DrawEvent, Invite, Room, RoomOwner, SYSTEM_OWNER_NAME};
pub use error::{MessagePushError, PresenceError, RepositoryError, ValueObjectError};
pub use event::{ClientRequest, ServerEvent};
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::{PresenceRegistry, RoomRepository};
pub use value_object::{
    ConnectionId, DrawKind, MessageContent, Point, RoomId, StrokeColor, StrokeSize, Timestamp,
    Tool, UserName,
};

#[cfg(test)]
pub use pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockPresenceRegistry;
