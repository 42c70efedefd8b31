//! Domain layer: value objects, entities and the interfaces the relay depends on.
//!
//! - `registry`: live session ↔ room membership index
//! - `repository`: persistence of rooms and messages (external collaborator)
//! - `message_pusher`: outbound delivery to sessions (external collaborator)

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::Message;
pub use error::{MessagePushError, StorageError};
pub use factory::SessionIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::RoomRegistry;
pub use repository::ChatStorage;
pub use value_object::{MessageContent, MessageId, RoomId, SessionId, Timestamp, UserId};

#[cfg(test)]
pub use repository::MockChatStorage;
