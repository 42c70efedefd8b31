//! Entities

use super::value_object::{MessageContent, MessageId, RoomId, Timestamp, UserId};

/// A message as persisted by storage
///
/// Created once by `ChatStorage::create_message` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub content: MessageContent,
    pub created_at: Timestamp,
}

impl Message {
    pub fn new(
        id: MessageId,
        room_id: RoomId,
        sender_id: UserId,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            room_id,
            sender_id,
            content,
            created_at,
        }
    }
}
