//! Conversion logic between DTOs and domain entities.

use chatrelay_shared::time::timestamp_to_rfc3339;

use crate::domain::{Message, RoomId, SessionId};
use crate::infrastructure::dto::{http::RoomMembersDto, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Message> for dto::MessageDto {
    fn from(model: &Message) -> Self {
        Self {
            id: model.id.value(),
            room_id: model.room_id.value(),
            sender_id: model.sender_id.value(),
            content: model.content.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&Message> for dto::ServerEvent {
    fn from(model: &Message) -> Self {
        Self::NewMessage(dto::NewMessagePayload {
            room_id: model.room_id.value(),
            message: model.into(),
        })
    }
}

impl From<(RoomId, Vec<SessionId>)> for RoomMembersDto {
    fn from((room_id, sessions): (RoomId, Vec<SessionId>)) -> Self {
        Self {
            room_id: room_id.value(),
            sessions: sessions.iter().map(ToString::to_string).collect(),
        }
    }
}
