//! Domain error types.

use thiserror::Error;

use super::value_object::{RoomId, SessionId, UserId};

/// Errors reported by the storage collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("user {user_id} is not a member of room {room_id}")]
    NotRoomMember { room_id: RoomId, user_id: UserId },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors delivering an outbound event to one session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("session '{0}' is not registered")]
    SessionNotFound(SessionId),

    #[error("transport of session '{0}' is closed")]
    ChannelClosed(SessionId),
}
