//! WebSocket message DTOs.
//!
//! Every frame, in both directions, is a JSON object `{"type": ..., "data": {...}}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Inbound frame before its `type` is resolved
#[derive(Debug, Deserialize)]
struct RawClientEvent {
    r#type: String,
    #[serde(default)]
    data: Value,
}

/// `createRoom` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    pub user_id: i64,
    pub target_user_id: i64,
}

/// `joinRoom` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub user_id: i64,
    pub room_id: i64,
}

/// `sendMessage` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub user_id: i64,
    pub room_id: i64,
    pub message: String,
}

/// Event sent by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    CreateRoom(CreateRoomPayload),
    JoinRoom(JoinRoomPayload),
    SendMessage(SendMessagePayload),
}

/// Reasons an inbound frame is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventParseError {
    #[error("malformed event frame: {0}")]
    MalformedFrame(String),

    #[error("unknown event type '{0}'")]
    UnknownType(String),

    #[error("invalid payload for '{event_type}': {reason}")]
    InvalidPayload { event_type: String, reason: String },
}

impl EventParseError {
    /// Text of the `error` event sent back to the client
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MalformedFrame(_) => "Invalid message format",
            Self::UnknownType(_) => "Invalid message type",
            Self::InvalidPayload { .. } => "Invalid message payload",
        }
    }
}

impl ClientEvent {
    pub const CREATE_ROOM: &'static str = "createRoom";
    pub const JOIN_ROOM: &'static str = "joinRoom";
    pub const SEND_MESSAGE: &'static str = "sendMessage";

    /// Parse one text frame
    pub fn parse(text: &str) -> Result<Self, EventParseError> {
        let raw: RawClientEvent = serde_json::from_str(text)
            .map_err(|e| EventParseError::MalformedFrame(e.to_string()))?;

        match raw.r#type.as_str() {
            Self::CREATE_ROOM => payload(&raw).map(Self::CreateRoom),
            Self::JOIN_ROOM => payload(&raw).map(Self::JoinRoom),
            Self::SEND_MESSAGE => payload(&raw).map(Self::SendMessage),
            _ => Err(EventParseError::UnknownType(raw.r#type)),
        }
    }

    /// Wire name of the event type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CreateRoom(_) => Self::CREATE_ROOM,
            Self::JoinRoom(_) => Self::JOIN_ROOM,
            Self::SendMessage(_) => Self::SEND_MESSAGE,
        }
    }
}

fn payload<T: for<'de> Deserialize<'de>>(raw: &RawClientEvent) -> Result<T, EventParseError> {
    T::deserialize(&raw.data).map_err(|e| EventParseError::InvalidPayload {
        event_type: raw.r#type.clone(),
        reason: e.to_string(),
    })
}

/// Payload carrying only a room id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRef {
    pub room_id: i64,
}

/// Human-readable notice about a room (join / disconnect)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomNotice {
    pub room_id: i64,
    pub message: String,
}

/// Persisted message as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    pub content: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

/// `newMessage` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessagePayload {
    pub room_id: i64,
    pub message: MessageDto,
}

/// `error` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Event sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    RoomCreated(RoomRef),
    RoomJoined(RoomRef),
    NewClientJoined(RoomNotice),
    NewMessage(NewMessagePayload),
    ClientDisconnected(RoomNotice),
    Error(ErrorPayload),
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            message: message.into(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
