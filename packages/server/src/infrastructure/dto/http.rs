//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Live membership of one room (`GET /debug/rooms`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMembersDto {
    pub room_id: i64,
    /// Session names (`Client<N>`), ascending by session id
    pub sessions: Vec<String>,
}

/// Health check response (`GET /api/health`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

impl HealthDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
