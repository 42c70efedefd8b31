//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, RoomMembersDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto::ok())
}

/// Debug endpoint listing the live sessions of every room
pub async fn debug_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomMembersDto>> {
    let rooms = state
        .get_room_members_usecase
        .execute()
        .into_iter()
        .map(RoomMembersDto::from)
        .collect();
    Json(rooms)
}
