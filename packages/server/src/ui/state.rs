//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::GetRoomMembersUseCase;

use super::router::SessionRouter;

/// Shared application state
pub struct AppState {
    /// SessionRouter（セッションごとのイベント処理）
    pub router: Arc<SessionRouter>,
    /// GetRoomMembersUseCase（所属状況取得のユースケース）
    pub get_room_members_usecase: Arc<GetRoomMembersUseCase>,
}
