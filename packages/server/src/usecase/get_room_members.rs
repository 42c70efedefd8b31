//! UseCase: ライブな所属状況の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, SessionId};

/// 所属状況取得のユースケース
pub struct GetRoomMembersUseCase {
    /// RoomRegistry（ライブな所属の管理）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomMembersUseCase {
    /// 新しい GetRoomMembersUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 全ルームのメンバー一覧を取得（ルーム ID 昇順）
    pub fn execute(&self) -> Vec<(RoomId, Vec<SessionId>)> {
        self.registry.snapshot()
    }
}
