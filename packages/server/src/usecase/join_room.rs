//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加後の通知対象（参加したセッション自身は含まない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加と通知対象の算出
//! - 異常系：ストレージの失敗（Registry は変更されない）
//! - エッジケース：既に参加済みのルームへの再参加

use std::sync::Arc;

use crate::domain::{ChatStorage, RoomId, RoomRegistry, SessionId, UserId};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// ChatStorage（永続化の抽象化）
    storage: Arc<dyn ChatStorage>,
    /// RoomRegistry（ライブな所属の管理）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(storage: Arc<dyn ChatStorage>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self { storage, registry }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 参加を通知する対象（参加後のメンバーから自身を除いたもの）
    /// * `Err(JoinRoomError)` - 参加失敗（Registry は変更されない）
    pub async fn execute(
        &self,
        session: SessionId,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Vec<SessionId>, JoinRoomError> {
        // 1. ストレージ上のルームにユーザーを追加
        self.storage.add_user_to_room(room_id, user_id).await?;

        // 2. セッションをルームに参加させる
        if !self.registry.join(session, room_id) {
            return Err(JoinRoomError::SessionClosed(session));
        }

        // 3. 参加後のメンバーから自身を除いたものが通知対象
        Ok(self.get_notify_targets(session, room_id))
    }

    fn get_notify_targets(&self, session: SessionId, room_id: RoomId) -> Vec<SessionId> {
        self.registry
            .members_of(room_id)
            .into_iter()
            .filter(|member| *member != session)
            .collect()
    }
}
