//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルームが作成され、作成したセッションだけが参加する
//! - 異常系：ストレージの失敗（Registry は変更されない）
//! - エッジケース：永続化中にセッションが切断された

use std::sync::Arc;

use crate::domain::{ChatStorage, RoomId, RoomRegistry, SessionId, UserId};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// ChatStorage（永続化の抽象化）
    storage: Arc<dyn ChatStorage>,
    /// RoomRegistry（ライブな所属の管理）
    registry: Arc<dyn RoomRegistry>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(storage: Arc<dyn ChatStorage>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self { storage, registry }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 作成を要求したセッション（このセッションだけがルームに参加する）
    /// * `initiator` - 作成を要求したユーザー
    /// * `target` - ルームに招待するユーザー
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 作成されたルームの ID
    /// * `Err(CreateRoomError)` - 作成失敗（Registry は変更されない）
    pub async fn execute(
        &self,
        session: SessionId,
        initiator: UserId,
        target: UserId,
    ) -> Result<RoomId, CreateRoomError> {
        // 1. ストレージにルームを作成（Registry のロックは保持しない）
        let room_id = self.storage.create_room([initiator, target]).await?;

        // 2. 作成したセッションをルームに参加させる
        if !self.registry.join(session, room_id) {
            return Err(CreateRoomError::SessionClosed(session));
        }

        Ok(room_id)
    }
}
