//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 配信対象（送信者を含むルームの全メンバー）
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージの永続化と配信対象の算出
//! - 異常系：ストレージの失敗
//! - エッジケース：ルームにライブなセッションがいない

use std::sync::Arc;

use crate::domain::{ChatStorage, Message, MessageContent, RoomId, RoomRegistry, SessionId, UserId};

use super::error::SendMessageError;

/// 永続化されたメッセージと配信対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub message: Message,
    pub recipients: Vec<SessionId>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// ChatStorage（永続化の抽象化）
    storage: Arc<dyn ChatStorage>,
    /// RoomRegistry（ライブな所属の管理）
    registry: Arc<dyn RoomRegistry>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(storage: Arc<dyn ChatStorage>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self { storage, registry }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender_id` - メッセージ送信者のユーザー ID
    /// * `room_id` - 送信先のルーム
    /// * `content` - メッセージ内容（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(SentMessage)` - 永続化されたメッセージと、送信者を含むルームの全メンバー
    /// * `Err(SendMessageError)` - 永続化失敗
    pub async fn execute(
        &self,
        sender_id: UserId,
        room_id: RoomId,
        content: MessageContent,
    ) -> Result<SentMessage, SendMessageError> {
        // 1. ストレージにメッセージを永続化
        let message = self
            .storage
            .create_message(room_id, sender_id, content)
            .await?;

        // 2. 配信対象はルームの全メンバー（送信者自身も含む）
        let recipients = self.registry.members_of(room_id);

        Ok(SentMessage {
            message,
            recipients,
        })
    }
}
