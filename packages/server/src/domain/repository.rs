//! ChatStorage trait 定義
//!
//! ルームとメッセージの永続化を担う外部コラボレータへのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 注意
//!
//! ストレージ上のルーム所属（ユーザー）と、`RoomRegistry` が管理するライブな
//! 購読（セッション）は別物です。オフラインのユーザーもストレージ上は所属し得ます。

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Message, MessageContent, RoomId, StorageError, UserId};

/// Chat storage trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
/// 呼び出しは中断（await）し得るため、`RoomRegistry` のロックを保持したまま呼んではならない。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatStorage: Send + Sync {
    /// 2 人のユーザーを所属させた新しいルームを作成し、採番されたルーム ID を返す
    async fn create_room(&self, user_ids: [UserId; 2]) -> Result<RoomId, StorageError>;

    /// 既存のルームにユーザーを追加する
    async fn add_user_to_room(&self, room_id: RoomId, user_id: UserId)
    -> Result<(), StorageError>;

    /// メッセージを永続化し、ID とタイムスタンプが採番されたメッセージを返す
    async fn create_message(
        &self,
        room_id: RoomId,
        sender_id: UserId,
        content: MessageContent,
    ) -> Result<Message, StorageError>;
}
