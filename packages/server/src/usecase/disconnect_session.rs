//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::notify_targets() / execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 通知対象は unregister の前に取得する必要がある（unregister 後は所属が消えている）
//! - 切断後、セッションがどのルームにも残らないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに参加していたセッションの切断
//! - エッジケース：どのルームにも参加していないセッション、最後のメンバーの切断

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, RoomRegistry, SessionId};

/// 切断を通知するルームとその通知対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomNotifyTargets {
    pub room_id: RoomId,
    pub targets: Vec<SessionId>,
}

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// RoomRegistry（ライブな所属の管理）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 切断を通知する対象をルームごとに取得する
    ///
    /// `execute` より前に呼ぶこと。セッションが参加しているルームのスナップショットを取り、
    /// 各ルームの自身以外のメンバーを返す。
    pub fn notify_targets(&self, session: SessionId) -> Vec<RoomNotifyTargets> {
        self.registry
            .rooms_of(session)
            .into_iter()
            .map(|room_id| RoomNotifyTargets {
                room_id,
                targets: self
                    .registry
                    .members_of(room_id)
                    .into_iter()
                    .filter(|member| *member != session)
                    .collect(),
            })
            .collect()
    }

    /// セッション切断を実行
    ///
    /// Registry の全ルームから外し、送信チャンネルを破棄する。退出したルームの一覧を返す。
    pub async fn execute(&self, session: SessionId) -> Vec<RoomId> {
        let left_rooms = self.registry.unregister(session);
        self.message_pusher.unregister_session(session).await;
        left_rooms
    }
}
