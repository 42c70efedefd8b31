//! UseCase: セッション接続処理

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, RoomRegistry, SessionId, SessionIdFactory};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// RoomRegistry（ライブな所属の管理）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    session_ids: SessionIdFactory,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
            session_ids: SessionIdFactory::new(),
        }
    }

    /// セッション接続を実行
    ///
    /// 新しい SessionId を払い出し、空のルーム集合で Registry に登録した上で、
    /// 送信チャンネルを MessagePusher に登録する。
    pub async fn execute(&self, sender: PusherChannel) -> SessionId {
        let session = self.session_ids.generate();
        self.registry.register(session);
        self.message_pusher.register_session(session, sender).await;
        session
    }
}
