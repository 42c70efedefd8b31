//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - セッションごとの `UnboundedSender` を管理
//! - セッションへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信前に必ずチャンネルが開いているか（`is_closed`）を確認し、閉じていれば
//! 宛先ごとの配送失敗として扱います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_session(session_id, tx).await;
///
/// pusher.push_to(session_id, "{\"type\":\"roomJoined\",\"data\":{\"roomId\":7}}").await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のセッションの WebSocket sender
    sessions: Mutex<HashMap<SessionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    fn deliver(
        sessions: &HashMap<SessionId, PusherChannel>,
        session: SessionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sender = sessions
            .get(&session)
            .ok_or(MessagePushError::SessionNotFound(session))?;

        if sender.is_closed() {
            return Err(MessagePushError::ChannelClosed(session));
        }

        sender
            .send(content.to_string())
            .map_err(|_| MessagePushError::ChannelClosed(session))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session, sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session);
    }

    async fn unregister_session(&self, session: SessionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(&session);
        tracing::debug!("Session '{}' unregistered from MessagePusher", session);
    }

    async fn push_to(&self, session: SessionId, content: &str) -> Result<(), MessagePushError> {
        let sessions = self.sessions.lock().await;
        Self::deliver(&sessions, session, content)?;
        tracing::debug!("Pushed message to session '{}'", session);
        Ok(())
    }

    async fn broadcast(&self, targets: &[SessionId], content: &str) -> usize {
        let sessions = self.sessions.lock().await;

        let mut delivered = 0;
        for &target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            match Self::deliver(&sessions, target, content) {
                Ok(()) => {
                    delivered += 1;
                    tracing::debug!("Broadcasted message to session '{}'", target);
                }
                Err(e) => {
                    tracing::warn!("Failed to push message to '{}': {}", target, e);
                }
            }
        }

        delivered
    }
}
