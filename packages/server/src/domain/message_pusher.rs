//! MessagePusher trait 定義
//!
//! セッションへの送信（通知）を抽象化します。具体的なトランスポート（WebSocket など）は
//! Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, SessionId};

/// Outbound queue of one session
///
/// The receiving half is drained into the session's socket by its writer task.
/// A closed channel means the transport is no longer open.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Message pusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションの送信チャンネルを登録する
    async fn register_session(&self, session: SessionId, sender: PusherChannel);

    /// セッションの送信チャンネルを破棄する
    async fn unregister_session(&self, session: SessionId);

    /// 特定のセッションに送信する
    async fn push_to(&self, session: SessionId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のセッションに送信する
    ///
    /// 宛先ごとに独立して配送を試み、失敗した宛先はログに記録して読み飛ばす。
    /// 配送に成功した宛先の数を返す。
    async fn broadcast(&self, targets: &[SessionId], content: &str) -> usize;
}
