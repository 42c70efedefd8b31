//! UseCase error types.

use thiserror::Error;

use crate::domain::{SessionId, StorageError};

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("failed to create room: {0}")]
    Storage(#[from] StorageError),

    /// 永続化の完了前にセッションが切断された
    #[error("session '{0}' closed before the room could be joined")]
    SessionClosed(SessionId),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("failed to join room: {0}")]
    Storage(#[from] StorageError),

    /// 永続化の完了前にセッションが切断された
    #[error("session '{0}' closed before the room could be joined")]
    SessionClosed(SessionId),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("failed to store message: {0}")]
    Storage(#[from] StorageError),
}
