//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{ChatStateError, ConnectionId, RenameError};

/// 接続ごとのイベント処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// 既に切断済み、または未登録の接続
    #[error("Connection '{0}' is not registered")]
    NotConnected(ConnectionId),

    /// 名前変更が拒否された（拒否理由はクライアントへ通知済み）
    #[error("Name change rejected: {0}")]
    NameRejected(RenameError),
}

impl From<ChatStateError> for SessionError {
    fn from(error: ChatStateError) -> Self {
        match error {
            ChatStateError::ConnectionNotFound(id) => Self::NotConnected(id),
            ChatStateError::Rename(reason) => Self::NameRejected(reason),
        }
    }
}
