//! ドメイン層のエラー型

use thiserror::Error;

use super::value_object::ConnectionId;

/// 名前変更の拒否理由
///
/// `Display` の文字列はそのままクライアントへ返すメッセージになる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("Names cannot begin with \"Guest\".")]
    ReservedPrefix,

    #[error("That name is already in use.")]
    NameInUse,
}

/// `ChatState` の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatStateError {
    /// 登録されていない（既に切断された）接続に対する操作
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(ConnectionId),

    #[error(transparent)]
    Rename(#[from] RenameError),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not registered to the pusher")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    Encode(String),
}
