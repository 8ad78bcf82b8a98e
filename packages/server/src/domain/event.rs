//! クライアントへ送るイベント（ドメイン表現）
//!
//! ワイヤ形式（JSON）への変換は `infrastructure::dto::conversion` が担当します。

use super::{
    entity::RoomSummary,
    error::RenameError,
    value_object::{DisplayName, RoomName},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// 名前の割り当て・変更に成功した
    NameAccepted(DisplayName),
    /// 名前の変更が拒否された
    NameRejected(RenameError),
    /// ルームに参加した
    JoinedRoom(RoomName),
    /// チャット本文またはシステム通知
    Text(String),
    /// アクティブなルームとメンバーのスナップショット
    Rooms(Vec<RoomSummary>),
}
