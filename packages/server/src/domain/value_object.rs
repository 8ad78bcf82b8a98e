//! Value Objects
//!
//! 接続 ID・表示名・ルーム名を String のまま扱わず、型で区別します。

use std::fmt;

use uuid::Uuid;

/// システムが割り当てるゲスト名の接頭辞。ユーザーはこの接頭辞で始まる名前を名乗れない。
pub const GUEST_NAME_PREFIX: &str = "Guest";

/// 接続直後に自動で参加するルーム
pub const DEFAULT_ROOM: &str = "Lobby";

/// 1 本の WebSocket 接続を表す不透明な ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// ランダムな ID を新規発行
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 表示名
///
/// 中身の検証は行わない。予約済み接頭辞のチェックは `ChatState::rename` の責務。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// `"Guest" + number` 形式のゲスト名を生成
    pub fn guest(number: u64) -> Self {
        Self(format!("{GUEST_NAME_PREFIX}{number}"))
    }

    /// 予約済み接頭辞 `"Guest"` で始まるかどうか
    pub fn has_reserved_prefix(&self) -> bool {
        self.0.starts_with(GUEST_NAME_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for DisplayName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルーム名
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// デフォルトルーム（`"Lobby"`）
    pub fn lobby() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RoomName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
