//! ドメイン層
//!
//! チャットの状態機械（ゲスト名の採番、名前の登録、ルームの所属）と、
//! 外部とやり取りするためのポート（Repository, MessagePusher）を定義します。
//! この層は Infrastructure 層や UI 層に依存しません。

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatLine, ChatState, ConnectOutcome, DisconnectOutcome, JoinOutcome, RenameOutcome,
    RoomSummary,
};
pub use error::{ChatStateError, MessagePushError, RenameError};
pub use event::OutboundEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ChatRepository, EventGuard};
pub use value_object::{ConnectionId, DEFAULT_ROOM, DisplayName, GUEST_NAME_PREFIX, RoomName};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
