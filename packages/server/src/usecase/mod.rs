//! UseCase 層
//!
//! 1 つの受信イベントにつき 1 つのユースケース。Repository で状態を更新し、
//! 返ってきた配送内容を MessagePusher で各接続へ送ります。
//!
//! 各ユースケースは最初に `ChatRepository::begin_event` のガードを取得し、
//! 送信キューへの投入が終わるまで保持する。ガードの下で別のユースケースを
//! 呼んではならない。

pub mod change_name;
pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod list_rooms;
mod notify;
pub mod send_message;
pub mod switch_room;

#[cfg(test)]
pub(crate) mod test_support;

pub use change_name::ChangeNameUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::SessionError;
pub use list_rooms::ListRoomsUseCase;
pub use send_message::SendMessageUseCase;
pub use switch_room::SwitchRoomUseCase;
