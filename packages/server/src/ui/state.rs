//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    infrastructure::static_files::StaticFileStore,
    usecase::{
        ChangeNameUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        ListRoomsUseCase, SendMessageUseCase, SwitchRoomUseCase,
    },
};

/// Shared application state
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub change_name_usecase: Arc<ChangeNameUseCase>,
    pub switch_room_usecase: Arc<SwitchRoomUseCase>,
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// 公開ディレクトリの静的ファイル（メモ化付き）
    pub static_files: Arc<StaticFileStore>,
}
