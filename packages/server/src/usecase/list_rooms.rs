//! UseCase: ルーム一覧の取得

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, MessagePusher, OutboundEvent, RoomSummary};

use super::notify::push_or_warn;

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ListRoomsUseCase {
    /// 新しい ListRoomsUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 要求した接続へルーム一覧を送る
    pub async fn execute(&self, connection_id: ConnectionId) -> Vec<RoomSummary> {
        let _event = self.repository.begin_event().await;
        let rooms = self.repository.list_rooms().await;
        push_or_warn(
            self.message_pusher.as_ref(),
            &connection_id,
            &OutboundEvent::Rooms(rooms.clone()),
        )
        .await;
        rooms
    }

    /// アクティブなルームとメンバーのスナップショット（HTTP API 用）
    pub async fn snapshot(&self) -> Vec<RoomSummary> {
        self.repository.list_rooms().await
    }
}
