//! UseCase: ルームの移動
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SwitchRoomUseCase::execute() メソッド
//! - 移動先ルームでの参加通知とサマリー、およびその順序
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの移動（サマリー無し）
//! - 正常系：メンバーのいるルームへの移動
//! - エッジケース：同じルームへの再参加

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, MessagePusher, RoomName};

use super::{error::SessionError, notify::announce_join};

/// ルーム移動のユースケース
pub struct SwitchRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SwitchRoomUseCase {
    /// 新しい SwitchRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 現在のルームを抜けて `room` に参加する
    ///
    /// 旧ルームのメンバーへの退出通知は行わない。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
    ) -> Result<RoomName, SessionError> {
        let _event = self.repository.begin_event().await;
        let join = self.repository.switch_room(connection_id, room).await?;
        let room = join.room.clone();
        tracing::info!("Connection '{}' joined room '{}'", connection_id, room);

        announce_join(self.message_pusher.as_ref(), &connection_id, join).await;

        Ok(room)
    }
}
