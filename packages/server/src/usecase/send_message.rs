//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 指定ルームの送信者以外のメンバーへの配送
//!
//! ### どのような状況を想定しているか
//! - 正常系：Lobby 内での送信（送信者には届かない）
//! - エッジケース：参加していないルームへの送信（そのルームのメンバーに届く）
//! - 異常系：未登録の接続からの送信

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, MessagePusher, OutboundEvent, RoomName};

use super::{error::SessionError, notify::broadcast_or_warn};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 送信者が `room` に参加しているかは確認しない。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配送先の接続 ID
    /// * `Err(SessionError)` - 送信者が登録されていない
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
        text: String,
    ) -> Result<Vec<ConnectionId>, SessionError> {
        let _event = self.repository.begin_event().await;
        let line = self
            .repository
            .send_message(connection_id, room, text)
            .await?;

        broadcast_or_warn(
            self.message_pusher.as_ref(),
            line.targets.clone(),
            &OutboundEvent::Text(line.text),
        )
        .await;

        Ok(line.targets)
    }
}
