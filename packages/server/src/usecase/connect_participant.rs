//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - ゲスト名の割り当てと Lobby への自動参加、その通知
//!
//! ### なぜこのテストが必要か
//! - 接続直後に届くイベントの内容と順序はクライアントの初期表示を決める
//! - 既存メンバーへの参加通知が本人に届かないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の接続（サマリー無し）
//! - 正常系：既存メンバーがいる Lobby への接続（サマリー有り）

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, DisplayName, MessagePusher, OutboundEvent, PusherChannel,
};

use super::notify::{announce_join, push_or_warn};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者接続を実行
    ///
    /// 送信チャンネルを登録してからゲスト名を割り当て、Lobby に参加させる。
    /// 接続は常に成功する。
    ///
    /// # Returns
    ///
    /// 割り当てたゲスト名
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) -> DisplayName {
        let _event = self.repository.begin_event().await;

        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        let outcome = self.repository.connect(connection_id).await;
        tracing::info!(
            "Connection '{}' assigned name '{}'",
            connection_id,
            outcome.name
        );

        push_or_warn(
            self.message_pusher.as_ref(),
            &connection_id,
            &OutboundEvent::NameAccepted(outcome.name.clone()),
        )
        .await;
        announce_join(self.message_pusher.as_ref(), &connection_id, outcome.join).await;

        outcome.name
    }
}
