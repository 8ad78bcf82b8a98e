//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 名前の解放、ルーム所属の削除、送信チャンネルの登録解除
//!
//! ### どのような状況を想定しているか
//! - 正常系：切断した名前が再利用できる
//! - 正常系：切断した接続がルーム一覧から消える
//! - 異常系：既に切断済みの接続

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, DisconnectOutcome, MessagePusher};

use super::error::SessionError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// 他のメンバーへの通知は行わない。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
    ) -> Result<DisconnectOutcome, SessionError> {
        let _event = self.repository.begin_event().await;

        // 登録解除は状態の有無にかかわらず行う
        self.message_pusher.unregister_client(&connection_id).await;

        let outcome = self.repository.disconnect(connection_id).await?;
        tracing::info!(
            "Connection '{}' ('{}') disconnected and released",
            connection_id,
            outcome.name
        );
        Ok(outcome)
    }
}
