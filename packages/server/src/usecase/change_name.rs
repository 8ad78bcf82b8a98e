//! UseCase: 表示名の変更
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChangeNameUseCase::execute() メソッド
//! - 成功時・拒否時の nameResult と、ルームへの改名通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：改名と同じルームの他メンバーへの通知
//! - 異常系："Guest" で始まる名前、使用中の名前、自分の現在の名前

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ChatStateError, ConnectionId, DisplayName, MessagePusher, OutboundEvent,
};

use super::{
    error::SessionError,
    notify::{broadcast_or_warn, push_or_warn},
};

/// 表示名変更のユースケース
pub struct ChangeNameUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ChangeNameUseCase {
    /// 新しい ChangeNameUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 表示名の変更を実行
    ///
    /// 拒否された場合も理由を nameResult で本人へ通知してから
    /// `SessionError::NameRejected` を返す。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        requested: DisplayName,
    ) -> Result<DisplayName, SessionError> {
        let _event = self.repository.begin_event().await;
        let outcome = match self.repository.rename(connection_id, requested).await {
            Ok(outcome) => outcome,
            Err(ChatStateError::Rename(reason)) => {
                push_or_warn(
                    self.message_pusher.as_ref(),
                    &connection_id,
                    &OutboundEvent::NameRejected(reason.clone()),
                )
                .await;
                return Err(SessionError::NameRejected(reason));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "Connection '{}' renamed '{}' -> '{}'",
            connection_id,
            outcome.previous_name,
            outcome.name
        );

        push_or_warn(
            self.message_pusher.as_ref(),
            &connection_id,
            &OutboundEvent::NameAccepted(outcome.name.clone()),
        )
        .await;
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            outcome.notify_targets,
            &OutboundEvent::Text(outcome.notice),
        )
        .await;

        Ok(outcome.name)
    }
}
