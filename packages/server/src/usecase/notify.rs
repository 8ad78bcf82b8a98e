//! ユースケース共通の送信ヘルパー
//!
//! 送信の失敗はイベント処理全体を失敗させない。ログに残して続行する。

use crate::domain::{ConnectionId, JoinOutcome, MessagePusher, OutboundEvent};

pub(crate) async fn push_or_warn(
    pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
    event: &OutboundEvent,
) {
    if let Err(e) = pusher.push_to(connection_id, event).await {
        tracing::warn!("Failed to push event to '{}': {}", connection_id, e);
    }
}

pub(crate) async fn broadcast_or_warn(
    pusher: &dyn MessagePusher,
    targets: Vec<ConnectionId>,
    event: &OutboundEvent,
) {
    if let Err(e) = pusher.broadcast(targets, event).await {
        tracing::warn!("Failed to broadcast event: {}", e);
    }
}

/// ルーム参加の通知
///
/// 順序: 本人へ joinResult → 他メンバーへ参加通知 → 本人へ参加者サマリー
pub(crate) async fn announce_join(
    pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
    join: JoinOutcome,
) {
    push_or_warn(pusher, connection_id, &OutboundEvent::JoinedRoom(join.room)).await;
    broadcast_or_warn(
        pusher,
        join.notify_targets,
        &OutboundEvent::Text(join.joined_notice),
    )
    .await;
    if let Some(summary) = join.members_summary {
        push_or_warn(pusher, connection_id, &OutboundEvent::Text(summary)).await;
    }
}
