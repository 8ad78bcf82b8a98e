//! ユースケースのテスト用ヘルパー

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use crate::{
    domain::{
        ConnectionId, DisplayName, MessagePushError, MessagePusher, OutboundEvent, PusherChannel,
    },
    infrastructure::{
        dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryChatRepository,
    },
};

use super::{ChangeNameUseCase, ConnectParticipantUseCase};

pub(crate) fn create_test_repository() -> Arc<InMemoryChatRepository> {
    Arc::new(InMemoryChatRepository::default())
}

pub(crate) fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::default())
}

/// テスト用の接続。受信したフレームを `ServerEvent` として取り出せる。
pub(crate) struct TestClient {
    pub id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// これまでに届いたイベントをすべて取り出す
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            events.push(serde_json::from_str(&frame).expect("frame should be a server event"));
        }
        events
    }

    /// 届いた message イベントの本文だけを取り出す
    pub fn drain_texts(&mut self) -> Vec<String> {
        self.drain()
            .into_iter()
            .filter_map(|event| match event {
                ServerEvent::Message(payload) => Some(payload.text),
                _ => None,
            })
            .collect()
    }
}

/// 接続してこれまでのイベントを読み捨てる
pub(crate) async fn connect_client(usecase: &ConnectParticipantUseCase) -> TestClient {
    let id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    usecase.execute(id, tx).await;
    let mut client = TestClient { id, rx };
    client.drain();
    client
}

/// 接続して名前を変更し、これまでのイベントを読み捨てる
pub(crate) async fn connect_named_client(
    connect: &ConnectParticipantUseCase,
    change_name: &ChangeNameUseCase,
    name: &str,
) -> TestClient {
    let mut client = connect_client(connect).await;
    change_name
        .execute(client.id, DisplayName::new(name))
        .await
        .expect("rename should succeed");
    client.drain();
    client
}

/// 指定したイベントの送信直前で止まる MessagePusher
///
/// 停止地点に着くと `reached` を通知し、`release` が通知されるまで待つ。
/// それ以外の送信は内側の WebSocketMessagePusher にそのまま委譲する。
pub(crate) struct GatedMessagePusher {
    inner: Arc<WebSocketMessagePusher>,
    held_event: OutboundEvent,
    pub reached: Notify,
    pub release: Notify,
}

impl GatedMessagePusher {
    pub fn new(inner: Arc<WebSocketMessagePusher>, held_event: OutboundEvent) -> Self {
        Self {
            inner,
            held_event,
            reached: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl MessagePusher for GatedMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.inner.register_client(connection_id, sender).await;
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.inner.unregister_client(connection_id).await;
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        if *event == self.held_event {
            self.reached.notify_one();
            self.release.notified().await;
        }
        self.inner.push_to(connection_id, event).await
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        self.inner.broadcast(targets, event).await
    }
}
