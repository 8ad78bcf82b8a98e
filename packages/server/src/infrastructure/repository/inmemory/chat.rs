//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! `ChatState` ドメインモデルをそのままインメモリ DB として使用します。
//!
//! 1 メソッド = 1 回のロック取得。ロックを保持したまま `ChatState` の操作を
//! 最後まで実行するので、別の接続のイベントが途中の状態を観測することはない。
//! イベント全体の直列化には状態とは別のロック（`events`）を使う。取得順は
//! 常に `events` → `state`。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatLine, ChatRepository, ChatState, ChatStateError, ConnectOutcome, ConnectionId,
    DisconnectOutcome, DisplayName, EventGuard, JoinOutcome, RenameOutcome, RoomName,
    RoomSummary,
};

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    /// ChatState ドメインモデル
    state: Arc<Mutex<ChatState>>,
    /// イベント処理の直列化（tokio の Mutex は到着順に取得される）
    events: Arc<Mutex<()>>,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self {
            state,
            events: Arc::new(Mutex::new(())),
        }
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(ChatState::new())))
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn begin_event(&self) -> EventGuard {
        self.events.clone().lock_owned().await
    }

    async fn connect(&self, connection_id: ConnectionId) -> ConnectOutcome {
        let mut state = self.state.lock().await;
        state.connect(connection_id)
    }

    async fn switch_room(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
    ) -> Result<JoinOutcome, ChatStateError> {
        let mut state = self.state.lock().await;
        state.switch_room(connection_id, room)
    }

    async fn rename(
        &self,
        connection_id: ConnectionId,
        requested: DisplayName,
    ) -> Result<RenameOutcome, ChatStateError> {
        let mut state = self.state.lock().await;
        state.rename(connection_id, requested)
    }

    async fn send_message(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
        text: String,
    ) -> Result<ChatLine, ChatStateError> {
        let state = self.state.lock().await;
        state.send_message(connection_id, &room, &text)
    }

    async fn disconnect(
        &self,
        connection_id: ConnectionId,
    ) -> Result<DisconnectOutcome, ChatStateError> {
        let mut state = self.state.lock().await;
        state.disconnect(connection_id)
    }

    async fn list_rooms(&self) -> Vec<RoomSummary> {
        let state = self.state.lock().await;
        state.rooms()
    }

    async fn count_connections(&self) -> usize {
        let state = self.state.lock().await;
        state.connection_count()
    }
}
