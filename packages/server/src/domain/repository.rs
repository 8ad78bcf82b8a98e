//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 つのイベント処理に対応し、実装はその更新を
//! 他のイベントと交錯しない 1 回の操作として行わなければならない。
//! 送信まで含めたイベント処理全体は `begin_event` のガードで直列化する。

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::{
    ChatLine, ChatStateError, ConnectOutcome, ConnectionId, DisconnectOutcome, DisplayName,
    JoinOutcome, RenameOutcome, RoomName, RoomSummary,
};

/// イベント処理の直列化ガード（drop で次のイベントへ進む）
pub type EventGuard = OwnedMutexGuard<()>;

/// チャット状態の Repository
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// イベント処理を開始する
    ///
    /// ガードを保持している間、どの接続の次のイベントも処理されない。
    /// 状態の更新と、その結果の送信キュー投入までをこのガードの下で行う。
    async fn begin_event(&self) -> EventGuard;

    /// ゲスト名を割り当てて Lobby に参加させる
    async fn connect(&self, connection_id: ConnectionId) -> ConnectOutcome;

    /// 現在のルームを抜けて別のルームに参加する
    async fn switch_room(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
    ) -> Result<JoinOutcome, ChatStateError>;

    /// 表示名を変更する
    async fn rename(
        &self,
        connection_id: ConnectionId,
        requested: DisplayName,
    ) -> Result<RenameOutcome, ChatStateError>;

    /// ルームへのチャット行を組み立てる
    async fn send_message(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
        text: String,
    ) -> Result<ChatLine, ChatStateError>;

    /// 接続を解放する
    async fn disconnect(
        &self,
        connection_id: ConnectionId,
    ) -> Result<DisconnectOutcome, ChatStateError>;

    /// アクティブなルームとメンバーの一覧
    async fn list_rooms(&self) -> Vec<RoomSummary>;

    /// 接続中のクライアント数
    async fn count_connections(&self) -> usize;
}
