//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::static_files::StaticFileStore,
    usecase::{
        ChangeNameUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        ListRoomsUseCase, SendMessageUseCase, SwitchRoomUseCase,
    },
};

use super::{
    handler::{
        http::{get_rooms, health_check},
        static_file::serve_static,
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat relay and static file server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     send_message_usecase,
///     change_name_usecase,
///     switch_room_usecase,
///     list_rooms_usecase,
///     static_files,
/// );
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// ChangeNameUseCase（表示名変更のユースケース）
    change_name_usecase: Arc<ChangeNameUseCase>,
    /// SwitchRoomUseCase（ルーム移動のユースケース）
    switch_room_usecase: Arc<SwitchRoomUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// 静的ファイルストア
    static_files: Arc<StaticFileStore>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        change_name_usecase: Arc<ChangeNameUseCase>,
        switch_room_usecase: Arc<SwitchRoomUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
        static_files: Arc<StaticFileStore>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            send_message_usecase,
            change_name_usecase,
            switch_room_usecase,
            list_rooms_usecase,
            static_files,
        }
    }

    /// Build the router with every endpoint and the static file fallback
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            send_message_usecase: self.send_message_usecase,
            change_name_usecase: self.change_name_usecase,
            switch_room_usecase: self.switch_room_usecase,
            list_rooms_usecase: self.list_rooms_usecase,
            static_files: self.static_files,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            // それ以外は公開ディレクトリのファイル
            .fallback(serve_static)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            "Serving {} on http://{}",
            self.static_files.root().display(),
            local_addr
        );
        tracing::info!("Connect to: ws://{}/ws", local_addr);

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Run the chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }
}
