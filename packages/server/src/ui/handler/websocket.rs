//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, DisplayName, RoomName},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::SessionError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives encoded frames from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the MessagePusher
/// * `sender` - WebSocket sink of this connection
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Assign a guest name and join the Lobby. Events are buffered in the
    // channel until the pusher loop starts.
    let name = state
        .connect_participant_usecase
        .execute(connection_id, tx)
        .await;
    tracing::info!("Connection '{}' accepted as '{}'", connection_id, name);

    let state_clone = state.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatch_event(&state_clone, connection_id, event).await,
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring malformed frame from '{}': {} ({})",
                            connection_id,
                            e,
                            text.as_str()
                        );
                    }
                },
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping from '{}'", connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push events from other connections to this one
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await
    {
        tracing::warn!("Failed to release connection '{}': {}", connection_id, e);
    }
}

/// 1 つの受信イベントを対応するユースケースへ振り分ける
///
/// 接続ごとのイベントはすべてここを通り、1 件ずつ最後まで処理される。
pub async fn dispatch_event(state: &AppState, connection_id: ConnectionId, event: ClientEvent) {
    let result = match event {
        ClientEvent::NameAttempt(name) => state
            .change_name_usecase
            .execute(connection_id, DisplayName::new(name))
            .await
            .map(|_| ()),
        ClientEvent::Message(payload) => state
            .send_message_usecase
            .execute(connection_id, RoomName::new(payload.room), payload.text)
            .await
            .map(|_| ()),
        ClientEvent::Join(payload) => state
            .switch_room_usecase
            .execute(connection_id, RoomName::new(payload.new_room))
            .await
            .map(|_| ()),
        ClientEvent::Rooms => {
            state.list_rooms_usecase.execute(connection_id).await;
            Ok(())
        }
    };

    match result {
        Ok(()) => {}
        Err(SessionError::NameRejected(reason)) => {
            tracing::info!("Name change for '{}' rejected: {}", connection_id, reason);
        }
        Err(e) => {
            tracing::warn!("Failed to handle event from '{}': {}", connection_id, e);
        }
    }
}
