//! Integration tests: a real server on an ephemeral port, driven over WebSocket and HTTP.

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    infrastructure::{
        dto::websocket::{JoinResultPayload, MessagePayload, NameResultPayload, ServerEvent},
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryChatRepository,
        static_files::StaticFileStore,
    },
    ui::Server,
    usecase::{
        ChangeNameUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        ListRoomsUseCase, SendMessageUseCase, SwitchRoomUseCase,
    },
};
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    task::JoinHandle,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Helper struct to manage an in-process server
struct TestServer {
    addr: SocketAddr,
    public_dir: PathBuf,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server on 127.0.0.1 with an ephemeral port and a temporary public directory
    async fn start() -> Self {
        let public_dir =
            std::env::temp_dir().join(format!("hiroba-public-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&public_dir).expect("Failed to create public dir");
        std::fs::write(
            public_dir.join("index.html"),
            "<!doctype html><title>hiroba</title>",
        )
        .unwrap();
        std::fs::write(public_dir.join("style.css"), "body { margin: 0; }").unwrap();

        let repository = Arc::new(InMemoryChatRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());
        let server = Server::new(
            Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(ChangeNameUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(SwitchRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(ListRoomsUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(StaticFileStore::new(&public_dir, 16)),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();
        let router = server.into_router();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        TestServer {
            addr,
            public_dir,
            handle,
        }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Send a raw GET so the request target reaches the router without client-side normalization
async fn raw_get(addr: SocketAddr, target: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("Failed to connect");
    let request = format!("GET {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
        let _ = std::fs::remove_dir_all(&self.public_dir);
    }
}

/// Helper struct wrapping one WebSocket connection
struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    /// Connect and consume the nameResult / joinResult pair, returning the guest name
    async fn connect_as_guest(server: &TestServer) -> (Self, String) {
        let mut client = Self::connect(server).await;
        let name = match client.recv().await {
            ServerEvent::NameResult(NameResultPayload {
                success: true,
                name: Some(name),
                ..
            }) => name,
            other => panic!("expected nameResult, got {other:?}"),
        };
        assert!(matches!(client.recv().await, ServerEvent::JoinResult(_)));
        (client, name)
    }

    async fn send(&mut self, event: serde_json::Value) {
        self.stream
            .send(Message::text(event.to_string()))
            .await
            .expect("Failed to send");
    }

    async fn recv(&mut self) -> ServerEvent {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for an event")
                .expect("Stream closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).expect("Invalid server event");
            }
        }
    }

    async fn recv_text(&mut self) -> String {
        match self.recv().await {
            ServerEvent::Message(MessagePayload { text }) => text,
            other => panic!("expected message, got {other:?}"),
        }
    }

    async fn request_rooms(&mut self) -> std::collections::BTreeMap<String, Vec<String>> {
        self.send(json!({"event": "rooms"})).await;
        match self.recv().await {
            ServerEvent::Rooms(rooms) => rooms,
            other => panic!("expected rooms, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_guests_are_numbered_and_joined_to_lobby() {
    // テスト項目: 接続順に Guest1, Guest2 が割り当てられ、Lobby の参加通知とサマリーが届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut first, first_name) = TestClient::connect_as_guest(&server).await;

    // when (操作):
    let mut second = TestClient::connect(&server).await;

    // then (期待する結果):
    assert_eq!(first_name, "Guest1");
    assert_eq!(
        second.recv().await,
        ServerEvent::NameResult(NameResultPayload {
            success: true,
            name: Some("Guest2".to_string()),
            message: None,
        })
    );
    assert_eq!(
        second.recv().await,
        ServerEvent::JoinResult(JoinResultPayload {
            room: "Lobby".to_string()
        })
    );
    assert_eq!(
        second.recv_text().await,
        "Users currently in Lobby: Guest1."
    );
    assert_eq!(first.recv_text().await, "Guest2 has joined Lobby.");
}

#[tokio::test]
async fn test_rename_and_chat_round_trip() {
    // テスト項目: 改名通知とチャットが他メンバーに届き、送信者本人には届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = TestClient::connect_as_guest(&server).await;
    let (mut bob, _) = TestClient::connect_as_guest(&server).await;
    assert_eq!(bob.recv_text().await, "Users currently in Lobby: Guest1.");
    assert_eq!(alice.recv_text().await, "Guest2 has joined Lobby.");

    // when (操作):
    alice.send(json!({"event": "nameAttempt", "data": "Alice"})).await;
    let alice_result = alice.recv().await;
    let rename_notice = bob.recv_text().await;
    bob.send(json!({"event": "message", "data": {"room": "Lobby", "text": "hi"}}))
        .await;
    let chat = alice.recv_text().await;

    // then (期待する結果):
    assert_eq!(
        alice_result,
        ServerEvent::NameResult(NameResultPayload {
            success: true,
            name: Some("Alice".to_string()),
            message: None,
        })
    );
    assert_eq!(rename_notice, "Guest1 is now known as Alice.");
    assert_eq!(chat, "Guest2: hi");
    // 次に届くのが rooms の応答であれば、Bob 自身のメッセージは届いていない
    let rooms = bob.request_rooms().await;
    assert_eq!(rooms["Lobby"], vec!["Alice", "Guest2"]);
}

#[tokio::test]
async fn test_rejected_names() {
    // テスト項目: "Guest" で始まる名前と使用中の名前は拒否理由付きで失敗する
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = TestClient::connect_as_guest(&server).await;
    alice.send(json!({"event": "nameAttempt", "data": "Alice"})).await;
    alice.recv().await;
    let (mut other, _) = TestClient::connect_as_guest(&server).await;
    other.recv_text().await;

    // when (操作):
    other.send(json!({"event": "nameAttempt", "data": "GuestZero"})).await;
    let reserved = other.recv().await;
    other.send(json!({"event": "nameAttempt", "data": "Alice"})).await;
    let in_use = other.recv().await;

    // then (期待する結果):
    assert_eq!(
        reserved,
        ServerEvent::NameResult(NameResultPayload {
            success: false,
            name: None,
            message: Some("Names cannot begin with \"Guest\".".to_string()),
        })
    );
    assert_eq!(
        in_use,
        ServerEvent::NameResult(NameResultPayload {
            success: false,
            name: None,
            message: Some("That name is already in use.".to_string()),
        })
    );
}

#[tokio::test]
async fn test_switch_room_and_disconnect() {
    // テスト項目: ルーム移動が一覧に反映され、切断した接続は一覧から消えて名前が解放される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = TestClient::connect_as_guest(&server).await;
    let (mut bob, _) = TestClient::connect_as_guest(&server).await;
    bob.recv_text().await;
    alice.recv_text().await;
    bob.send(json!({"event": "nameAttempt", "data": "Bob"})).await;
    bob.recv().await;
    alice.recv_text().await;

    // when (操作): Bob が Games に移動
    bob.send(json!({"event": "join", "data": {"newRoom": "Games"}}))
        .await;

    // then (期待する結果):
    assert_eq!(
        bob.recv().await,
        ServerEvent::JoinResult(JoinResultPayload {
            room: "Games".to_string()
        })
    );
    let rooms = alice.request_rooms().await;
    assert_eq!(rooms["Lobby"], vec!["Guest1"]);
    assert_eq!(rooms["Games"], vec!["Bob"]);

    // when (操作): Bob が切断
    bob.stream.close(None).await.unwrap();

    // then (期待する結果): 切断処理は非同期なので反映されるまで待つ
    let mut released = false;
    for _ in 0..50 {
        let rooms = alice.request_rooms().await;
        if !rooms.contains_key("Games") {
            released = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(released, "Bob should disappear from the room list");
    alice.send(json!({"event": "nameAttempt", "data": "Bob"})).await;
    assert_eq!(
        alice.recv().await,
        ServerEvent::NameResult(NameResultPayload {
            success: true,
            name: Some("Bob".to_string()),
            message: None,
        })
    );
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    // テスト項目: 解釈できないフレームは無視され、接続はそのまま使える
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut client, _) = TestClient::connect_as_guest(&server).await;

    // when (操作):
    client
        .stream
        .send(Message::text("not json at all"))
        .await
        .unwrap();
    client.send(json!({"event": "shout", "data": "hey"})).await;
    let rooms = client.request_rooms().await;

    // then (期待する結果):
    assert_eq!(rooms["Lobby"], vec!["Guest1"]);
}

#[tokio::test]
async fn test_http_rooms_and_health_endpoints() {
    // テスト項目: /api/health と /api/rooms が JSON を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let (_client, _) = TestClient::connect_as_guest(&server).await;

    // when (操作):
    let health: serde_json::Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rooms: serde_json::Value = reqwest::get(server.http_url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(health, json!({"status": "ok"}));
    assert_eq!(rooms, json!({"Lobby": ["Guest1"]}));
}

#[tokio::test]
async fn test_static_files_are_served_and_memoized() {
    // テスト項目: 初回は 200 と推定 Content-Type、2 回目はディスクを読まず同じ内容を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let first = reqwest::get(server.http_url("/style.css")).await.unwrap();
    let first_type = first.headers()["content-type"].to_str().unwrap().to_string();
    let first_status = first.status();
    let first_body = first.bytes().await.unwrap();
    std::fs::remove_file(server.public_dir.join("style.css")).unwrap();
    let second = reqwest::get(server.http_url("/style.css")).await.unwrap();
    let second_status = second.status();
    let second_body = second.bytes().await.unwrap();

    // then (期待する結果):
    assert_eq!(first_status, reqwest::StatusCode::OK);
    assert_eq!(first_type, "text/css");
    assert_eq!(second_status, reqwest::StatusCode::OK);
    assert_eq!(first_body, second_body);
}

#[tokio::test]
async fn test_root_serves_index_document() {
    // テスト項目: "/" は index.html を返す
    let server = TestServer::start().await;

    let response = reqwest::get(server.http_url("/")).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/html");
    assert_eq!(
        response.text().await.unwrap(),
        "<!doctype html><title>hiroba</title>"
    );
}

#[tokio::test]
async fn test_missing_file_returns_404_every_time() {
    // テスト項目: 存在しないパスは毎回 404 と固定の本文を返す
    // given (前提条件):
    let server = TestServer::start().await;

    for _ in 0..2 {
        // when (操作):
        let response = reqwest::get(server.http_url("/missing.js")).await.unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "text/plain");
        assert_eq!(
            response.text().await.unwrap(),
            "Error 404: resource not found."
        );
    }
}

#[tokio::test]
async fn test_parent_directory_requests_return_404() {
    // テスト項目: 公開ディレクトリの外を指すパスは、実在するファイルでも 404 になる
    // given (前提条件): "/../<公開ディレクトリ名>/index.html" は解決すれば実在するファイル
    let server = TestServer::start().await;
    let dir_name = server
        .public_dir
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    // when (操作):
    let direct = raw_get(server.addr, "/index.html").await;
    let escaped = raw_get(server.addr, &format!("/../{dir_name}/index.html")).await;
    let nested = raw_get(server.addr, "/css/../../Cargo.toml").await;
    let encoded = raw_get(server.addr, "/..%2fCargo.toml").await;

    // then (期待する結果):
    assert!(direct.starts_with("HTTP/1.1 200"), "{direct}");
    for response in [escaped, nested, encoded] {
        assert!(response.starts_with("HTTP/1.1 404"), "{response}");
        assert!(response.ends_with("Error 404: resource not found."), "{response}");
    }
}

#[tokio::test]
async fn test_static_files_reject_non_get_methods() {
    // テスト項目: GET/HEAD 以外のメソッドは 405 になり、HEAD は 200
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let post = client
        .post(server.http_url("/style.css"))
        .body("overwrite")
        .send()
        .await
        .unwrap();
    let head = client.head(server.http_url("/style.css")).send().await.unwrap();

    // then (期待する結果):
    assert_eq!(post.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(post.headers()["allow"], "GET, HEAD");
    assert_eq!(head.status(), reqwest::StatusCode::OK);
}
