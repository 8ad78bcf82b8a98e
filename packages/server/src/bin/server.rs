//! Hiroba chat server.
//!
//! Serves the browser client from the public directory and relays chat
//! events between WebSocket connections.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --public-dir public
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryChatRepository,
        static_files::{DEFAULT_CACHE_CAPACITY, StaticFileStore},
    },
    ui::Server,
    usecase::{
        ChangeNameUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        ListRoomsUseCase, SendMessageUseCase, SwitchRoomUseCase,
    },
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Room-based WebSocket chat relay with a static file server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Directory served for plain HTTP requests ("/" maps to index.html)
    #[arg(short = 'd', long, default_value = "public")]
    public_dir: PathBuf,

    /// Maximum number of memoized static files
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Static files
    // 5. Server

    // 1. Create Repository (in-memory chat state)
    let repository = Arc::new(InMemoryChatRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let change_name_usecase = Arc::new(ChangeNameUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let switch_room_usecase = Arc::new(SwitchRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));

    // 4. Create the static file store
    let static_files = Arc::new(StaticFileStore::new(args.public_dir, args.cache_capacity));

    // 5. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        change_name_usecase,
        switch_room_usecase,
        list_rooms_usecase,
        static_files,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
