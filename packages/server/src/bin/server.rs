//! Chat relay server.
//!
//! Clients connect over WebSocket at `/ws`, create or join rooms and exchange
//! messages with every other session in the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatrelay-server
//! cargo run --bin chatrelay-server -- --host 0.0.0.0 --port 3000 --log-level info
//! ```

use std::sync::Arc;

use chatrelay_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry,
        storage::InMemoryChatStorage,
    },
    ui::{Server, SessionRouter},
    usecase::GetRoomMembersUseCase,
};
use chatrelay_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatrelay-server")]
#[command(about = "WebSocket chat relay with rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &args.log_level,
    );

    // Initialize dependencies in order:
    // 1. Storage
    // 2. RoomRegistry
    // 3. MessagePusher
    // 4. SessionRouter (wires the session usecases)
    // 5. Server

    // 1. Create Storage (in-memory database)
    let storage = Arc::new(InMemoryChatStorage::new());

    // 2. Create RoomRegistry
    let registry = Arc::new(InMemoryRoomRegistry::new());

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 4. Create SessionRouter
    let router = Arc::new(SessionRouter::with_components(
        storage,
        registry.clone(),
        message_pusher,
    ));

    // 5. Create and run the server
    let get_room_members_usecase = Arc::new(GetRoomMembersUseCase::new(registry));
    let server = Server::new(router, get_room_members_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
