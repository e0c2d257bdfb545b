//! Collaborative whiteboard server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sketchroom-server
//! cargo run --bin sketchroom-server -- --host 0.0.0.0 --port 3001 --room general --room lobby
//! ```

use std::sync::Arc;

use clap::Parser;
use sketchroom_server::{
    domain::{RoomId, RoomOwner, RoomRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryPresenceRegistry, InMemoryRoomRepository},
    },
    ui::{Server, state::AppState},
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase, SessionUseCases},
};
use sketchroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sketchroom-server")]
#[command(about = "Real-time collaborative whiteboard server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3001")]
    port: u16,

    /// Rooms created at startup (repeatable)
    #[arg(long = "room", default_value = "general")]
    rooms: Vec<String>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logger(&[env!("CARGO_PKG_NAME"), "tower_http"], &args.log_level);

    // Initialize dependencies in order:
    // 1. Stores
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. In-memory stores
    let presence = Arc::new(InMemoryPresenceRegistry::new());
    let rooms = Arc::new(InMemoryRoomRepository::new(SystemClock));
    for name in args.rooms {
        match RoomId::new(name.clone()) {
            Ok(room_id) => {
                rooms.ensure_room(room_id, RoomOwner::System).await;
            }
            Err(e) => {
                tracing::error!("Invalid room name '{}': {}", name, e);
                std::process::exit(1);
            }
        }
    }

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. UseCases
    let session_usecases = Arc::new(SessionUseCases::new(
        presence.clone(),
        rooms.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(rooms.clone(), message_pusher.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(
        rooms,
        message_pusher,
        presence,
    ));

    // 4. Create and run the server
    let server = Server::new(AppState {
        session_usecases,
        get_rooms_usecase,
        get_room_detail_usecase,
    });
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
