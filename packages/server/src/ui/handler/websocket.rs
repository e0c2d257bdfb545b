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
    domain::ClientRequest,
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::SessionGateway,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards frames pushed to this connection to its WebSocket sink.
///
/// The task ends when the sink fails or every sender of `rx` is dropped.
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

/// Decode a text frame into a request. Malformed frames are logged and dropped.
fn decode(text: &str) -> Option<ClientRequest> {
    let message = match ClientMessage::from_frame(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to parse frame: {}", e);
            return None;
        }
    };
    match ClientRequest::try_from(message) {
        Ok(request) => Some(request),
        Err(e) => {
            tracing::warn!("Rejected request: {}", e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let mut session = SessionGateway::open(state.session_usecases.clone(), tx).await;
    let connection_id = session.connection_id();
    tracing::info!("Connection '{}' opened", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let msg = match incoming {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                        break;
                    }
                    None => break,
                };
                match msg {
                    Message::Text(text) => {
                        tracing::trace!("Received text from '{}': {}", connection_id, text.as_str());
                        if let Some(request) = decode(text.as_str()) {
                            session.handle(request).await;
                        }
                    }
                    Message::Close(_) => {
                        tracing::info!("Connection '{}' requested close", connection_id);
                        break;
                    }
                    Message::Binary(_) => {
                        tracing::warn!("Ignoring binary frame from '{}'", connection_id);
                    }
                    // Ping/pong is handled by the WebSocket protocol
                    Message::Ping(_) | Message::Pong(_) => {}
                }
            }
            _ = &mut send_task => {
                tracing::debug!("Outbound stream for '{}' closed", connection_id);
                break;
            }
        }
    }

    session.close().await;
    send_task.abort();
    tracing::info!("Connection '{}' closed", connection_id);
}
