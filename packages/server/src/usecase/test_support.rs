//! Helpers shared by the use case tests.

use std::sync::Arc;

use sketchroom_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, DrawEvent, DrawKind, PresenceRegistry, Point, RoomId, StrokeColor, Tool,
        UserName,
    },
    infrastructure::{
        dto::websocket::ServerMessage,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryPresenceRegistry, InMemoryRoomRepository},
    },
};

use super::{GetRoomDetailUseCase, GetRoomsUseCase, SessionUseCases};

/// In-memory stores wired to a real pusher, with the clock fixed at [`Fixture::NOW`].
pub(crate) struct Fixture {
    pub presence: Arc<InMemoryPresenceRegistry>,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub usecases: Arc<SessionUseCases>,
}

impl Fixture {
    /// 2023-01-01T00:00:00.000Z
    pub const NOW: i64 = 1672531200000;

    pub fn new() -> Self {
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let rooms = Arc::new(InMemoryRoomRepository::new(FixedClock::new(Self::NOW)));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecases = Arc::new(SessionUseCases::new(
            presence.clone(),
            rooms.clone(),
            pusher.clone(),
            Arc::new(FixedClock::new(Self::NOW)),
        ));
        Self {
            presence,
            rooms,
            pusher,
            usecases,
        }
    }

    /// Accept a connection; frames pushed to it arrive on the returned receiver.
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = self.usecases.connect.execute(tx).await;
        (connection_id, rx)
    }

    /// Connect and bind `user` without sending `registration_success`.
    pub async fn register(&self, user: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (connection_id, rx) = self.connect().await;
        self.presence
            .register(name(user), connection_id)
            .await
            .unwrap();
        (connection_id, rx)
    }

    /// Register `user` and join `room_id`. The join replies stay in the receiver.
    pub async fn join(
        &self,
        user: &str,
        room_id: &str,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (connection_id, rx) = self.register(user).await;
        self.usecases
            .join_room
            .execute(connection_id, name(user), room(room_id))
            .await
            .unwrap();
        (connection_id, rx)
    }

    pub fn get_rooms(&self) -> GetRoomsUseCase {
        GetRoomsUseCase::new(self.rooms.clone(), self.pusher.clone())
    }

    pub fn get_room_detail(&self) -> GetRoomDetailUseCase {
        GetRoomDetailUseCase::new(
            self.rooms.clone(),
            self.pusher.clone(),
            self.presence.clone(),
        )
    }
}

/// Everything currently queued on `rx`, decoded.
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        messages.push(serde_json::from_str(&frame).unwrap());
    }
    messages
}

pub(crate) fn name(value: &str) -> UserName {
    UserName::new(value.to_string()).unwrap()
}

pub(crate) fn room(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub(crate) fn stroke(kind: DrawKind, x: f64, y: f64) -> DrawEvent {
    DrawEvent::new(
        kind,
        Point::new(x, y).unwrap(),
        StrokeColor::new("#000000".to_string()).unwrap(),
        Tool::new("pencil".to_string()).unwrap(),
        None,
    )
}
