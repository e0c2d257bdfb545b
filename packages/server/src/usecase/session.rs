//! Session Gateway: per-connection state machine.
//!
//! ```text
//! Unregistered --register--> Registered --join_room--> InRoom
//!      |                          |                     |  ^
//!      |                          |                     +--+ join_room (any room)
//!      +--------------------------+---------------------+--> Disconnected
//! ```
//!
//! Requests that are not valid in the current state are logged and ignored;
//! a misbehaving client never affects other sessions.

use std::sync::Arc;

use sketchroom_shared::time::Clock;

use crate::domain::{
    ClientRequest, ConnectionId, MessagePusher, PresenceRegistry, PusherChannel, RoomId,
    RoomRepository, UserName,
};

use super::{
    ClearBoardUseCase, ConnectUseCase, DisconnectUseCase, DrawUseCase, JoinRoomUseCase,
    RegisterUserUseCase, SendChatUseCase, SendInviteUseCase, sequencer::RoomSequencer,
};

/// Use cases a session drives, wired to the same stores and sequencer.
pub struct SessionUseCases {
    pub connect: ConnectUseCase,
    pub register_user: RegisterUserUseCase,
    pub join_room: JoinRoomUseCase,
    pub draw: DrawUseCase,
    pub clear_board: ClearBoardUseCase,
    pub send_chat: SendChatUseCase,
    pub send_invite: SendInviteUseCase,
    pub disconnect: DisconnectUseCase,
}

impl SessionUseCases {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sequencer = Arc::new(RoomSequencer::new());
        Self {
            connect: ConnectUseCase::new(message_pusher.clone()),
            register_user: RegisterUserUseCase::new(presence.clone(), message_pusher.clone()),
            join_room: JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            ),
            draw: DrawUseCase::new(repository.clone(), message_pusher.clone(), sequencer.clone()),
            clear_board: ClearBoardUseCase::new(
                repository,
                message_pusher.clone(),
                sequencer.clone(),
            ),
            send_chat: SendChatUseCase::new(message_pusher.clone(), sequencer, clock),
            send_invite: SendInviteUseCase::new(presence.clone(), message_pusher.clone()),
            disconnect: DisconnectUseCase::new(presence, message_pusher),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unregistered,
    Registered { name: UserName },
    InRoom { name: UserName, room_id: RoomId },
    Disconnected,
}

impl SessionState {
    pub fn user_name(&self) -> Option<&UserName> {
        match self {
            Self::Registered { name } | Self::InRoom { name, .. } => Some(name),
            Self::Unregistered | Self::Disconnected => None,
        }
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        match self {
            Self::InRoom { room_id, .. } => Some(room_id),
            _ => None,
        }
    }
}

pub struct SessionGateway {
    connection_id: ConnectionId,
    state: SessionState,
    usecases: Arc<SessionUseCases>,
}

impl SessionGateway {
    /// Accept a new connection whose outbound frames go to `sender`.
    pub async fn open(usecases: Arc<SessionUseCases>, sender: PusherChannel) -> Self {
        let connection_id = usecases.connect.execute(sender).await;
        Self {
            connection_id,
            state: SessionState::Unregistered,
            usecases,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn handle(&mut self, request: ClientRequest) {
        tracing::debug!(
            "Connection '{}' ({:?}) requested '{}'",
            self.connection_id,
            self.state,
            request.name()
        );
        if self.state == SessionState::Disconnected {
            tracing::warn!("Ignoring '{}' on a closed session", request.name());
            return;
        }

        match request {
            ClientRequest::Register { name } => self.register(name).await,
            ClientRequest::JoinRoom { room_id } => self.join(room_id).await,
            ClientRequest::Draw { room_id, event } => {
                if let Some(room_id) = self.current_room(room_id.as_ref(), "draw_data") {
                    self.usecases
                        .draw
                        .execute(self.connection_id, &room_id, event)
                        .await;
                }
            }
            ClientRequest::ClearBoard { room_id } => {
                if let Some(room_id) = self.current_room(room_id.as_ref(), "clear_board") {
                    self.usecases.clear_board.execute(&room_id).await;
                }
            }
            ClientRequest::SendMessage { room_id, content } => {
                if let (Some(room_id), Some(name)) = (
                    self.current_room(room_id.as_ref(), "send_message"),
                    self.state.user_name().cloned(),
                ) {
                    self.usecases
                        .send_chat
                        .execute(&room_id, name, content)
                        .await;
                }
            }
            ClientRequest::SendInvite { to, room_id } => {
                let Some(from) = self.state.user_name().cloned() else {
                    tracing::warn!("Ignoring 'send_invite' before registration");
                    return;
                };
                self.usecases.send_invite.execute(from, to, room_id).await;
            }
        }
    }

    /// Release the name and room membership. Safe to call more than once.
    pub async fn close(&mut self) {
        if self.state == SessionState::Disconnected {
            return;
        }
        self.usecases.disconnect.execute(&self.connection_id).await;
        self.state = SessionState::Disconnected;
    }

    async fn register(&mut self, name: String) {
        // a failed attempt leaves the session where it was
        if let Ok(name) = self
            .usecases
            .register_user
            .execute(self.connection_id, name)
            .await
            && self.state == SessionState::Unregistered
        {
            self.state = SessionState::Registered { name };
        }
    }

    async fn join(&mut self, room_id: RoomId) {
        let Some(name) = self.state.user_name().cloned() else {
            tracing::warn!("Ignoring 'join_room' before registration");
            return;
        };
        match self
            .usecases
            .join_room
            .execute(self.connection_id, name.clone(), room_id)
            .await
        {
            Ok(room) => {
                self.state = SessionState::InRoom {
                    name,
                    room_id: room.id,
                }
            }
            // the session keeps its previous room until the transport close cleans up
            Err(e) => tracing::warn!("Join failed for '{}': {}", name, e),
        }
    }

    /// The joined room, if `claimed` (when given) names it.
    fn current_room(&self, claimed: Option<&RoomId>, request: &str) -> Option<RoomId> {
        let Some(current) = self.state.room_id() else {
            tracing::warn!("Ignoring '{}' outside of a room", request);
            return None;
        };
        match claimed {
            Some(claimed) if claimed != current => {
                tracing::warn!(
                    "Ignoring '{}' for room '{}' while joined to '{}'",
                    request,
                    claimed,
                    current
                );
                None
            }
            _ => Some(current.clone()),
        }
    }
}
