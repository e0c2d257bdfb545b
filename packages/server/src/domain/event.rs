//! Events exchanged with connections.
//!
//! These are transport-independent; the infrastructure layer decides how
//! they are framed on the wire.

use super::{
    entity::{ChatMessage, DrawEvent, Invite, RoomOwner},
    value_object::{MessageContent, RoomId, UserName},
};

/// Events the server delivers to connections.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    RegistrationSuccess,
    RegistrationError {
        reason: String,
    },
    RoomInfo {
        room_id: RoomId,
        owner: RoomOwner,
    },
    LoadHistory {
        room_id: RoomId,
        events: Vec<DrawEvent>,
    },
    DrawData {
        room_id: RoomId,
        event: DrawEvent,
    },
    ClearBoard,
    ReceiveMessage(ChatMessage),
    ReceiveInvite(Invite),
}

impl ServerEvent {
    /// Event name used in logs and on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegistrationSuccess => "registration_success",
            Self::RegistrationError { .. } => "registration_error",
            Self::RoomInfo { .. } => "room_info",
            Self::LoadHistory { .. } => "load_history",
            Self::DrawData { .. } => "draw_data",
            Self::ClearBoard => "clear_board",
            Self::ReceiveMessage(_) => "receive_message",
            Self::ReceiveInvite(_) => "receive_invite",
        }
    }
}

/// Requests a connection can make, after wire-level validation.
///
/// The display name of `Register` is kept raw so that an invalid name can be
/// answered with a registration error instead of being dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    Register {
        name: String,
    },
    JoinRoom {
        room_id: RoomId,
    },
    Draw {
        room_id: Option<RoomId>,
        event: DrawEvent,
    },
    ClearBoard {
        room_id: Option<RoomId>,
    },
    SendMessage {
        room_id: Option<RoomId>,
        content: MessageContent,
    },
    SendInvite {
        to: UserName,
        room_id: RoomId,
    },
}

impl ClientRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::JoinRoom { .. } => "join_room",
            Self::Draw { .. } => "draw_data",
            Self::ClearBoard { .. } => "clear_board",
            Self::SendMessage { .. } => "send_message",
            Self::SendInvite { .. } => "send_invite",
        }
    }
}
