//! WebSocket message DTOs.
//!
//! Every frame is a JSON object `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Stroke sub-event kind on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    Start,
    Draw,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub room_id: String,
}

/// Draw event payload, used in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawDataPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: StrokeKind,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub color: String,
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearBoardPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

/// Chat message sent by a client
///
/// `user` is accepted for compatibility but ignored: the server stamps the
/// registered name of the sending connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInvitePayload {
    pub to_user: String,
    pub room_id: String,
}

/// Messages sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    Register(RegisterPayload),
    JoinRoom(JoinRoomPayload),
    DrawData(DrawDataPayload),
    ClearBoard(ClearBoardPayload),
    SendMessage(SendMessagePayload),
    SendInvite(SendInvitePayload),
}

impl ClientMessage {
    /// Decode one text frame.
    ///
    /// A missing `data` is read as an empty object, so `{"event":"clear_board"}`
    /// is accepted. Events with required fields still fail on those fields.
    pub fn from_frame(text: &str) -> Result<Self, serde_json::Error> {
        let mut frame: serde_json::Value = serde_json::from_str(text)?;
        if let Some(object) = frame.as_object_mut() {
            object
                .entry("data")
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
        }
        serde_json::from_value(frame)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationErrorPayload {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfoPayload {
    pub room_id: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveMessagePayload {
    pub user: String,
    pub message: String,
    /// RFC 3339 (UTC, milliseconds)
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveInvitePayload {
    pub from_user: String,
    pub room_id: String,
}

/// Messages sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    RegistrationSuccess,
    RegistrationError(RegistrationErrorPayload),
    RoomInfo(RoomInfoPayload),
    LoadHistory(Vec<DrawDataPayload>),
    DrawData(DrawDataPayload),
    ClearBoard,
    ReceiveMessage(ReceiveMessagePayload),
    ReceiveInvite(ReceiveInvitePayload),
}
