//! Conversion logic between DTOs and domain types.

use sketchroom_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ClientRequest, DrawEvent, DrawKind, MessageContent, Point, RoomId, ServerEvent, StrokeColor,
    StrokeSize, Tool, UserName, ValueObjectError,
};
use crate::infrastructure::dto::websocket as dto;

fn optional_room_id(value: Option<String>) -> Result<Option<RoomId>, ValueObjectError> {
    value.map(RoomId::new).transpose()
}

// ========================================
// DTO → Domain
// ========================================

impl From<dto::StrokeKind> for DrawKind {
    fn from(kind: dto::StrokeKind) -> Self {
        match kind {
            dto::StrokeKind::Start => Self::Start,
            dto::StrokeKind::Draw => Self::Draw,
            dto::StrokeKind::End => Self::End,
        }
    }
}

impl TryFrom<dto::DrawDataPayload> for DrawEvent {
    type Error = ValueObjectError;

    fn try_from(payload: dto::DrawDataPayload) -> Result<Self, Self::Error> {
        Ok(DrawEvent::new(
            payload.kind.into(),
            Point::new(payload.x, payload.y)?,
            StrokeColor::new(payload.color)?,
            Tool::new(payload.tool)?,
            payload.size.map(StrokeSize::new).transpose()?,
        ))
    }
}

impl TryFrom<dto::ClientMessage> for ClientRequest {
    type Error = ValueObjectError;

    fn try_from(message: dto::ClientMessage) -> Result<Self, Self::Error> {
        let request = match message {
            dto::ClientMessage::Register(payload) => Self::Register { name: payload.name },
            dto::ClientMessage::JoinRoom(payload) => Self::JoinRoom {
                room_id: RoomId::new(payload.room_id)?,
            },
            dto::ClientMessage::DrawData(mut payload) => Self::Draw {
                room_id: optional_room_id(payload.room_id.take())?,
                event: DrawEvent::try_from(payload)?,
            },
            dto::ClientMessage::ClearBoard(payload) => Self::ClearBoard {
                room_id: optional_room_id(payload.room_id)?,
            },
            dto::ClientMessage::SendMessage(payload) => Self::SendMessage {
                room_id: optional_room_id(payload.room_id)?,
                content: MessageContent::new(payload.message)?,
            },
            dto::ClientMessage::SendInvite(payload) => Self::SendInvite {
                to: UserName::new(payload.to_user)?,
                room_id: RoomId::new(payload.room_id)?,
            },
        };
        Ok(request)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<DrawKind> for dto::StrokeKind {
    fn from(kind: DrawKind) -> Self {
        match kind {
            DrawKind::Start => Self::Start,
            DrawKind::Draw => Self::Draw,
            DrawKind::End => Self::End,
        }
    }
}

fn draw_payload(room_id: &RoomId, event: DrawEvent) -> dto::DrawDataPayload {
    dto::DrawDataPayload {
        room_id: Some(room_id.as_str().to_string()),
        kind: event.kind.into(),
        x: event.point.x,
        y: event.point.y,
        color: event.color.as_str().to_string(),
        tool: event.tool.as_str().to_string(),
        size: event.size.map(|size| size.value()),
    }
}

impl From<ServerEvent> for dto::ServerMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::RegistrationSuccess => Self::RegistrationSuccess,
            ServerEvent::RegistrationError { reason } => {
                Self::RegistrationError(dto::RegistrationErrorPayload { reason })
            }
            ServerEvent::RoomInfo { room_id, owner } => Self::RoomInfo(dto::RoomInfoPayload {
                room_id: room_id.into_string(),
                owner: owner.to_string(),
            }),
            ServerEvent::LoadHistory { room_id, events } => Self::LoadHistory(
                events
                    .into_iter()
                    .map(|event| draw_payload(&room_id, event))
                    .collect(),
            ),
            ServerEvent::DrawData { room_id, event } => {
                Self::DrawData(draw_payload(&room_id, event))
            }
            ServerEvent::ClearBoard => Self::ClearBoard,
            ServerEvent::ReceiveMessage(message) => {
                Self::ReceiveMessage(dto::ReceiveMessagePayload {
                    user: message.from.into_string(),
                    message: message.content.into_string(),
                    timestamp: timestamp_to_rfc3339(message.timestamp.value()),
                })
            }
            ServerEvent::ReceiveInvite(invite) => Self::ReceiveInvite(dto::ReceiveInvitePayload {
                from_user: invite.from.into_string(),
                room_id: invite.room_id.into_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, Invite, RoomOwner, Timestamp};

    fn draw_payload_dto(kind: dto::StrokeKind, x: f64, y: f64) -> dto::DrawDataPayload {
        dto::DrawDataPayload {
            room_id: Some("r1".to_string()),
            kind,
            x,
            y,
            color: "#ff0000".to_string(),
            tool: "eraser".to_string(),
            size: Some(20.0),
        }
    }

    #[test]
    fn test_dto_draw_data_to_request() {
        // テスト項目: DTO の draw_data が Draw リクエストに変換される
        // given (前提条件):
        let message = dto::ClientMessage::DrawData(draw_payload_dto(
            dto::StrokeKind::Draw,
            10.0,
            12.5,
        ));

        // when (操作):
        let request = ClientRequest::try_from(message).unwrap();

        // then (期待する結果):
        let ClientRequest::Draw { room_id, event } = request else {
            panic!("expected Draw, got {request:?}");
        };
        assert_eq!(room_id.unwrap().as_str(), "r1");
        assert_eq!(event.kind, DrawKind::Draw);
        assert_eq!(event.point, Point::new(10.0, 12.5).unwrap());
        assert_eq!(event.tool.as_str(), "eraser");
        assert_eq!(event.size.unwrap().value(), 20.0);
    }

    #[test]
    fn test_dto_draw_data_with_empty_color_is_rejected() {
        // テスト項目: 色が空の draw_data は変換エラーになる
        // given (前提条件):
        let mut payload = draw_payload_dto(dto::StrokeKind::Start, 0.0, 0.0);
        payload.color = String::new();

        // when (操作):
        let result = ClientRequest::try_from(dto::ClientMessage::DrawData(payload));

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("stroke color")));
    }

    #[test]
    fn test_dto_register_keeps_raw_name() {
        // テスト項目: register の名前はバリデーションせずにそのまま渡される
        // given (前提条件):
        let message = dto::ClientMessage::Register(dto::RegisterPayload {
            name: "   ".to_string(),
        });

        // when (操作):
        let request = ClientRequest::try_from(message).unwrap();

        // then (期待する結果):
        assert_eq!(
            request,
            ClientRequest::Register {
                name: "   ".to_string()
            }
        );
    }

    #[test]
    fn test_dto_send_message_ignores_claimed_user() {
        // テスト項目: send_message の user フィールドはリクエストに含まれない
        // given (前提条件):
        let message = dto::ClientMessage::SendMessage(dto::SendMessagePayload {
            room_id: None,
            user: Some("mallory".to_string()),
            message: "hi".to_string(),
        });

        // when (操作):
        let request = ClientRequest::try_from(message).unwrap();

        // then (期待する結果):
        assert_eq!(
            request,
            ClientRequest::SendMessage {
                room_id: None,
                content: MessageContent::new("hi".to_string()).unwrap(),
            }
        );
    }

    #[test]
    fn test_domain_history_to_dto_carries_room_id() {
        // テスト項目: 履歴の各イベントに Room ID が付与される
        // given (前提条件):
        let room_id = RoomId::new("r1".to_string()).unwrap();
        let event = DrawEvent::try_from(draw_payload_dto(dto::StrokeKind::Start, 1.0, 2.0))
            .unwrap();

        // when (操作):
        let message: dto::ServerMessage = ServerEvent::LoadHistory {
            room_id,
            events: vec![event.clone(), event],
        }
        .into();

        // then (期待する結果):
        let dto::ServerMessage::LoadHistory(events) = message else {
            panic!("expected load_history, got {message:?}");
        };
        assert_eq!(events.len(), 2);
        assert!(
            events
                .iter()
                .all(|event| event.room_id.as_deref() == Some("r1"))
        );
    }

    #[test]
    fn test_domain_chat_message_to_dto() {
        // テスト項目: チャットメッセージのタイムスタンプが RFC 3339 に変換される
        // given (前提条件):
        let message = ChatMessage::new(
            UserName::new("alice".to_string()).unwrap(),
            MessageContent::new("Hello!".to_string()).unwrap(),
            Timestamp::new(1672531200000),
        );

        // when (操作):
        let dto_message: dto::ServerMessage = ServerEvent::ReceiveMessage(message).into();

        // then (期待する結果):
        assert_eq!(
            dto_message,
            dto::ServerMessage::ReceiveMessage(dto::ReceiveMessagePayload {
                user: "alice".to_string(),
                message: "Hello!".to_string(),
                timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            })
        );
    }

    #[test]
    fn test_domain_room_info_and_invite_to_dto() {
        // テスト項目: room_info と receive_invite が DTO に変換される
        // given (前提条件):
        let room_id = RoomId::new("general".to_string()).unwrap();
        let invite = Invite {
            from: UserName::new("alice".to_string()).unwrap(),
            to: UserName::new("bob".to_string()).unwrap(),
            room_id: room_id.clone(),
        };

        // when (操作):
        let info: dto::ServerMessage = ServerEvent::RoomInfo {
            room_id,
            owner: RoomOwner::System,
        }
        .into();
        let invite: dto::ServerMessage = ServerEvent::ReceiveInvite(invite).into();

        // then (期待する結果):
        assert_eq!(
            info,
            dto::ServerMessage::RoomInfo(dto::RoomInfoPayload {
                room_id: "general".to_string(),
                owner: "System".to_string(),
            })
        );
        assert_eq!(
            invite,
            dto::ServerMessage::ReceiveInvite(dto::ReceiveInvitePayload {
                from_user: "alice".to_string(),
                room_id: "general".to_string(),
            })
        );
    }
}
