//! Entity 定義
//!
//! Room は Room ID によって識別され、オーナーと描画履歴を保持する。

use std::fmt;

use serde::Serialize;

use super::value_object::{
    DrawKind, MessageContent, Point, RoomId, StrokeColor, StrokeSize, Timestamp, Tool, UserName,
};

/// Display name used for rooms seeded by the server itself.
pub const SYSTEM_OWNER_NAME: &str = "System";

/// Room のオーナー
///
/// 最初に join したユーザー、もしくは起動時に作成された部屋では `System`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RoomOwner {
    System,
    User(UserName),
}

impl RoomOwner {
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => SYSTEM_OWNER_NAME,
            Self::User(name) => name.as_str(),
        }
    }
}

impl fmt::Display for RoomOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One start/draw/end fragment of a pen stroke.
///
/// The server never interprets strokes; events are appended and replayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawEvent {
    pub kind: DrawKind,
    pub point: Point,
    pub color: StrokeColor,
    pub tool: Tool,
    pub size: Option<StrokeSize>,
}

impl DrawEvent {
    pub fn new(
        kind: DrawKind,
        point: Point,
        color: StrokeColor,
        tool: Tool,
        size: Option<StrokeSize>,
    ) -> Self {
        // `end` carries no coordinates
        let point = match kind {
            DrawKind::End => Point::default(),
            DrawKind::Start | DrawKind::Draw => point,
        };
        Self {
            kind,
            point,
            color,
            tool,
            size,
        }
    }
}

/// Room エンティティ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub owner: RoomOwner,
    /// 最後の clear 以降の描画イベント（受信順）
    pub history: Vec<DrawEvent>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, owner: RoomOwner, created_at: Timestamp) -> Self {
        Self {
            id,
            owner,
            history: Vec::new(),
            created_at,
        }
    }

    pub fn append(&mut self, event: DrawEvent) {
        self.history.push(event);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// チャットメッセージ（配信のみで保存はしない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub from: UserName,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(from: UserName, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            from,
            content,
            timestamp,
        }
    }
}

/// One-shot directed invitation to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invite {
    pub from: UserName,
    pub to: UserName,
    pub room_id: RoomId,
}
