//! UseCase: Room 一覧・詳細の取得（HTTP API 用の読み取り専用クエリ）

use std::sync::Arc;

use crate::domain::{MessagePusher, PresenceRegistry, Room, RoomId, RoomRepository, UserName};

use super::error::GetRoomDetailError;

/// Room と、現在参加している接続数
#[derive(Debug, Clone, PartialEq)]
pub struct RoomOverview {
    pub room: Room,
    pub member_count: usize,
}

/// Room と、現在参加しているユーザー名
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDetail {
    pub room: Room,
    pub members: Vec<UserName>,
}

pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room ID 順の一覧を返す
    pub async fn execute(&self) -> Vec<RoomOverview> {
        let rooms = self.repository.list_rooms().await;
        let mut overviews = Vec::with_capacity(rooms.len());
        for room in rooms {
            let member_count = self.message_pusher.room_members(&room.id).await.len();
            overviews.push(RoomOverview { room, member_count });
        }
        overviews
    }
}

pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<dyn PresenceRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        presence: Arc<dyn PresenceRegistry>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            presence,
        }
    }

    pub async fn execute(&self, room_id: String) -> Result<RoomDetail, GetRoomDetailError> {
        let room_id = RoomId::new(room_id)?;
        let room = self
            .repository
            .get_room(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;

        let mut members = Vec::new();
        for connection_id in self.message_pusher.room_members(&room_id).await {
            if let Some(name) = self.presence.name_of(&connection_id).await {
                members.push(name);
            }
        }
        members.sort();

        Ok(RoomDetail { room, members })
    }
}
