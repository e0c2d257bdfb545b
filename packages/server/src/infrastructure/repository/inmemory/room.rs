//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! Room は作成されたらプロセスが終了するまで残り続けます。
//! 描画履歴も clear されるまで無制限に増え続けます。

use std::collections::HashMap;

use async_trait::async_trait;
use sketchroom_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    DrawEvent, RepositoryError, Room, RoomId, RoomOwner, RoomRepository, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, Room>>,
    clock: Box<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    ///
    /// `clock` は Room の作成時刻に使われる
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock: Box::new(clock),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn ensure_room(&self, room_id: RoomId, owner: RoomOwner) -> Room {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id)
            .or_insert_with_key(|room_id| {
                tracing::info!("Room '{}' created by '{}'", room_id, owner);
                Room::new(
                    room_id.clone(),
                    owner,
                    Timestamp::new(self.clock.now_millis()),
                )
            })
            .clone()
    }

    async fn append_history(
        &self,
        room_id: &RoomId,
        event: DrawEvent,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.append(event);
        Ok(())
    }

    async fn clear_history(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.clear();
        Ok(())
    }

    async fn get_history(&self, room_id: &RoomId) -> Result<Vec<DrawEvent>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|room| room.history.clone())
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }
}
