//! UseCase: ボードのクリア
//!
//! Room の描画履歴を空にし、送信者を含む全メンバーに `clear_board` を配信する。
//! 何度呼んでも結果は同じ（冪等）。

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, RoomRepository, ServerEvent};

use super::sequencer::RoomSequencer;

pub struct ClearBoardUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl ClearBoardUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RoomSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// 履歴をクリアして配信し、配信できた接続数を返す
    pub async fn execute(&self, room_id: &RoomId) -> usize {
        let _turn = self.sequencer.acquire(room_id).await;

        if let Err(e) = self.repository.clear_history(room_id).await {
            tracing::warn!("Board not cleared: {}", e);
        }
        tracing::info!("Board of room '{}' cleared", room_id);

        self.message_pusher
            .broadcast_to_all(room_id, ServerEvent::ClearBoard)
            .await
    }
}
