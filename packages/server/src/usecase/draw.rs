//! UseCase: 描画イベントの記録と配信
//!
//! 描画イベントを Room の履歴に追加し、送信者以外のメンバーに配信する。
//! 送信者は自分のストロークをローカルで描画済みのため、送り返さない。

use std::sync::Arc;

use crate::domain::{ConnectionId, DrawEvent, MessagePusher, RoomId, RoomRepository, ServerEvent};

use super::sequencer::RoomSequencer;

pub struct DrawUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl DrawUseCase {
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

    /// 描画イベントを記録して配信し、配信できた接続数を返す
    pub async fn execute(&self, sender: ConnectionId, room_id: &RoomId, event: DrawEvent) -> usize {
        let _turn = self.sequencer.acquire(room_id).await;

        if let Err(e) = self
            .repository
            .append_history(room_id, event.clone())
            .await
        {
            tracing::warn!("Draw event not recorded: {}", e);
        }

        self.message_pusher
            .broadcast_to_others(
                room_id,
                &sender,
                ServerEvent::DrawData {
                    room_id: room_id.clone(),
                    event,
                },
            )
            .await
    }
}
