//! UseCase: チャットメッセージ送信
//!
//! サーバー時刻を付与し、送信者を含む Room の全メンバーに配信する。
//! 送信者にも同じ配信経路で届けることで、表示順の基準を 1 つにする。
//! チャットは保存しない（参加時の再生もしない）。

use std::sync::Arc;

use sketchroom_shared::time::Clock;

use crate::domain::{
    ChatMessage, MessageContent, MessagePusher, RoomId, ServerEvent, Timestamp, UserName,
};

use super::sequencer::RoomSequencer;

pub struct SendChatUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RoomSequencer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// メッセージを配信し、配信したメッセージを返す
    pub async fn execute(
        &self,
        room_id: &RoomId,
        from: UserName,
        content: MessageContent,
    ) -> ChatMessage {
        let _turn = self.sequencer.acquire(room_id).await;

        let message = ChatMessage::new(from, content, Timestamp::new(self.clock.now_millis()));
        let delivered = self
            .message_pusher
            .broadcast_to_all(room_id, ServerEvent::ReceiveMessage(message.clone()))
            .await;
        tracing::info!(
            "Chat from '{}' in room '{}' delivered to {} connection(s)",
            message.from,
            room_id,
            delivered
        );

        message
    }
}
