//! UseCase: Room への参加
//!
//! Room を（なければ作成して）取得し、メンバーシップを更新したうえで、
//! 参加者本人にだけ `room_info` と描画履歴（空でなければ）を送る。
//! これらは Room のターンを保持したまま行うため、参加の前後で
//! 描画イベントを取りこぼしたり二重に受け取ったりしない。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Room, RoomId, RoomOwner, RoomRepository, ServerEvent, UserName,
};

use super::{error::JoinRoomError, sequencer::RoomSequencer};

pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl JoinRoomUseCase {
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

    /// Room に参加する
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 参加時点の Room のスナップショット
    /// * `Err(JoinRoomError)` - 参加者の接続が既に存在しない
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        user: UserName,
        room_id: RoomId,
    ) -> Result<Room, JoinRoomError> {
        let _turn = self.sequencer.acquire(&room_id).await;

        let room = self
            .repository
            .ensure_room(room_id.clone(), RoomOwner::User(user.clone()))
            .await;

        let previous = self
            .message_pusher
            .join_room(&connection_id, &room_id)
            .await?;
        if let Some(previous) = previous.filter(|previous| previous != &room_id) {
            tracing::debug!("'{}' left room '{}'", user, previous);
        }
        tracing::info!("'{}' joined room '{}'", user, room_id);

        // 以降の送信が失敗するのは接続が切れたときだけ。メンバーシップは戻さず、
        // 切断処理（unregister_client）で片付く
        self.message_pusher
            .push_to(
                &connection_id,
                ServerEvent::RoomInfo {
                    room_id: room.id.clone(),
                    owner: room.owner.clone(),
                },
            )
            .await?;

        if !room.history.is_empty() {
            self.message_pusher
                .push_to(
                    &connection_id,
                    ServerEvent::LoadHistory {
                        room_id: room.id.clone(),
                        events: room.history.clone(),
                    },
                )
                .await?;
        }

        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DrawKind, MessagePushError},
        infrastructure::dto::websocket::{RoomInfoPayload, ServerMessage, StrokeKind},
        usecase::test_support::{Fixture, drain, name, room, stroke},
    };

    #[tokio::test]
    async fn test_first_joiner_becomes_owner() {
        // テスト項目: 最初に join したユーザーがオーナーになり、room_info のみが届く
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, mut rx) = fixture.register("alice").await;

        // when (操作):
        let result = fixture
            .usecases
            .join_room
            .execute(alice, name("alice"), room("r1"))
            .await;

        // then (期待する結果):
        let joined = result.unwrap();
        assert_eq!(joined.owner, RoomOwner::User(name("alice")));
        assert_eq!(
            drain(&mut rx),
            vec![ServerMessage::RoomInfo(RoomInfoPayload {
                room_id: "r1".to_string(),
                owner: "alice".to_string(),
            })]
        );
    }

    #[tokio::test]
    async fn test_later_joiner_receives_owner_and_history() {
        // テスト項目: 後から join したユーザーにはオーナー情報と描画履歴が順番通り届く
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, _alice_rx) = fixture.register("alice").await;
        fixture
            .usecases
            .join_room
            .execute(alice, name("alice"), room("r1"))
            .await
            .unwrap();
        for event in [
            stroke(DrawKind::Start, 0.0, 0.0),
            stroke(DrawKind::Draw, 10.0, 10.0),
            stroke(DrawKind::End, 0.0, 0.0),
        ] {
            fixture.usecases.draw.execute(alice, &room("r1"), event).await;
        }
        let (bob, mut bob_rx) = fixture.register("bob").await;

        // when (操作):
        fixture
            .usecases
            .join_room
            .execute(bob, name("bob"), room("r1"))
            .await
            .unwrap();

        // then (期待する結果):
        let messages = drain(&mut bob_rx);
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0],
            ServerMessage::RoomInfo(RoomInfoPayload {
                room_id: "r1".to_string(),
                owner: "alice".to_string(),
            })
        );
        let ServerMessage::LoadHistory(history) = &messages[1] else {
            panic!("expected load_history, got {:?}", messages[1]);
        };
        let kinds: Vec<StrokeKind> = history.iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec![StrokeKind::Start, StrokeKind::Draw, StrokeKind::End]);
        assert_eq!((history[1].x, history[1].y), (10.0, 10.0));
    }

    #[tokio::test]
    async fn test_seeded_room_keeps_system_owner() {
        // テスト項目: 起動時に作成された Room のオーナーは System のまま
        // given (前提条件):
        let fixture = Fixture::new();
        fixture
            .rooms
            .ensure_room(room("general"), RoomOwner::System)
            .await;
        let (alice, mut rx) = fixture.register("alice").await;

        // when (操作):
        let joined = fixture
            .usecases
            .join_room
            .execute(alice, name("alice"), room("general"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(joined.owner, RoomOwner::System);
        assert_eq!(
            drain(&mut rx),
            vec![ServerMessage::RoomInfo(RoomInfoPayload {
                room_id: "general".to_string(),
                owner: "System".to_string(),
            })]
        );
    }

    #[tokio::test]
    async fn test_switching_rooms_moves_membership() {
        // テスト項目: 別の Room に join し直すと以前の Room の配信は届かなくなる
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.register("alice").await;
        let (bob, _bob_rx) = fixture.register("bob").await;
        fixture
            .usecases
            .join_room
            .execute(alice, name("alice"), room("r1"))
            .await
            .unwrap();
        fixture
            .usecases
            .join_room
            .execute(bob, name("bob"), room("r1"))
            .await
            .unwrap();

        // when (操作):
        fixture
            .usecases
            .join_room
            .execute(alice, name("alice"), room("r2"))
            .await
            .unwrap();
        drain(&mut alice_rx);
        fixture
            .usecases
            .draw
            .execute(bob, &room("r1"), stroke(DrawKind::Start, 1.0, 1.0))
            .await;

        // then (期待する結果):
        assert!(drain(&mut alice_rx).is_empty());
        assert_eq!(fixture.pusher.room_members(&room("r2")).await, vec![alice]);
    }

    #[tokio::test]
    async fn test_join_from_unknown_connection() {
        // テスト項目: 送信チャンネルのない接続の join はエラーになる
        // given (前提条件):
        let fixture = Fixture::new();

        // when (操作):
        let result = fixture
            .usecases
            .join_room
            .execute(ConnectionId::generate(), name("ghost"), room("r1"))
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(JoinRoomError::Delivery(MessagePushError::ClientNotFound(_)))
        ));
    }
}
